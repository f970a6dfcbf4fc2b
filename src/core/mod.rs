pub mod access;
pub mod backup;
pub mod collaborators;
pub mod completion;
pub mod generator;
pub mod log;
pub mod people;
pub mod pictograms;
pub mod routines;
pub mod schedule;
