//! Domain types. Everything here serializes to the JSON documents kept in
//! storage, with camelCase field names.

pub mod activity;
pub mod icon;
pub mod mode;
pub mod period;
pub mod person;
pub mod pictogram;
pub mod reward;
pub mod routine;
pub mod schedule;
pub mod settings;

pub use activity::{Activity, ActivityPatch};
pub use icon::IconName;
pub use mode::AppMode;
pub use period::Period;
pub use person::{PersonKind, PersonOrPlace};
pub use pictogram::{Category, Pictogram, PictogramLibrary, PictogramSource};
pub use reward::Reward;
pub use routine::{RoutineDocument, RoutineTemplate, TemplateActivity};
pub use schedule::{WeekSchedule, YearlySchedule};
pub use settings::{AppSettings, SettingsPatch};
