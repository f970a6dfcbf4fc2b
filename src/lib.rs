//! pictoplan library root.
//! Exposes the CLI parser, the high-level run() function, and the planner modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use cli::commands as cmd;

    match &cli.command {
        Commands::Init => cmd::init::handle(cli),
        Commands::Config { .. } => cmd::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cmd::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cmd::log::handle(&cli.command, cfg),
        Commands::Mode { .. } => cmd::mode::handle(&cli.command, cfg),
        Commands::Week { .. } | Commands::Day { .. } => cmd::view::handle(&cli.command, cfg),
        Commands::Add { .. }
        | Commands::Toggle { .. }
        | Commands::Edit { .. }
        | Commands::Move { .. }
        | Commands::Del { .. }
        | Commands::Clear { .. }
        | Commands::Copy { .. } => cmd::activity::handle(&cli.command, cfg),
        Commands::Routine { .. } => cmd::routine::handle(&cli.command, cfg),
        Commands::Picto { .. } => cmd::picto::handle(&cli.command, cfg),
        Commands::People { .. } => cmd::people::handle(&cli.command, cfg),
        Commands::Settings { .. } | Commands::Pin { .. } => cmd::settings::handle(&cli.command, cfg),
        Commands::Reward { .. } => cmd::reward::handle(&cli.command, cfg),
        Commands::Create { .. } => cmd::create::handle(&cli.command, cfg),
        Commands::Backup { .. } | Commands::Restore { .. } => cmd::backup::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // configuration is loaded once, then the --db override applies
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}
