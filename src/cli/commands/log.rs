use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// `log --print`: every persisted change, oldest first.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Log { print: true } => {
            let pool = open_db(&cfg.database)?;
            LogLogic::print_log(&pool)
        }
        _ => {
            info("Use --print to show the internal log.");
            Ok(())
        }
    }
}
