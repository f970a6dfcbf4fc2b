use super::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::AppMode;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Mode { target, pin } = cmd else {
        return Ok(());
    };

    let mut store = open_store(cfg, None)?;

    match target.as_deref().map(|t| t.trim().to_lowercase()).as_deref() {
        None => info(format!("Current mode: {}", store.mode().as_str())),
        Some("child" | "niño" | "nino") => {
            store.enter_child_mode();
            success("Child mode on. Only checking activities and redeeming rewards is allowed.");
        }
        Some("adult" | "adulto") => {
            if store.mode() == AppMode::Adult {
                info("Already in adult mode.");
                return Ok(());
            }
            let pin = pin
                .as_deref()
                .ok_or_else(|| AppError::MissingField("--pin".to_string()))?;
            store.enter_adult_mode(pin)?;
            success("Adult mode on.");
        }
        Some(other) => {
            return Err(AppError::Other(format!(
                "unknown mode '{other}' (adult | child)"
            )));
        }
    }

    Ok(())
}
