use super::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::{read_backup, write_backup};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::path::{expand_tilde, is_absolute};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Backup {
            file,
            compress,
            force,
        } => {
            if !is_absolute(file) {
                warning(format!("Relative path '{file}' is resolved from the current directory"));
            }
            let dest = expand_tilde(file);
            let final_path = if *compress {
                dest.with_extension("zip")
            } else {
                dest.clone()
            };
            if final_path.exists() && !*force {
                return Err(AppError::Other(format!(
                    "{} already exists (use --force to overwrite)",
                    final_path.display()
                )));
            }

            let store = open_store(cfg, None)?;
            let doc = store.backup_document();
            let written = write_backup(&doc, &dest, *compress)?;
            success(format!("Backup written to {}", written.display()));
        }

        Commands::Restore { file } => {
            let doc = read_backup(&expand_tilde(file))?;
            let mut store = open_store(cfg, None)?;
            store.restore(doc)?;
            success(format!(
                "Restored {} weeks, {} pictograms, {} people, {} routines",
                store.yearly_schedule().len(),
                store.pictograms().len(),
                store.people().len(),
                store.routines().len()
            ));
        }

        _ => {}
    }

    Ok(())
}
