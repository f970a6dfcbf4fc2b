use super::{open_store, parse_day, parse_period};
use crate::cli::parser::{Commands, RoutineAction};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::day_key;
use crate::utils::formatting::short_id;
use crate::utils::path::expand_tilde;
use crate::utils::table::{Column, Table};
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Routine { action } = cmd else {
        return Ok(());
    };

    match action {
        RoutineAction::Save {
            date,
            name,
            description,
            period,
        } => {
            let d = parse_day(date)?;
            let period = period.as_deref().map(parse_period).transpose()?;
            let mut store = open_store(cfg, Some(d))?;
            let t = store.save_routine(name, description, period)?;
            success(format!(
                "Saved routine '{}' with {} activities #{}",
                t.name,
                t.activities.len(),
                short_id(&t.id)
            ));
        }

        RoutineAction::Apply {
            routine,
            date,
            period,
        } => {
            let d = parse_day(date)?;
            let period = parse_period(period)?;
            let mut store = open_store(cfg, Some(d))?;
            let n = store.apply_routine(routine, period)?;
            success(format!("Applied {n} activities to {}", day_key(d)));
        }

        RoutineAction::List => {
            let store = open_store(cfg, None)?;
            if store.routines().is_empty() {
                info("No routines saved.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 9),
                Column::new("Name", 24),
                Column::new("Activities", 10),
                Column::new("Description", 30),
            ]);
            for t in store.routines() {
                table.add_row(vec![
                    short_id(&t.id).to_string(),
                    t.name.clone(),
                    t.activities.len().to_string(),
                    t.description.clone(),
                ]);
            }
            print!("{}", table.render());
        }

        RoutineAction::Del { routine } => {
            let mut store = open_store(cfg, None)?;
            let t = store.delete_routine(routine)?;
            success(format!("Deleted routine '{}'", t.name));
        }

        RoutineAction::Export { routine, file } => {
            let store = open_store(cfg, None)?;
            let json = store.export_routine(routine)?;
            let path = expand_tilde(file);
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, json)?;
            success(format!("Routine exported to {}", path.display()));
        }

        RoutineAction::Import {
            file,
            with_pictograms,
        } => {
            let raw = fs::read_to_string(expand_tilde(file))?;
            let mut store = open_store(cfg, None)?;
            let t = store.import_routine(&raw, *with_pictograms)?;
            success(format!(
                "Imported routine '{}' with {} activities #{}",
                t.name,
                t.activities.len(),
                short_id(&t.id)
            ));

            let missing = store.missing_pictograms(&t);
            if !missing.is_empty() {
                warning(format!(
                    "Pictograms not in the local library: {}",
                    missing.join(", ")
                ));
            }
        }
    }

    Ok(())
}
