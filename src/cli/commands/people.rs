use super::open_store;
use crate::cli::parser::{Commands, PeopleAction};
use crate::config::Config;
use crate::core::people::PersonPatch;
use crate::errors::{AppError, AppResult};
use crate::models::PersonKind;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

fn parse_kind(s: &str) -> AppResult<PersonKind> {
    PersonKind::from_code(s).ok_or_else(|| AppError::Other(format!("unknown kind '{s}' (person | place)")))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::People { action } = cmd else {
        return Ok(());
    };

    match action {
        PeopleAction::List { kind } => {
            let kind = kind.as_deref().map(parse_kind).transpose()?;
            let store = open_store(cfg, None)?;
            let list = store.list_people(kind);
            if list.is_empty() {
                info("No people or places yet.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 38),
                Column::new("Type", 6),
                Column::new("Name", 20),
                Column::new("Description", 30),
            ]);
            for p in list {
                table.add_row(vec![
                    p.id.clone(),
                    p.kind.as_str().to_string(),
                    p.name.clone(),
                    p.description.clone().unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());
        }

        PeopleAction::Add {
            name,
            kind,
            image,
            description,
        } => {
            let kind = parse_kind(kind)?;
            let mut store = open_store(cfg, None)?;
            let p = store.add_person(name, kind, image.clone(), description.clone())?;
            success(format!("Added {} '{}' ({})", p.kind.as_str(), p.name, p.id));
            info(format!("Image: {}", p.image_url));
        }

        PeopleAction::Edit {
            id,
            name,
            image,
            description,
        } => {
            let patch = PersonPatch {
                name: name.clone(),
                image_url: image.clone(),
                description: description.clone().map(Some),
            };
            let mut store = open_store(cfg, None)?;
            let p = store.update_person(id, patch)?;
            success(format!("Updated '{}'", p.name));
        }

        PeopleAction::Del { id } => {
            let mut store = open_store(cfg, None)?;
            let p = store.delete_person(id)?;
            success(format!("Deleted '{}'", p.name));
        }
    }

    Ok(())
}
