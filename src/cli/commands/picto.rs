use super::{open_store, parse_category};
use crate::cli::parser::{Commands, PictoAction};
use crate::config::Config;
use crate::core::pictograms::{PictogramPatch, search};
use crate::errors::{AppError, AppResult};
use crate::models::{IconName, PictogramSource};
use crate::ui::messages::{info, success, warning};
use crate::utils::table::{Column, Table};

/// Image source from the mutually exclusive `--icon`, `--catalog`, `--image` flags.
fn source_from_flags(
    icon: &Option<String>,
    catalog: &Option<u32>,
    image: &Option<String>,
) -> Option<PictogramSource> {
    if let Some(id) = catalog {
        return Some(PictogramSource::Catalog(*id));
    }
    if let Some(src) = image {
        return Some(PictogramSource::Custom(src.clone()));
    }
    icon.as_ref().map(|name| {
        let icon = IconName::from_name(name);
        if icon.is_fallback() {
            warning(format!("Unknown icon '{name}', using the fallback icon"));
        }
        PictogramSource::Icon(icon)
    })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Picto { action } = cmd else {
        return Ok(());
    };

    match action {
        PictoAction::List {
            search: query,
            category,
        } => {
            let store = open_store(cfg, None)?;
            let category = match category {
                Some(_) => Some(parse_category(category.as_ref())?),
                None => None,
            };
            let hits = search(store.pictograms(), query.as_deref().unwrap_or(""), category);
            if hits.is_empty() {
                info("No pictograms found.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 38),
                Column::new("", 2),
                Column::new("Label", 20),
                Column::new("Category", 10),
                Column::new("Image", 40),
            ]);
            for p in hits {
                table.add_row(vec![
                    p.id.clone(),
                    p.glyph().to_string(),
                    p.label.clone(),
                    p.category.as_str().to_string(),
                    p.image_url(&cfg.catalog_image_url).unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());
        }

        PictoAction::Add {
            label,
            icon,
            catalog,
            image,
            category,
        } => {
            let source = source_from_flags(icon, catalog, image)
                .unwrap_or(PictogramSource::Icon(IconName::from_name(label)));
            let category = parse_category(category.as_ref())?;
            let mut store = open_store(cfg, None)?;
            let p = store.add_pictogram(label, source, category)?;
            success(format!("Added pictogram '{}' ({})", p.label, p.id));
        }

        PictoAction::Import {
            catalog_id,
            label,
            category,
        } => {
            let category = parse_category(category.as_ref())?;
            let mut store = open_store(cfg, None)?;
            let p = store.import_catalog_pictogram(*catalog_id, label, category)?;
            success(format!("Pictogram '{}' ({}) is in the library", p.label, p.id));
        }

        PictoAction::Edit {
            id,
            label,
            icon,
            catalog,
            image,
        } => {
            let patch = PictogramPatch {
                label: label.clone(),
                source: source_from_flags(icon, catalog, image),
            };
            if patch.label.is_none() && patch.source.is_none() {
                return Err(AppError::MissingField("--label or an image flag".to_string()));
            }
            let mut store = open_store(cfg, None)?;
            let p = store.update_pictogram(id, patch)?;
            success(format!("Updated pictogram '{}'", p.label));
        }
    }

    Ok(())
}
