//! Pictogram library maintenance. Pictograms are never removed: activities
//! may still point at them.

use crate::errors::{AppError, AppResult};
use crate::models::{Category, IconName, Pictogram, PictogramLibrary, PictogramSource};

/// Edit of the mutable parts of a pictogram (label and image).
#[derive(Debug, Clone, Default)]
pub struct PictogramPatch {
    pub label: Option<String>,
    pub source: Option<PictogramSource>,
}

fn require_label(label: &str) -> AppResult<()> {
    if label.trim().is_empty() {
        return Err(AppError::MissingField("label".to_string()));
    }
    Ok(())
}

pub fn add(library: &mut PictogramLibrary, label: &str, source: PictogramSource, category: Category) -> AppResult<Pictogram> {
    require_label(label)?;
    let p = Pictogram::new(label, source, category);
    library.insert(p.id.clone(), p.clone());
    Ok(p)
}

/// Import a catalog image. Importing the same catalog id twice returns the
/// existing entry.
pub fn import_catalog(library: &mut PictogramLibrary, catalog_id: u32, label: &str, category: Category) -> AppResult<Pictogram> {
    if let Some(existing) = library
        .values()
        .find(|p| p.source == PictogramSource::Catalog(catalog_id))
    {
        return Ok(existing.clone());
    }
    add(library, label, PictogramSource::Catalog(catalog_id), category)
}

pub fn update(library: &mut PictogramLibrary, id: &str, patch: PictogramPatch) -> AppResult<Pictogram> {
    let p = library
        .get_mut(id)
        .ok_or_else(|| AppError::PictogramNotFound(id.to_string()))?;

    if let Some(label) = patch.label {
        require_label(&label)?;
        p.label = label.trim().to_string();
    }
    if let Some(source) = patch.source {
        p.source = source;
    }
    Ok(p.clone())
}

/// The pictogram, or the placeholder when the id is unknown.
pub fn get_or_placeholder(library: &PictogramLibrary, id: &str) -> Pictogram {
    library.get(id).cloned().unwrap_or_else(Pictogram::placeholder)
}

/// Case-insensitive exact label match.
pub fn find_by_label<'a>(library: &'a PictogramLibrary, label: &str) -> Option<&'a Pictogram> {
    let needle = label.trim().to_lowercase();
    library.values().find(|p| p.label.to_lowercase() == needle)
}

/// Label substring search, optionally restricted to a category.
pub fn search<'a>(library: &'a PictogramLibrary, query: &str, category: Option<Category>) -> Vec<&'a Pictogram> {
    let needle = query.trim().to_lowercase();
    library
        .values()
        .filter(|p| category.is_none_or(|c| p.category == c))
        .filter(|p| needle.is_empty() || p.label.to_lowercase().contains(&needle))
        .collect()
}

/// Reuse a pictogram with this label, or create an icon pictogram for it.
pub fn ensure_for_label(library: &mut PictogramLibrary, label: &str, icon: IconName, category: Category) -> AppResult<Pictogram> {
    if let Some(p) = find_by_label(library, label) {
        return Ok(p.clone());
    }
    add(library, label, PictogramSource::Icon(icon), category)
}
