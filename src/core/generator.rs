//! Building a day from free text or from generated routine items.

use super::collaborators::{GeneratedItem, PictogramSearch, first_catalog_hit};
use super::pictograms::{add, ensure_for_label, find_by_label};
use crate::errors::AppResult;
use crate::models::{Activity, Category, IconName, Period, PictogramLibrary, PictogramSource};
use crate::utils::time::parse_time;
use chrono::NaiveTime;
use regex::Regex;
use std::sync::LazyLock;

static TIMED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<h>\d{1,2})[:.h](?P<m>\d{2})\s*[-–:]?\s*(?P<label>.+)$").unwrap()
});

/// One parsed entry before it is bound to a pictogram.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftItem {
    pub label: String,
    pub time: Option<NaiveTime>,
    pub period: Period,
}

fn section_header(line: &str) -> Option<Period> {
    let head = line.strip_suffix(':')?;
    Period::from_code(head)
}

/// Parse free text into draft activities.
///
/// Items are separated by new lines, commas or semicolons and may start with
/// a time (`08:00 Desayuno`, `8.30 - Cole`). A line such as `Tarde:` sets the
/// period for the items after it; otherwise the period follows the time, or
/// `default_period` when there is none.
pub fn parse_free_text(text: &str, default_period: Period) -> Vec<DraftItem> {
    let mut out = Vec::new();
    let mut section: Option<Period> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(p) = section_header(line) {
            section = Some(p);
            continue;
        }

        for raw in line.split([',', ';']) {
            let item = raw.trim().trim_start_matches(['-', '*', '•']).trim();
            if item.is_empty() {
                continue;
            }

            let (time, label) = match TIMED_ITEM.captures(item) {
                Some(c) => {
                    let t = parse_time(&format!("{}:{}", &c["h"], &c["m"]));
                    match t {
                        Some(t) => (Some(t), c["label"].trim().to_string()),
                        None => (None, item.to_string()),
                    }
                }
                None => (None, item.to_string()),
            };

            if label.is_empty() {
                continue;
            }

            let period = section
                .or(time.map(Period::from_time))
                .unwrap_or(default_period);

            out.push(DraftItem {
                label,
                time,
                period,
            });
        }
    }

    out
}

/// Bind drafts to pictograms (reusing label matches, creating icon
/// pictograms otherwise) and return the resulting activities.
pub fn materialize_drafts(library: &mut PictogramLibrary, drafts: &[DraftItem]) -> AppResult<Vec<Activity>> {
    let mut out = Vec::with_capacity(drafts.len());
    for d in drafts {
        let icon = IconName::from_name(&d.label);
        let p = ensure_for_label(library, &d.label, icon, Category::Other)?;
        out.push(Activity::new(&p.id, d.period).with_time(d.time));
    }
    Ok(out)
}

/// Bind generated items to pictograms. A label already in the library is
/// reused; otherwise the catalog is searched by keyword and the item's icon
/// is the fallback.
pub fn materialize_generated(
    library: &mut PictogramLibrary,
    items: &[GeneratedItem],
    search: Option<&dyn PictogramSearch>,
) -> AppResult<Vec<Activity>> {
    let mut out = Vec::with_capacity(items.len());

    for item in items {
        let label = item.label.trim();
        if label.is_empty() {
            continue;
        }

        let picto_id = match find_by_label(library, label) {
            Some(p) => p.id.clone(),
            None => {
                let catalog = search.and_then(|s| {
                    let keyword = if item.keyword.trim().is_empty() {
                        label
                    } else {
                        item.keyword.as_str()
                    };
                    first_catalog_hit(s, keyword)
                });
                let source = match catalog {
                    Some(id) => PictogramSource::Catalog(id),
                    None => PictogramSource::Icon(IconName::from_name(&item.icon)),
                };
                add(library, label, source, item.category)?.id
            }
        };

        let time = item.time.as_deref().and_then(parse_time);
        out.push(Activity::new(&picto_id, item.period).with_time(time));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::models::pictogram::default_library;

    #[test]
    fn free_text_with_times_and_sections() {
        let text = "07:30 Despertar, 8.00 - Desayuno\nTarde:\nParque; merienda\n\n21:00 Dormir";
        let drafts = parse_free_text(text, Period::Morning);

        let labels: Vec<&str> = drafts.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Despertar", "Desayuno", "Parque", "merienda", "Dormir"]);
        assert_eq!(drafts[0].period, Period::Morning);
        assert_eq!(drafts[1].time, parse_time("08:00"));
        assert_eq!(drafts[2].period, Period::Afternoon);
        // section header wins over the time
        assert_eq!(drafts[4].period, Period::Afternoon);
        assert_eq!(drafts[4].time, parse_time("21:00"));
    }

    #[test]
    fn no_time_uses_default_period() {
        let drafts = parse_free_text("- Leer\n* Baño", Period::Evening);
        assert!(drafts.iter().all(|d| d.period == Period::Evening && d.time.is_none()));
        assert_eq!(drafts[0].label, "Leer");
    }

    #[test]
    fn drafts_reuse_library_labels() {
        let mut lib = default_library();
        let before = lib.len();
        let drafts = parse_free_text("Desayuno\nNatación", Period::Morning);
        let acts = materialize_drafts(&mut lib, &drafts).unwrap();

        assert_eq!(acts[0].pictogram_id, "breakfast");
        assert_eq!(lib.len(), before + 1);
        assert_eq!(acts[1].display_label(&lib), "Natación");
    }

    struct FixedSearch(Result<Vec<u32>, ()>);

    impl PictogramSearch for FixedSearch {
        fn search(&self, _keyword: &str) -> AppResult<Vec<u32>> {
            self.0
                .clone()
                .map_err(|_| AppError::External("down".into()))
        }
    }

    fn item(label: &str, icon: &str) -> GeneratedItem {
        GeneratedItem {
            label: label.into(),
            keyword: String::new(),
            icon: icon.into(),
            category: Category::Leisure,
            period: Period::Afternoon,
            time: Some("17:00".into()),
        }
    }

    #[test]
    fn generated_items_prefer_catalog_then_icon() {
        let mut lib = PictogramLibrary::new();
        let hit = FixedSearch(Ok(vec![7, 8]));
        let acts = materialize_generated(&mut lib, &[item("Piscina", "ball")], Some(&hit)).unwrap();
        assert_eq!(lib[&acts[0].pictogram_id].source, PictogramSource::Catalog(7));

        let down = FixedSearch(Err(()));
        let acts = materialize_generated(&mut lib, &[item("Pintar", "palette")], Some(&down)).unwrap();
        let p = &lib[&acts[0].pictogram_id];
        assert_eq!(p.source, PictogramSource::Icon(IconName::Palette));
        assert_eq!(acts[0].time, parse_time("17:00"));
    }
}
