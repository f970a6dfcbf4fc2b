//! Routine templates: save a day's activities, apply them elsewhere, copy a
//! whole day, and move templates in and out as portable JSON documents.

use crate::errors::{AppError, AppResult};
use crate::models::{
    Activity, Period, PictogramLibrary, RoutineDocument, RoutineTemplate, TemplateActivity,
};
use crate::utils::time::{parse_time, sort_key};
use chrono::{Local, NaiveDate};
use serde_json::Value;

/// Snapshot `activities` as a new template. Pictograms the activities need
/// and that exist locally are copied into the template.
pub fn snapshot(
    name: &str,
    description: &str,
    activities: &[Activity],
    library: &PictogramLibrary,
) -> AppResult<RoutineTemplate> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::MissingField("name".to_string()));
    }

    let entries: Vec<TemplateActivity> = activities.iter().map(TemplateActivity::from).collect();

    Ok(RoutineTemplate {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: description.trim().to_string(),
        pictograms: required_pictograms(&entries, library),
        activities: entries,
        created_at: Local::now().to_rfc3339(),
    })
}

fn required_pictograms(
    entries: &[TemplateActivity],
    library: &PictogramLibrary,
) -> Vec<crate::models::Pictogram> {
    let mut seen: Vec<&str> = Vec::new();
    let mut out = Vec::new();
    for e in entries {
        if seen.contains(&e.pictogram_id.as_str()) {
            continue;
        }
        seen.push(&e.pictogram_id);
        if let Some(p) = library.get(&e.pictogram_id) {
            out.push(p.clone());
        }
    }
    out
}

/// Stable sort by time of day; activities without time go last, in their
/// original relative order.
pub fn sort_by_time(activities: &mut [Activity]) {
    activities.sort_by_key(|a| sort_key(a.time));
}

/// Append fresh copies of the template to `day` (period stamped to `period`)
/// and re-sort the whole day by time.
pub fn apply_template(day: &mut Vec<Activity>, template: &[TemplateActivity], period: Period) {
    day.extend(template.iter().map(|t| t.instantiate(period)));
    sort_by_time(day);
}

/// Append fresh, not-done copies of `source` after the existing `target` activities.
pub fn copy_day(source: &[Activity], target: &mut Vec<Activity>) {
    target.extend(source.iter().map(|a| a.fresh_copy(None)));
}

/// Valid destinations for copying `source`: today or later, never the source.
pub fn copy_destinations(source: NaiveDate, today: NaiveDate, candidates: &[NaiveDate]) -> Vec<NaiveDate> {
    candidates
        .iter()
        .copied()
        .filter(|d| *d >= today && *d != source)
        .collect()
}

pub fn is_valid_destination(source: NaiveDate, target: NaiveDate, today: NaiveDate) -> bool {
    target >= today && target != source
}

pub fn export_document(template: &RoutineTemplate) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(&RoutineDocument::from(template))?)
}

/// Parse a routine document. Only the structure is checked: there must be an
/// `activities` sequence. Pictogram ids are not resolved against any library.
pub fn import_document(raw: &str) -> AppResult<RoutineDocument> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| AppError::InvalidRoutine(format!("not valid JSON: {e}")))?;

    let obj = value
        .as_object()
        .ok_or_else(|| AppError::InvalidRoutine("expected a JSON object".to_string()))?;

    match obj.get("activities") {
        Some(Value::Array(items)) => check_times(items)?,
        Some(_) => {
            return Err(AppError::InvalidRoutine(
                "'activities' must be a list".to_string(),
            ));
        }
        None => {
            return Err(AppError::InvalidRoutine(
                "missing 'activities' list".to_string(),
            ));
        }
    }

    let mut doc: RoutineDocument =
        serde_json::from_value(value).map_err(|e| AppError::InvalidRoutine(e.to_string()))?;

    if doc.name.trim().is_empty() {
        doc.name = "Rutina importada".to_string();
    }
    Ok(doc)
}

/// Every `time` must be `HH:MM` or null; anything else would be dropped on
/// the way in.
fn check_times(items: &[Value]) -> AppResult<()> {
    for (i, item) in items.iter().enumerate() {
        match item.get("time") {
            None | Some(Value::Null) => {}
            Some(Value::String(t)) if parse_time(t).is_some() => {}
            Some(other) => {
                return Err(AppError::InvalidRoutine(format!(
                    "activity {} has an unreadable time {other} (expected HH:MM)",
                    i + 1
                )));
            }
        }
    }
    Ok(())
}

/// Turn an imported document into a library entry with a new identity.
pub fn template_from_document(doc: RoutineDocument) -> RoutineTemplate {
    RoutineTemplate {
        id: uuid::Uuid::new_v4().to_string(),
        name: doc.name,
        description: doc.description,
        activities: doc.activities,
        pictograms: doc.pictograms,
        created_at: Local::now().to_rfc3339(),
    }
}

/// Ids referenced by the template that the local library lacks.
pub fn missing_pictograms(template: &RoutineTemplate, library: &PictogramLibrary) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for a in &template.activities {
        if !library.contains_key(&a.pictogram_id) && !out.contains(&a.pictogram_id) {
            out.push(a.pictogram_id.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pictogram::default_library;
    use crate::utils::time::parse_time;
    use std::collections::HashSet;

    fn timed(picto: &str, time: Option<&str>, period: Period) -> Activity {
        Activity::new(picto, period).with_time(time.and_then(parse_time))
    }

    #[test]
    fn apply_sorts_and_renews_identities() {
        let lib = default_library();
        let source = vec![
            timed("dinner", Some("20:00"), Period::Evening),
            timed("read", None, Period::Evening),
            timed("bath", Some("19:00"), Period::Evening),
        ];
        let template = snapshot("Noche", "", &source, &lib).unwrap();

        let mut day = vec![timed("lunch", Some("13:00"), Period::Afternoon)];
        day[0].is_done = true;
        apply_template(&mut day, &template.activities, Period::Morning);

        let times: Vec<String> = day.iter().map(Activity::time_str).collect();
        assert_eq!(times, vec!["13:00", "19:00", "20:00", "--:--"]);

        let ids: HashSet<&str> = day.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), 4);
        for s in &source {
            assert!(!ids.contains(s.id.as_str()));
        }

        let applied: Vec<&Activity> = day.iter().filter(|a| a.pictogram_id != "lunch").collect();
        assert!(applied.iter().all(|a| !a.is_done && a.period == Period::Morning));
        // existing activity keeps its state
        assert!(day[0].is_done);
    }

    #[test]
    fn untimed_keep_relative_order() {
        let mut day = vec![
            timed("a", None, Period::Morning),
            timed("b", Some("09:00"), Period::Morning),
            timed("c", None, Period::Morning),
        ];
        sort_by_time(&mut day);
        let order: Vec<&str> = day.iter().map(|a| a.pictogram_id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn copy_appends_fresh_activities() {
        let mut source = vec![timed("bath", None, Period::Evening), timed("sleep", None, Period::Evening)];
        source[0].is_done = true;
        let mut target = vec![timed("school", Some("09:00"), Period::Morning)];
        target[0].is_done = true;
        let prior = target.clone();

        copy_day(&source, &mut target);

        assert_eq!(target.len(), prior.len() + source.len());
        assert_eq!(target[0], prior[0]);
        assert!(target[1..].iter().all(|a| !a.is_done));
        assert_ne!(target[1].id, source[0].id);
    }

    #[test]
    fn destinations_exclude_past_and_source() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        let week: Vec<NaiveDate> = (10..=16).map(d).collect();
        let dest = copy_destinations(d(13), d(12), &week);
        assert_eq!(dest, vec![d(12), d(14), d(15), d(16)]);
        assert!(!is_valid_destination(d(13), d(11), d(12)));
    }

    #[test]
    fn export_import_preserves_sequence() {
        let lib = default_library();
        let source = vec![
            timed("breakfast", Some("08:00"), Period::Morning),
            timed("school", Some("09:00"), Period::Morning).with_label(Some("Cole".into())),
        ];
        let template = snapshot("Mañanas", "Días de cole", &source, &lib).unwrap();
        let raw = export_document(&template).unwrap();

        let doc = import_document(&raw).unwrap();
        assert_eq!(doc.name, "Mañanas");
        assert_eq!(doc.activities, template.activities);
        assert_eq!(doc.pictograms.len(), 2);

        let imported = template_from_document(doc);
        assert_ne!(imported.id, template.id);
    }

    #[test]
    fn import_checks_structure_only() {
        assert!(matches!(
            import_document("{\"name\":\"x\"}"),
            Err(AppError::InvalidRoutine(_))
        ));
        assert!(matches!(
            import_document("{\"name\":\"x\",\"activities\":{}}"),
            Err(AppError::InvalidRoutine(_))
        ));
        assert!(import_document("not json").is_err());

        let doc = import_document(
            r#"{"name":"x","activities":[{"pictogramId":"nowhere","period":"evening","time":"19:30"}]}"#,
        )
        .unwrap();
        let template = template_from_document(doc);
        assert_eq!(
            missing_pictograms(&template, &default_library()),
            vec!["nowhere".to_string()]
        );
    }

    #[test]
    fn import_rejects_unreadable_times() {
        let err = import_document(
            r#"{"name":"x","activities":[{"pictogramId":"dinner","period":"evening","time":"8pm"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidRoutine(ref m) if m.contains("activity 1")));

        assert!(matches!(
            import_document(r#"{"name":"x","activities":[{"pictogramId":"dinner","period":"evening","time":830}]}"#),
            Err(AppError::InvalidRoutine(_))
        ));

        let doc = import_document(
            r#"{"name":"x","activities":[{"pictogramId":"dinner","period":"evening","time":null}]}"#,
        )
        .unwrap();
        assert_eq!(doc.activities[0].time, None);
    }
}
