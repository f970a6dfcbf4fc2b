//! Application state and its persistence.
//!
//! `AppStore` owns the in-memory snapshot of every collection. Each mutation
//! is a read-modify-write on that snapshot followed by a synchronous rewrite
//! of the affected document. A failed write is reported as a warning and the
//! in-memory state is kept.

pub mod kv;

use crate::core::backup::{BACKUP_APP, BACKUP_VERSION, BackupDocument, backup_created_at};
use crate::core::collaborators::{GeneratedItem, PictogramSearch};
use crate::core::completion::{Celebration, CelebrationTracker, RewardState, find_reward, reward_state};
use crate::core::pictograms::PictogramPatch;
use crate::core::people::PersonPatch;
use crate::core::schedule::{self, Direction, WeekUpdate, current_week, write_week};
use crate::core::{access, generator, people, pictograms, routines};
use crate::errors::{AppError, AppResult};
use crate::models::pictogram::default_library;
use crate::models::settings::is_valid_pin;
use crate::models::{
    Activity, ActivityPatch, AppMode, AppSettings, Category, PersonKind, PersonOrPlace, Period,
    Pictogram, PictogramLibrary, PictogramSource, Reward, RoutineTemplate, SettingsPatch,
    WeekSchedule, YearlySchedule,
};
use crate::ui::messages::warning;
use crate::utils::date::day_key;
use chrono::NaiveDate;
use kv::KeyValueStore;
use serde::de::DeserializeOwned;

pub const KEY_MODE: &str = "pictoplan.mode";
pub const KEY_SCHEDULE: &str = "pictoplan.yearly_schedule";
pub const KEY_PICTOGRAMS: &str = "pictoplan.pictograms";
pub const KEY_PEOPLE: &str = "pictoplan.people";
pub const KEY_SETTINGS: &str = "pictoplan.settings";
pub const KEY_REWARDS: &str = "pictoplan.rewards";
pub const KEY_ROUTINES: &str = "pictoplan.routines";

/// One persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Doc {
    Mode,
    Schedule,
    Pictograms,
    People,
    Settings,
    Rewards,
    Routines,
}

impl Doc {
    fn key(&self) -> &'static str {
        match self {
            Doc::Mode => KEY_MODE,
            Doc::Schedule => KEY_SCHEDULE,
            Doc::Pictograms => KEY_PICTOGRAMS,
            Doc::People => KEY_PEOPLE,
            Doc::Settings => KEY_SETTINGS,
            Doc::Rewards => KEY_REWARDS,
            Doc::Routines => KEY_ROUTINES,
        }
    }
}

/// Suffix of the key an unreadable document is copied to on load.
pub const CORRUPT_SUFFIX: &str = ".corrupt";

/// A document as found in storage.
enum Stored<T> {
    Absent,
    Unreadable(String),
    Found(T),
}

fn read_doc<T: DeserializeOwned, K: KeyValueStore + ?Sized>(kv: &K, key: &str) -> AppResult<Stored<T>> {
    let Some(raw) = kv.get(key)? else {
        return Ok(Stored::Absent);
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Ok(Stored::Found(v)),
        Err(e) => {
            warning(format!("Ignoring unreadable document '{key}': {e}"));
            Ok(Stored::Unreadable(raw))
        }
    }
}

/// PIN of a settings document that no longer parses as a whole.
fn salvage_pin(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let pin = value.get("pin")?.as_str()?;
    is_valid_pin(pin).then(|| pin.to_string())
}

pub struct AppStore<S: KeyValueStore> {
    kv: S,
    today: NaiveDate,
    selected_date: NaiveDate,
    avatar_template: String,

    mode: AppMode,
    yearly: YearlySchedule,
    pictograms: PictogramLibrary,
    people: Vec<PersonOrPlace>,
    settings: AppSettings,
    rewards: Vec<Reward>,
    routines: Vec<RoutineTemplate>,

    tracker: CelebrationTracker,
    last_warning: Option<String>,
}

impl<S: KeyValueStore> AppStore<S> {
    /// Read every document once. Missing ones get their defaults; the
    /// pictogram library and settings are written back on first run.
    pub fn load(kv: S, today: NaiveDate, avatar_template: &str) -> AppResult<Self> {
        let mut store = Self {
            kv,
            today,
            selected_date: today,
            avatar_template: avatar_template.to_string(),
            mode: AppMode::default(),
            yearly: YearlySchedule::default(),
            pictograms: PictogramLibrary::new(),
            people: Vec::new(),
            settings: AppSettings::default(),
            rewards: Vec::new(),
            routines: Vec::new(),
            tracker: CelebrationTracker::new(),
            last_warning: None,
        };
        store.reload()?;
        Ok(store)
    }

    /// Only absent documents are seeded and written. An unreadable one is
    /// copied aside and replaced by its default in memory; the stored value
    /// stays until the next change to that collection.
    fn reload(&mut self) -> AppResult<()> {
        let mode = read_doc(&self.kv, KEY_MODE)?;
        let yearly = read_doc(&self.kv, KEY_SCHEDULE)?;
        let people = read_doc(&self.kv, KEY_PEOPLE)?;
        let rewards = read_doc(&self.kv, KEY_REWARDS)?;
        let routines = read_doc(&self.kv, KEY_ROUTINES)?;
        let pictograms: Stored<PictogramLibrary> = read_doc(&self.kv, KEY_PICTOGRAMS)?;
        let settings: Stored<AppSettings> = read_doc(&self.kv, KEY_SETTINGS)?;

        self.mode = self.loaded_or_default(KEY_MODE, mode);
        self.yearly = self.loaded_or_default(KEY_SCHEDULE, yearly);
        self.people = self.loaded_or_default(KEY_PEOPLE, people);
        self.rewards = self.loaded_or_default(KEY_REWARDS, rewards);
        self.routines = self.loaded_or_default(KEY_ROUTINES, routines);

        self.tracker = CelebrationTracker::new();
        self.select_date(self.selected_date);

        match pictograms {
            Stored::Found(p) => self.pictograms = p,
            Stored::Absent => {
                self.pictograms = default_library();
                self.persist(Doc::Pictograms, "seed", "default pictogram library");
            }
            Stored::Unreadable(raw) => {
                self.set_aside(KEY_PICTOGRAMS, &raw);
                self.pictograms = default_library();
            }
        }
        match settings {
            Stored::Found(s) => self.settings = s,
            Stored::Absent => {
                self.settings = AppSettings::default();
                self.persist(Doc::Settings, "seed", "default settings");
            }
            Stored::Unreadable(raw) => {
                self.set_aside(KEY_SETTINGS, &raw);
                self.settings = AppSettings::default();
                // keep the child lock on the caregiver's PIN
                if let Some(pin) = salvage_pin(&raw) {
                    self.settings.pin = pin;
                }
            }
        }
        Ok(())
    }

    fn loaded_or_default<T: Default>(&mut self, key: &str, stored: Stored<T>) -> T {
        match stored {
            Stored::Found(v) => v,
            Stored::Absent => T::default(),
            Stored::Unreadable(raw) => {
                self.set_aside(key, &raw);
                T::default()
            }
        }
    }

    /// Copy an unreadable document to `<key>.corrupt`.
    fn set_aside(&mut self, key: &str, raw: &str) {
        let target = format!("{key}{CORRUPT_SUFFIX}");
        match self.kv.set(&target, raw) {
            Ok(()) => warning(format!("Unreadable '{key}' copied to '{target}'")),
            Err(e) => {
                let msg = format!("Could not keep a copy of unreadable '{key}': {e}");
                warning(&msg);
                self.last_warning = Some(msg);
            }
        }
    }

    fn serialize(&self, doc: Doc) -> AppResult<String> {
        let json = match doc {
            Doc::Mode => serde_json::to_string(&self.mode)?,
            Doc::Schedule => serde_json::to_string(&self.yearly)?,
            Doc::Pictograms => serde_json::to_string(&self.pictograms)?,
            Doc::People => serde_json::to_string(&self.people)?,
            Doc::Settings => serde_json::to_string(&self.settings)?,
            Doc::Rewards => serde_json::to_string(&self.rewards)?,
            Doc::Routines => serde_json::to_string(&self.routines)?,
        };
        Ok(json)
    }

    /// Rewrite one document. Failures become the last warning; memory is
    /// never rolled back.
    fn persist(&mut self, doc: Doc, operation: &str, message: &str) {
        let written = self
            .serialize(doc)
            .and_then(|json| self.kv.set(doc.key(), &json));

        match written {
            Ok(()) => {
                if let Err(e) = self.kv.audit(operation, doc.key(), message) {
                    warning(format!("Could not write audit log: {e}"));
                }
            }
            Err(e) => {
                let msg = format!("Changes to '{}' were not saved: {e}", doc.key());
                warning(&msg);
                self.last_warning = Some(msg);
            }
        }
    }

    fn ensure_adult(&self, action: &str) -> AppResult<()> {
        if self.mode.is_child() {
            return Err(AppError::ChildMode(action.to_string()));
        }
        Ok(())
    }

    // ---------------------------
    // Accessors
    // ---------------------------

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn pictograms(&self) -> &PictogramLibrary {
        &self.pictograms
    }

    pub fn people(&self) -> &[PersonOrPlace] {
        &self.people
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn routines(&self) -> &[RoutineTemplate] {
        &self.routines
    }

    pub fn yearly_schedule(&self) -> &YearlySchedule {
        &self.yearly
    }

    pub fn last_warning(&self) -> Option<&str> {
        self.last_warning.as_deref()
    }

    pub fn take_warning(&mut self) -> Option<String> {
        self.last_warning.take()
    }

    // ---------------------------
    // Selected date and week slice
    // ---------------------------

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        let key = day_key(date);
        let day = self.yearly.day(date, &key).to_vec();
        self.tracker.view_day(&key, &day, &self.rewards);
    }

    /// The week containing the selected date.
    pub fn current_week(&self) -> WeekSchedule {
        current_week(&self.yearly, self.selected_date)
    }

    pub fn visible_days(&self) -> Vec<(String, Vec<Activity>)> {
        schedule::visible_days(&self.current_week(), self.selected_date)
    }

    /// Activities of the selected day.
    pub fn day(&self) -> &[Activity] {
        self.yearly
            .day(self.selected_date, &day_key(self.selected_date))
    }

    /// Write the week of the date selected right now. Returns its key.
    pub fn update_week(&mut self, update: WeekUpdate<'_>) -> String {
        let date = self.selected_date;
        self.write_week_for(date, update)
    }

    fn write_week_for(&mut self, date: NaiveDate, update: WeekUpdate<'_>) -> String {
        let key = write_week(&mut self.yearly, date, update);
        self.persist(Doc::Schedule, "schedule", &key);
        key
    }

    /// Run an edit on a copy of the selected week and store it only when
    /// the edit succeeds.
    fn edit_selected_week<T>(
        &mut self,
        edit: impl FnOnce(&mut WeekSchedule, NaiveDate) -> AppResult<T>,
    ) -> AppResult<T> {
        let date = self.selected_date;
        let mut week = current_week(&self.yearly, date);
        let out = edit(&mut week, date)?;
        self.update_week(WeekUpdate::Replace(week));
        Ok(out)
    }

    // ---------------------------
    // Activities
    // ---------------------------

    pub fn add_activity(&mut self, activity: Activity) -> AppResult<Activity> {
        self.ensure_adult("add activity")?;
        let added = activity.clone();
        self.edit_selected_week(|week, date| {
            schedule::add_activity(week, date, activity);
            Ok(())
        })?;
        Ok(added)
    }

    /// Flip an activity and report the celebrations the change triggers.
    pub fn toggle_activity(&mut self, activity_id: &str) -> AppResult<(bool, Vec<Celebration>)> {
        let done = self.edit_selected_week(|week, date| schedule::toggle_done(week, date, activity_id))?;

        let key = day_key(self.selected_date);
        let day = self.day().to_vec();
        let fired = self.tracker.observe(&key, &day, &self.rewards);
        Ok((done, fired))
    }

    pub fn update_activity(&mut self, activity_id: &str, patch: &ActivityPatch) -> AppResult<()> {
        self.ensure_adult("edit activity")?;
        if let Some(id) = &patch.pictogram_id
            && !self.pictograms.contains_key(id)
        {
            return Err(AppError::PictogramNotFound(id.clone()));
        }
        self.edit_selected_week(|week, date| schedule::update_activity(week, date, activity_id, patch))
    }

    pub fn move_activity(&mut self, activity_id: &str, direction: Direction) -> AppResult<usize> {
        self.ensure_adult("move activity")?;
        self.edit_selected_week(|week, date| schedule::move_activity(week, date, activity_id, direction))
    }

    pub fn delete_activity(&mut self, activity_id: &str) -> AppResult<Activity> {
        self.ensure_adult("delete activity")?;
        self.edit_selected_week(|week, date| schedule::delete_activity(week, date, activity_id))
    }

    pub fn clear_day(&mut self) -> AppResult<usize> {
        self.ensure_adult("clear day")?;
        self.edit_selected_week(|week, date| Ok(schedule::clear_day(week, date)))
    }

    /// Append fresh copies of the selected day onto `target`.
    pub fn copy_day_to(&mut self, target: NaiveDate) -> AppResult<usize> {
        self.ensure_adult("copy day")?;
        let source = self.selected_date;
        if !routines::is_valid_destination(source, target, self.today) {
            return Err(AppError::InvalidDestination(format!(
                "{} (only today or later, and not the source day)",
                day_key(target)
            )));
        }

        let copied = self.day().to_vec();
        let n = copied.len();
        self.write_week_for(
            target,
            WeekUpdate::map(move |mut week| {
                routines::copy_day(&copied, week.day_mut(&day_key(target)));
                week
            }),
        );
        Ok(n)
    }

    /// Valid copy targets for the selected day among its week.
    pub fn copy_destinations(&self) -> Vec<NaiveDate> {
        routines::copy_destinations(
            self.selected_date,
            self.today,
            &crate::utils::date::week_dates(self.selected_date),
        )
    }

    // ---------------------------
    // Routines
    // ---------------------------

    /// Save the selected day (optionally one period of it) as a template.
    pub fn save_routine(
        &mut self,
        name: &str,
        description: &str,
        period: Option<Period>,
    ) -> AppResult<RoutineTemplate> {
        self.ensure_adult("save routine")?;
        let activities: Vec<Activity> = self
            .day()
            .iter()
            .filter(|a| period.is_none_or(|p| a.period == p))
            .cloned()
            .collect();
        if activities.is_empty() {
            return Err(AppError::MissingField("activities".to_string()));
        }

        let template = routines::snapshot(name, description, &activities, &self.pictograms)?;
        self.routines.push(template.clone());
        self.persist(Doc::Routines, "routine_save", &template.name);
        Ok(template)
    }

    /// Template by id or case-insensitive name.
    pub fn find_routine(&self, needle: &str) -> AppResult<&RoutineTemplate> {
        let lower = needle.trim().to_lowercase();
        self.routines
            .iter()
            .find(|t| t.id == needle || t.name.to_lowercase() == lower)
            .ok_or_else(|| AppError::RoutineNotFound(needle.to_string()))
    }

    pub fn apply_routine(&mut self, needle: &str, period: Period) -> AppResult<usize> {
        self.ensure_adult("apply routine")?;
        let template = self.find_routine(needle)?.activities.clone();
        let n = template.len();
        self.edit_selected_week(|week, date| {
            routines::apply_template(week.day_mut(&day_key(date)), &template, period);
            Ok(())
        })?;
        Ok(n)
    }

    pub fn delete_routine(&mut self, needle: &str) -> AppResult<RoutineTemplate> {
        self.ensure_adult("delete routine")?;
        let id = self.find_routine(needle)?.id.clone();
        let idx = self
            .routines
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| AppError::RoutineNotFound(needle.to_string()))?;
        let removed = self.routines.remove(idx);
        self.persist(Doc::Routines, "routine_del", &removed.name);
        Ok(removed)
    }

    pub fn export_routine(&self, needle: &str) -> AppResult<String> {
        routines::export_document(self.find_routine(needle)?)
    }

    /// Import a routine document. With `with_pictograms`, pictograms it
    /// carries that are missing locally are added to the library.
    pub fn import_routine(&mut self, raw: &str, with_pictograms: bool) -> AppResult<RoutineTemplate> {
        self.ensure_adult("import routine")?;
        let doc = routines::import_document(raw)?;
        let template = routines::template_from_document(doc);

        if with_pictograms {
            let mut added = 0;
            for p in &template.pictograms {
                if !self.pictograms.contains_key(&p.id) {
                    self.pictograms.insert(p.id.clone(), p.clone());
                    added += 1;
                }
            }
            if added > 0 {
                self.persist(Doc::Pictograms, "picto_import", &format!("{added} from routine"));
            }
        }

        self.routines.push(template.clone());
        self.persist(Doc::Routines, "routine_import", &template.name);
        Ok(template)
    }

    pub fn missing_pictograms(&self, template: &RoutineTemplate) -> Vec<String> {
        routines::missing_pictograms(template, &self.pictograms)
    }

    // ---------------------------
    // Rewards
    // ---------------------------

    fn reward_target(&self, period: Period) -> String {
        format!("{} {}", day_key(self.selected_date), period.as_str())
    }

    /// Define (or replace) the reward of a period of the selected day.
    pub fn set_reward(
        &mut self,
        period: Period,
        label: &str,
        emoji: &str,
        image_url: Option<String>,
    ) -> AppResult<Reward> {
        self.ensure_adult("set reward")?;
        if label.trim().is_empty() {
            return Err(AppError::MissingField("label".to_string()));
        }

        let key = day_key(self.selected_date);
        self.rewards.retain(|r| !r.matches(&key, period));
        let reward = Reward {
            day_key: key,
            period,
            label: label.trim().to_string(),
            emoji: emoji.trim().to_string(),
            image_url,
            is_redeemed: false,
        };
        self.rewards.push(reward.clone());
        let target = self.reward_target(period);
        self.persist(Doc::Rewards, "reward_set", &target);
        Ok(reward)
    }

    pub fn remove_reward(&mut self, period: Period) -> AppResult<Reward> {
        self.ensure_adult("remove reward")?;
        let key = day_key(self.selected_date);
        let idx = self
            .rewards
            .iter()
            .position(|r| r.matches(&key, period))
            .ok_or_else(|| AppError::RewardNotFound(self.reward_target(period)))?;
        let removed = self.rewards.remove(idx);
        let target = self.reward_target(period);
        self.persist(Doc::Rewards, "reward_del", &target);
        Ok(removed)
    }

    pub fn reward(&self, period: Period) -> Option<&Reward> {
        find_reward(&self.rewards, &day_key(self.selected_date), period)
    }

    pub fn reward_state(&self, period: Period) -> Option<RewardState> {
        reward_state(self.day(), period, self.reward(period))
    }

    /// Redeem an unlocked reward. `Ok(false)` when it was already redeemed.
    pub fn redeem_reward(&mut self, period: Period) -> AppResult<bool> {
        let target = self.reward_target(period);
        match self.reward_state(period) {
            None => return Err(AppError::RewardNotFound(target)),
            Some(RewardState::Locked) => return Err(AppError::RewardLocked(target)),
            Some(RewardState::Redeemed) => return Ok(false),
            Some(RewardState::Unlocked) => {}
        }

        let key = day_key(self.selected_date);
        if let Some(r) = self.rewards.iter_mut().find(|r| r.matches(&key, period)) {
            r.is_redeemed = true;
        }
        self.persist(Doc::Rewards, "reward_redeem", &target);
        Ok(true)
    }

    // ---------------------------
    // Pictograms
    // ---------------------------

    pub fn add_pictogram(&mut self, label: &str, source: PictogramSource, category: Category) -> AppResult<Pictogram> {
        self.ensure_adult("add pictogram")?;
        let p = pictograms::add(&mut self.pictograms, label, source, category)?;
        self.persist(Doc::Pictograms, "picto_add", &p.label);
        Ok(p)
    }

    pub fn import_catalog_pictogram(&mut self, catalog_id: u32, label: &str, category: Category) -> AppResult<Pictogram> {
        self.ensure_adult("import pictogram")?;
        let p = pictograms::import_catalog(&mut self.pictograms, catalog_id, label, category)?;
        self.persist(Doc::Pictograms, "picto_import", &format!("{} ({catalog_id})", p.label));
        Ok(p)
    }

    pub fn update_pictogram(&mut self, id: &str, patch: PictogramPatch) -> AppResult<Pictogram> {
        self.ensure_adult("edit pictogram")?;
        let p = pictograms::update(&mut self.pictograms, id, patch)?;
        self.persist(Doc::Pictograms, "picto_edit", &p.id);
        Ok(p)
    }

    pub fn pictogram_or_placeholder(&self, id: &str) -> Pictogram {
        pictograms::get_or_placeholder(&self.pictograms, id)
    }

    // ---------------------------
    // People & places
    // ---------------------------

    pub fn add_person(
        &mut self,
        name: &str,
        kind: PersonKind,
        image_url: Option<String>,
        description: Option<String>,
    ) -> AppResult<PersonOrPlace> {
        self.ensure_adult("add person")?;
        let p = people::create(name, kind, image_url, description, &self.avatar_template)?;
        self.people.push(p.clone());
        self.persist(Doc::People, "people_add", &p.name);
        Ok(p)
    }

    pub fn update_person(&mut self, id: &str, patch: PersonPatch) -> AppResult<PersonOrPlace> {
        self.ensure_adult("edit person")?;
        let p = people::update(&mut self.people, id, patch)?;
        self.persist(Doc::People, "people_edit", &p.name);
        Ok(p)
    }

    pub fn delete_person(&mut self, id: &str) -> AppResult<PersonOrPlace> {
        self.ensure_adult("delete person")?;
        let p = people::delete(&mut self.people, id)?;
        self.persist(Doc::People, "people_del", &p.name);
        Ok(p)
    }

    pub fn list_people(&self, kind: Option<PersonKind>) -> Vec<&PersonOrPlace> {
        people::filter(&self.people, kind)
    }

    // ---------------------------
    // Settings, PIN and mode
    // ---------------------------

    pub fn update_settings(&mut self, patch: &SettingsPatch) -> AppResult<()> {
        self.ensure_adult("change settings")?;
        if patch.is_empty() {
            return Ok(());
        }
        patch.apply(&mut self.settings);
        self.persist(Doc::Settings, "settings", "update");
        Ok(())
    }

    pub fn set_pin(&mut self, pin: &str) -> AppResult<()> {
        self.ensure_adult("change PIN")?;
        access::set_pin(&mut self.settings, pin)?;
        self.persist(Doc::Settings, "pin", "changed");
        Ok(())
    }

    pub fn set_security_question(&mut self, question: &str, answer: &str) -> AppResult<()> {
        self.ensure_adult("change security question")?;
        access::set_security_question(&mut self.settings, question, answer)?;
        self.persist(Doc::Settings, "pin", "security question set");
        Ok(())
    }

    pub fn recover_pin(&self, answer: &str) -> AppResult<String> {
        access::recover_pin(&self.settings, answer)
    }

    pub fn enter_child_mode(&mut self) {
        if self.mode.is_child() {
            return;
        }
        self.mode = AppMode::Child;
        self.persist(Doc::Mode, "mode", AppMode::Child.as_str());
    }

    pub fn enter_adult_mode(&mut self, pin: &str) -> AppResult<()> {
        if !self.mode.is_child() {
            return Ok(());
        }
        access::verify_pin(&self.settings, pin)?;
        self.mode = AppMode::Adult;
        self.persist(Doc::Mode, "mode", AppMode::Adult.as_str());
        Ok(())
    }

    // ---------------------------
    // Generators
    // ---------------------------

    fn append_generated(&mut self, library: PictogramLibrary, mut activities: Vec<Activity>, source: &str) -> Vec<Activity> {
        let added = activities.clone();
        if library.len() != self.pictograms.len() {
            self.pictograms = library;
            self.persist(Doc::Pictograms, "picto_add", source);
        }
        let date = self.selected_date;
        self.update_week(WeekUpdate::map(move |mut week| {
            let day = week.day_mut(&day_key(date));
            day.append(&mut activities);
            routines::sort_by_time(day);
            week
        }));
        added
    }

    /// Build activities for the selected day from free text.
    pub fn create_from_text(&mut self, text: &str, default_period: Period) -> AppResult<Vec<Activity>> {
        self.ensure_adult("create from text")?;
        let drafts = generator::parse_free_text(text, default_period);
        if drafts.is_empty() {
            return Err(AppError::MissingField("activities".to_string()));
        }

        let mut library = self.pictograms.clone();
        let activities = generator::materialize_drafts(&mut library, &drafts)?;
        Ok(self.append_generated(library, activities, "simplified creator"))
    }

    /// Add generated routine items to the selected day.
    pub fn apply_generated(
        &mut self,
        items: &[GeneratedItem],
        search: Option<&dyn PictogramSearch>,
    ) -> AppResult<Vec<Activity>> {
        self.ensure_adult("generate routine")?;
        let mut library = self.pictograms.clone();
        let activities = generator::materialize_generated(&mut library, items, search)?;
        if activities.is_empty() {
            return Ok(activities);
        }
        Ok(self.append_generated(library, activities, "generated routine"))
    }

    // ---------------------------
    // Backup
    // ---------------------------

    pub fn backup_document(&self) -> BackupDocument {
        BackupDocument {
            app: BACKUP_APP.to_string(),
            version: BACKUP_VERSION,
            created_at: backup_created_at(),
            mode: self.mode,
            yearly_schedule: self.yearly.clone(),
            pictograms: self.pictograms.clone(),
            people: self.people.clone(),
            settings: self.settings.clone(),
            rewards: self.rewards.clone(),
            routines: self.routines.clone(),
        }
    }

    /// Overwrite every collection with the backup and reload from storage.
    /// Either every document is written or none is.
    pub fn restore(&mut self, doc: BackupDocument) -> AppResult<()> {
        self.ensure_adult("restore backup")?;

        let entries = vec![
            (KEY_MODE.to_string(), serde_json::to_string(&doc.mode)?),
            (KEY_SCHEDULE.to_string(), serde_json::to_string(&doc.yearly_schedule)?),
            (KEY_PICTOGRAMS.to_string(), serde_json::to_string(&doc.pictograms)?),
            (KEY_PEOPLE.to_string(), serde_json::to_string(&doc.people)?),
            (KEY_SETTINGS.to_string(), serde_json::to_string(&doc.settings)?),
            (KEY_REWARDS.to_string(), serde_json::to_string(&doc.rewards)?),
            (KEY_ROUTINES.to_string(), serde_json::to_string(&doc.routines)?),
        ];
        self.kv.set_all(&entries)?;
        if let Err(e) = self.kv.audit("restore", "*", &doc.created_at) {
            warning(format!("Could not write audit log: {e}"));
        }
        self.reload()
    }
}
