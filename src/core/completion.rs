//! Completion progress and reward gating per (day, period).
//!
//! Reward state is derived from the activities, never stored, except for the
//! one-way `is_redeemed` flag on the reward itself. Celebrations are
//! edge-triggered and remembered only for the day being viewed.

use crate::models::{Activity, Period, Reward};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardState {
    Locked,
    Unlocked,
    Redeemed,
}

impl RewardState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewardState::Locked => "locked",
            RewardState::Unlocked => "unlocked",
            RewardState::Redeemed => "redeemed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn of<'a>(activities: impl IntoIterator<Item = &'a Activity>) -> Self {
        let mut p = Progress { done: 0, total: 0 };
        for a in activities {
            p.total += 1;
            if a.is_done {
                p.done += 1;
            }
        }
        p
    }

    /// Non-empty and every activity done.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done == self.total
    }

    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            0
        } else {
            ((self.done * 100) / self.total) as u8
        }
    }
}

pub fn period_progress(day: &[Activity], period: Period) -> Progress {
    Progress::of(day.iter().filter(|a| a.period == period))
}

pub fn day_progress(day: &[Activity]) -> Progress {
    Progress::of(day.iter())
}

/// `None` when no reward is defined for the pair.
pub fn reward_state(day: &[Activity], period: Period, reward: Option<&Reward>) -> Option<RewardState> {
    let reward = reward?;
    if reward.is_redeemed {
        return Some(RewardState::Redeemed);
    }
    if period_progress(day, period).is_complete() {
        Some(RewardState::Unlocked)
    } else {
        Some(RewardState::Locked)
    }
}

pub fn find_reward<'a>(rewards: &'a [Reward], day_key: &str, period: Period) -> Option<&'a Reward> {
    rewards.iter().find(|r| r.matches(day_key, period))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Celebration {
    /// Every activity of the period is done and a reward is waiting.
    RewardUnlocked { period: Period, label: String, emoji: String },
    /// Every activity of the day is done.
    DayComplete,
}

/// Remembers what was already celebrated for the day being viewed.
#[derive(Debug, Default, Clone)]
pub struct CelebrationTracker {
    day_key: Option<String>,
    celebrated: HashSet<Period>,
    day_celebrated: bool,
}

impl CelebrationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start viewing a day. Thresholds already met count as celebrated, so
    /// only later crossings fire.
    pub fn view_day(&mut self, day_key: &str, day: &[Activity], rewards: &[Reward]) {
        if self.day_key.as_deref() == Some(day_key) {
            return;
        }

        self.day_key = Some(day_key.to_string());
        self.celebrated.clear();
        self.day_celebrated = day_progress(day).is_complete();

        for period in Period::ALL {
            if find_reward(rewards, day_key, period).is_some()
                && period_progress(day, period).is_complete()
            {
                self.celebrated.insert(period);
            }
        }
    }

    /// Check the day after a change and return what should be celebrated now.
    pub fn observe(&mut self, day_key: &str, day: &[Activity], rewards: &[Reward]) -> Vec<Celebration> {
        if self.day_key.as_deref() != Some(day_key) {
            self.day_key = Some(day_key.to_string());
            self.celebrated.clear();
            self.day_celebrated = false;
        }

        let mut out = Vec::new();

        if !self.day_celebrated && day_progress(day).is_complete() {
            self.day_celebrated = true;
            out.push(Celebration::DayComplete);
        }

        for period in Period::ALL {
            if self.celebrated.contains(&period) {
                continue;
            }
            let Some(reward) = find_reward(rewards, day_key, period) else {
                continue;
            };
            if !period_progress(day, period).is_complete() {
                continue;
            }

            self.celebrated.insert(period);
            // once the whole day was celebrated, period celebrations stay quiet
            if !self.day_celebrated {
                out.push(Celebration::RewardUnlocked {
                    period,
                    label: reward.label.clone(),
                    emoji: reward.emoji.clone(),
                });
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn act(period: Period, done: bool) -> Activity {
        let mut a = Activity::new("x", period);
        a.is_done = done;
        a
    }

    fn reward(period: Period) -> Reward {
        Reward {
            day_key: "2025-03-12".into(),
            period,
            label: "Tablet".into(),
            emoji: "📱".into(),
            image_url: None,
            is_redeemed: false,
        }
    }

    const DAY: &str = "2025-03-12";

    #[test]
    fn empty_period_is_locked() {
        let r = reward(Period::Morning);
        assert_eq!(reward_state(&[], Period::Morning, Some(&r)), Some(RewardState::Locked));
        assert_eq!(reward_state(&[], Period::Morning, None), None);
    }

    #[test]
    fn states_follow_completion() {
        let mut r = reward(Period::Morning);
        let mut day = vec![act(Period::Morning, true), act(Period::Morning, false)];
        assert_eq!(reward_state(&day, Period::Morning, Some(&r)), Some(RewardState::Locked));

        day[1].is_done = true;
        assert_eq!(reward_state(&day, Period::Morning, Some(&r)), Some(RewardState::Unlocked));

        r.is_redeemed = true;
        assert_eq!(reward_state(&day, Period::Morning, Some(&r)), Some(RewardState::Redeemed));
    }

    #[test]
    fn unlock_fires_once_per_crossing() {
        let rewards = vec![reward(Period::Morning)];
        let mut day = vec![
            act(Period::Morning, false),
            act(Period::Morning, false),
            act(Period::Evening, false),
        ];
        let mut tracker = CelebrationTracker::new();
        tracker.view_day(DAY, &day, &rewards);

        day[0].is_done = true;
        assert!(tracker.observe(DAY, &day, &rewards).is_empty());

        day[1].is_done = true;
        let fired = tracker.observe(DAY, &day, &rewards);
        assert_eq!(fired.len(), 1);
        assert!(matches!(fired[0], Celebration::RewardUnlocked { period: Period::Morning, .. }));

        // unrelated change, still complete: no re-fire
        day[2].is_done = false;
        assert!(tracker.observe(DAY, &day, &rewards).is_empty());
    }

    #[test]
    fn day_celebration_suppresses_period_ones() {
        let rewards = vec![reward(Period::Evening)];
        let mut day = vec![act(Period::Morning, true), act(Period::Evening, false)];
        let mut tracker = CelebrationTracker::new();
        tracker.view_day(DAY, &day, &rewards);

        day[1].is_done = true;
        assert_eq!(tracker.observe(DAY, &day, &rewards), vec![Celebration::DayComplete]);
        assert!(tracker.observe(DAY, &day, &rewards).is_empty());
    }

    #[test]
    fn changing_day_resets_memory() {
        let rewards = vec![reward(Period::Morning)];
        let mut day = vec![act(Period::Morning, true), act(Period::Evening, false)];
        let mut tracker = CelebrationTracker::new();

        // already complete when first viewed: nothing fires
        tracker.view_day(DAY, &day, &rewards);
        assert!(tracker.observe(DAY, &day, &rewards).is_empty());

        tracker.view_day("2025-03-13", &[], &rewards);

        day[0].is_done = false;
        tracker.view_day(DAY, &day, &rewards);
        day[0].is_done = true;
        assert_eq!(tracker.observe(DAY, &day, &rewards).len(), 1);
    }
}
