use super::{open_store, parse_day, parse_period};
use crate::cli::parser::{Commands, RewardAction};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{celebrate, info, success};
use crate::utils::date::day_key;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Reward { action } = cmd else {
        return Ok(());
    };

    match action {
        RewardAction::Set {
            date,
            period,
            label,
            emoji,
            image,
        } => {
            let d = parse_day(date)?;
            let period = parse_period(period)?;
            let mut store = open_store(cfg, Some(d))?;
            let r = store.set_reward(period, label, emoji, image.clone())?;
            success(format!(
                "Reward for {} {}: {} {}",
                r.day_key,
                period.label(&cfg.locale),
                r.label,
                r.emoji
            ));
        }

        RewardAction::Del { date, period } => {
            let d = parse_day(date)?;
            let period = parse_period(period)?;
            let mut store = open_store(cfg, Some(d))?;
            let r = store.remove_reward(period)?;
            success(format!("Removed reward '{}' from {}", r.label, day_key(d)));
        }

        RewardAction::Redeem { date, period } => {
            let d = parse_day(date)?;
            let period = parse_period(period)?;
            let mut store = open_store(cfg, Some(d))?;
            if store.redeem_reward(period)? {
                let (label, emoji) = store
                    .reward(period)
                    .map(|r| (r.label.clone(), r.emoji.clone()))
                    .unwrap_or_default();
                celebrate(format!("Enjoy your reward: {label} {emoji}"));
            } else {
                info("This reward was already redeemed.");
            }
        }
    }

    Ok(())
}
