use super::open_store;
use crate::cli::parser::{Commands, PinAction};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::SettingsPatch;
use crate::ui::messages::{header, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Settings {
            high_contrast,
            show_text,
            voice,
            auto_speak,
            voice_language,
        } => {
            let mut store = open_store(cfg, None)?;
            let patch = SettingsPatch {
                high_contrast: *high_contrast,
                show_text: *show_text,
                voice_enabled: *voice,
                auto_speak: *auto_speak,
                voice_language: voice_language.clone(),
            };

            if !patch.is_empty() {
                store.update_settings(&patch)?;
                success("Settings updated.");
            }

            let s = store.settings();
            header("Settings");
            println!("high contrast  : {}", s.high_contrast);
            println!("show text      : {}", s.show_text);
            println!("voice          : {}", s.voice_enabled);
            println!("auto speak     : {}", s.auto_speak);
            println!("voice language : {}", s.voice_language);
            println!(
                "recovery       : {}",
                s.security_question.as_deref().unwrap_or("--")
            );
        }

        Commands::Pin { action } => match action {
            PinAction::Set { pin } => {
                let mut store = open_store(cfg, None)?;
                store.set_pin(pin)?;
                success("PIN changed.");
            }
            PinAction::Question { question, answer } => {
                let mut store = open_store(cfg, None)?;
                store.set_security_question(question, answer)?;
                success("Security question saved.");
            }
            PinAction::Recover { answer } => {
                let store = open_store(cfg, None)?;
                let pin = store.recover_pin(answer)?;
                success(format!("Your PIN is {pin}"));
            }
        },

        _ => {}
    }

    Ok(())
}
