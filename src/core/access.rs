//! PIN handling for leaving child mode.

use crate::errors::{AppError, AppResult};
use crate::models::AppSettings;
use crate::models::settings::is_valid_pin;

pub fn set_pin(settings: &mut AppSettings, new_pin: &str) -> AppResult<()> {
    let pin = new_pin.trim();
    if !is_valid_pin(pin) {
        return Err(AppError::InvalidPin("the PIN must be exactly 4 digits".to_string()));
    }
    settings.pin = pin.to_string();
    Ok(())
}

pub fn verify_pin(settings: &AppSettings, pin: &str) -> AppResult<()> {
    if !is_valid_pin(pin.trim()) {
        return Err(AppError::InvalidPin("the PIN must be exactly 4 digits".to_string()));
    }
    if pin.trim() != settings.pin {
        return Err(AppError::WrongPin);
    }
    Ok(())
}

pub fn set_security_question(settings: &mut AppSettings, question: &str, answer: &str) -> AppResult<()> {
    if question.trim().is_empty() {
        return Err(AppError::MissingField("question".to_string()));
    }
    if answer.trim().is_empty() {
        return Err(AppError::MissingField("answer".to_string()));
    }
    settings.security_question = Some(question.trim().to_string());
    settings.security_answer = Some(answer.trim().to_string());
    Ok(())
}

/// Return the PIN when `answer` matches the stored one (trimmed, case-insensitive).
pub fn recover_pin(settings: &AppSettings, answer: &str) -> AppResult<String> {
    let stored = settings
        .security_answer
        .as_deref()
        .ok_or_else(|| AppError::Config("no security question configured".to_string()))?;

    if stored.trim().to_lowercase() == answer.trim().to_lowercase() {
        Ok(settings.pin.clone())
    } else {
        Err(AppError::WrongSecurityAnswer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_lifecycle() {
        let mut s = AppSettings::default();
        verify_pin(&s, "1234").unwrap();
        assert!(matches!(verify_pin(&s, "4321"), Err(AppError::WrongPin)));
        assert!(matches!(verify_pin(&s, "12"), Err(AppError::InvalidPin(_))));

        assert!(set_pin(&mut s, "12345").is_err());
        assert_eq!(s.pin, "1234");
        set_pin(&mut s, "0420").unwrap();
        verify_pin(&s, "0420").unwrap();
    }

    #[test]
    fn recovery_answer_is_case_insensitive() {
        let mut s = AppSettings::default();
        assert!(recover_pin(&s, "x").is_err());

        set_security_question(&mut s, "Nombre del perro", "Toby").unwrap();
        assert_eq!(recover_pin(&s, "  toby ").unwrap(), "1234");
        assert!(matches!(recover_pin(&s, "rex"), Err(AppError::WrongSecurityAnswer)));
    }
}
