//! Path utilities: expand ~, validate absolute paths.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

pub fn is_absolute(path: &str) -> bool {
    expand_tilde(path).is_absolute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_to_absolute() {
        if dirs::home_dir().is_some() {
            assert!(is_absolute("~/backup.json"));
        }
        assert!(!is_absolute("backup.json"));
    }
}
