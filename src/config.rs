use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

// Default configuration
pub const DEFAULT_DISPLAY_NAME: &str = "You";
pub const DEFAULT_THEME: &str = "dark";

/// Persisted user preferences for the Wisp demo shell.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Settings {
    pub display_name: String,
    /// "dark" or "light".
    pub theme: String,
    pub show_timestamps: bool,
    /// Arrow keys wrap past the ends of the command palette list.
    #[serde(default)]
    pub loop_palette_nav: bool,
    /// Selecting a mention closes the autocomplete overlay.
    #[serde(default = "default_true")]
    pub close_mentions_on_select: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            theme: DEFAULT_THEME.to_string(),
            show_timestamps: true,
            loop_palette_nav: false,
            close_mentions_on_select: true,
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(proj) = ProjectDirs::from("dev", "wisp", "wisp-ui") {
        let dir = proj.config_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Failed to create config dir: {}", e);
            return None;
        }
        return Some(dir.join("settings.json"));
    }
    None
}

pub fn load_settings() -> Option<Settings> {
    let path = settings_path()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn save_settings(settings: &Settings) -> std::io::Result<()> {
    if let Some(path) = settings_path() {
        let mut file = fs::File::create(path)?;
        let data = serde_json::to_string_pretty(settings)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        file.write_all(data.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.theme, "dark");
        assert!(settings.show_timestamps);
        assert!(settings.close_mentions_on_select);
        assert!(!settings.loop_palette_nav);
    }

    #[test]
    fn test_settings_roundtrip_json() {
        let mut settings = Settings::default();
        settings.theme = "light".into();
        settings.loop_palette_nav = true;
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.theme, "light");
        assert!(parsed.loop_palette_nav);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        // Older settings files without the newer toggles still load.
        let json = r#"{"display_name":"You","theme":"dark","show_timestamps":false}"#;
        let parsed: Settings = serde_json::from_str(json).unwrap();
        assert!(!parsed.show_timestamps);
        assert!(!parsed.loop_palette_nav);
        assert!(parsed.close_mentions_on_select);
    }
}
