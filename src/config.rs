use crate::app::keymap::KeyConfig;
use crate::app::palette::debounce::DEFAULT_QUIET_WINDOW;
use crate::app::palette::fanout::DEFAULT_PAGE_SIZE;
use crate::app::palette::merge::{EntityVisibility, DEFAULT_ENTITY_ROLES};
use crate::app::palette::PaletteSettings;
use crate::domain::models::Role;
use crate::theme::PaletteType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "FLEETDESK_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub debounce_ms: u64,
    pub page_size: u32,
    /// Roles that may see customer and device records in results.
    pub entity_roles: Vec<Role>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_QUIET_WINDOW.as_millis() as u64,
            page_size: DEFAULT_PAGE_SIZE,
            entity_roles: DEFAULT_ENTITY_ROLES.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL. Without it the console runs on demo data.
    pub api_base: Option<String>,
    pub api_token: Option<String>,
    pub request_timeout_ms: u64,
    /// Role the session starts signed in as.
    pub role: Option<Role>,
    pub theme: PaletteType,
    pub palette: PaletteConfig,
    pub keys: KeyConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            api_token: None,
            request_timeout_ms: 5000,
            role: None,
            theme: PaletteType::Nord,
            palette: PaletteConfig::default(),
            keys: KeyConfig::default(),
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("fleetdesk");
        path.push("config.toml");
        path
    })
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn palette_settings(&self) -> PaletteSettings {
        PaletteSettings {
            quiet_window: Duration::from_millis(self.palette.debounce_ms),
            page_size: self.palette.page_size.max(1),
            entity_visibility: EntityVisibility::new(self.palette.entity_roles.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.palette_settings(), PaletteSettings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let file = write(
            r#"
api_base = "https://api.example.test"
role = "LEAD_TECH"
theme = "catppuccin"

[palette]
debounce_ms = 400

[keys]
palette = "alt+p"
"#,
        );
        let config = AppConfig::load_from(file.path()).unwrap();

        assert_eq!(config.api_base.as_deref(), Some("https://api.example.test"));
        assert_eq!(config.role, Some(Role::TechLead));
        assert_eq!(config.theme, PaletteType::Catppuccin);
        assert_eq!(config.keys.palette, "alt+p");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));

        let settings = config.palette_settings();
        assert_eq!(settings.quiet_window, Duration::from_millis(400));
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_entity_roles_are_configurable() {
        let file = write("[palette]\nentity_roles = [\"ADMIN\"]\n");
        let settings = AppConfig::load_from(file.path()).unwrap().palette_settings();
        assert!(settings.entity_visibility.allows(Some(Role::Admin)));
        assert!(!settings.entity_visibility.allows(Some(Role::Technician)));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let file = write("role = [not toml");
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
