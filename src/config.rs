use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::api::DEFAULT_API_BASE_URL;

/// Environment variable that overrides `network.base_url`.
pub const API_URL_ENV: &str = "SARAL_API_URL";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub logging: LoggingConfig,
    pub ui: UiConfig,
    pub theme: ThemeConfig,
    /// Optional per-context key overrides, e.g. `list: {"r": "RefreshStories"}`.
    pub keybindings: Option<KeyBindingConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    /// Address of the stories backend, without the `/stories` suffix.
    pub base_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the rolling log file. `None` means `./logs`.
    pub log_directory: Option<String>,
    pub module_levels: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_directory: None,
            module_levels: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive string, e.g. `info,reqwest=warn`.
    pub fn filter_directive(&self) -> String {
        let mut filter_str = self.level.clone();
        let mut modules: Vec<_> = self.module_levels.iter().collect();
        modules.sort();
        for (module, level) in modules {
            filter_str.push_str(&format!(",{}={}", module, level));
        }
        filter_str
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// How long the startup splash stays up. 0 disables it.
    pub splash_duration_ms: u64,
    pub padding: PaddingConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            splash_duration_ms: 4000,
            padding: PaddingConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PaddingConfig {
    pub horizontal: u16,
    pub vertical: u16,
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            horizontal: 1,
            vertical: 0,
        }
    }
}

/// Hex color overrides (`"#00E5A0"`) applied on top of the built-in palette.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct ThemeConfig {
    pub background: Option<String>,
    pub panel: Option<String>,
    pub foreground: Option<String>,
    pub muted: Option<String>,
    pub accent: Option<String>,
    pub border: Option<String>,
    pub error: Option<String>,
}

/// Key string to action name, per context.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct KeyBindingConfig {
    pub global: HashMap<String, String>,
    pub list: HashMap<String, String>,
    pub form: HashMap<String, String>,
}

impl AppConfig {
    pub fn load() -> Self {
        let mut config = Self::load_from_candidates(Self::candidate_paths());
        config.apply_env_overrides(std::env::var(API_URL_ENV).ok());
        config
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        // 1. Current working directory
        candidates.push(PathBuf::from("config.ron"));

        // 2. Next to executable
        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("config.ron"));
        }

        // 3. User config directory
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("saral-tui").join("config.ron"));
        }

        candidates
    }

    /// First candidate that exists and parses wins.
    pub fn load_from_candidates(candidates: Vec<PathBuf>) -> Self {
        for path in candidates {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match ron::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse config at {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Self::default()
    }

    pub fn apply_env_overrides(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            tracing::info!(%url, "API base URL overridden from {}", API_URL_ENV);
            self.network.base_url = url.trim().to_string();
        }
    }

    pub fn log_directory(&self) -> &str {
        self.logging.log_directory.as_deref().unwrap_or("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.network.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.ui.splash_duration_ms, 4000);
        assert_eq!(config.log_directory(), "logs");
        assert!(config.keybindings.is_none());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let content = r#"(
    // Backend
    network: (base_url: "http://stories.local:8080"),
    ui: (splash_duration_ms: 0),
)"#;
        let config: AppConfig = ron::from_str(content).unwrap();
        assert_eq!(config.network.base_url, "http://stories.local:8080");
        assert_eq!(config.ui.splash_duration_ms, 0);
        assert_eq!(config.ui.padding.horizontal, 1);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_keybindings_section() {
        let content = r#"(
    keybindings: Some((
        list: { "R": "RefreshStories" },
    )),
)"#;
        let config: AppConfig = ron::from_str(content).unwrap();
        let bindings = config.keybindings.unwrap();
        assert_eq!(
            bindings.list.get("R").map(String::as_str),
            Some("RefreshStories")
        );
        assert!(bindings.global.is_empty());
    }

    #[test]
    fn test_env_override() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(Some("  http://10.0.0.2:5000 ".to_string()));
        assert_eq!(config.network.base_url, "http://10.0.0.2:5000");

        config.apply_env_overrides(Some("   ".to_string()));
        assert_eq!(config.network.base_url, "http://10.0.0.2:5000");
    }

    #[test]
    fn test_filter_directive() {
        let mut logging = LoggingConfig::default();
        logging
            .module_levels
            .insert("reqwest".to_string(), "warn".to_string());
        assert_eq!(logging.filter_directive(), "info,reqwest=warn");
    }

    #[test]
    fn test_load_from_candidates_skips_broken_file() {
        let dir = std::env::temp_dir();
        let broken = dir.join("saral_config_broken.ron");
        let good = dir.join("saral_config_good.ron");
        fs::write(&broken, "(network: ").unwrap();
        fs::write(&good, r#"(network: (base_url: "http://good:1"))"#).unwrap();

        let config = AppConfig::load_from_candidates(vec![
            dir.join("saral_config_missing.ron"),
            broken.clone(),
            good.clone(),
        ]);
        assert_eq!(config.network.base_url, "http://good:1");

        let _ = fs::remove_file(broken);
        let _ = fs::remove_file(good);
    }
}
