use std::path::PathBuf;
use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;

use crate::core::state::scroll::DEFAULT_HEADER_THRESHOLD;
use crate::domain::form::{FormMessages, FormRules};
use crate::infrastructure::visibility::DEFAULT_MARGIN_RATIO;
use crate::utils;

const CONFIG: &str = include_str!("../../.config/config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub form: FormConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    "theme".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub header_threshold: f64,
    pub spy_margin_ratio: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_threshold: DEFAULT_HEADER_THRESHOLD,
            spy_margin_ratio: DEFAULT_MARGIN_RATIO,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub autoplay_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { autoplay_ms: 5000 }
    }
}

impl CarouselConfig {
    pub fn autoplay_period(&self) -> Duration {
        Duration::from_millis(self.autoplay_ms)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Origin the page is served from; the endpoint resolves against it
    pub origin: String,
    pub endpoint: String,
    #[serde(flatten)]
    pub rules: FormRules,
    pub messages: FormMessages,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8888".to_string(),
            endpoint: "/".to_string(),
            rules: FormRules::default(),
            messages: FormMessages::default(),
        }
    }
}

impl Config {
    /// Embedded defaults, then optional user files from the config directory,
    /// then `PAGEWIRE__SECTION__KEY` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let data_dir = utils::get_data_dir();
        let config_dir = utils::get_config_dir();
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5))
            .set_default("_data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("_config_dir", config_dir.to_string_lossy().to_string())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        for (file, format) in &config_files {
            let path = config_dir.join(file);
            if path.exists() {
                tracing::info!(path = %path.display(), "loading user configuration");
            }
            builder = builder.add_source(config::File::from(path).format(*format).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&utils::PROJECT_NAME)
                .prefix_separator("__")
                .separator("__"),
        );

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.autoplay_ms == 0 {
            return Err(ConfigError::Message(
                "carousel.autoplay_ms must be greater than zero".to_string(),
            ));
        }
        if !(0.0..0.5).contains(&self.scroll.spy_margin_ratio) {
            return Err(ConfigError::Message(
                "scroll.spy_margin_ratio must be in [0, 0.5)".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_embedded_defaults_match_code_defaults() -> color_eyre::eyre::Result<()> {
        let embedded: Config = json5::from_str(CONFIG)?;
        let defaults = Config::default();

        assert_eq!(embedded.theme.storage_key, defaults.theme.storage_key);
        assert_eq!(embedded.scroll.header_threshold, defaults.scroll.header_threshold);
        assert_eq!(embedded.scroll.spy_margin_ratio, defaults.scroll.spy_margin_ratio);
        assert_eq!(embedded.carousel.autoplay_ms, defaults.carousel.autoplay_ms);
        assert_eq!(embedded.form.endpoint, defaults.form.endpoint);
        assert_eq!(embedded.form.rules, defaults.form.rules);
        assert_eq!(embedded.form.messages, defaults.form.messages);
        Ok(())
    }

    #[test]
    fn test_config_loads_with_defaults() {
        // User files may exist on the machine running the tests; only the
        // invariants enforced by validation are checked.
        match Config::new() {
            Ok(cfg) => {
                assert!(cfg.carousel.autoplay_ms > 0);
                assert!(!cfg.theme.storage_key.is_empty());
            }
            Err(e) => {
                let err_msg = format!("{e:?}");
                assert!(
                    err_msg.contains("autoplay_ms") || err_msg.contains("spy_margin_ratio"),
                    "unexpected configuration error: {e:?}"
                );
            }
        }
    }

    #[test]
    fn test_autoplay_period() {
        assert_eq!(
            CarouselConfig::default().autoplay_period(),
            Duration::from_millis(5000)
        );
    }

    #[test]
    fn test_rejects_zero_autoplay() {
        let mut cfg = Config::default();
        cfg.carousel.autoplay_ms = 0;
        assert!(cfg.validate().is_err());
    }
}
