use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::{FormError, Result};
use crate::utils::{app_home_dir, config_file_in, ensure_dir};

const TMP_SUFFIX: &str = "tmp";
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 80;

/// Presentation preferences for the shell output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub plain_mode: bool,
    pub high_contrast_mode: bool,
    pub screen_reader_mode: bool,
    pub quiet_mode: bool,
}

/// Persisted user preferences. Submitted records are never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub progress_bar_width: usize,
    pub show_progress_bar: bool,
    pub output: OutputSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            progress_bar_width: 30,
            show_progress_bar: true,
            output: OutputSettings::default(),
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 6] = [
        "progress_bar_width",
        "show_progress_bar",
        "plain_mode",
        "high_contrast_mode",
        "screen_reader_mode",
        "quiet_mode",
    ];

    /// Key/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("progress_bar_width", self.progress_bar_width.to_string()),
            ("show_progress_bar", self.show_progress_bar.to_string()),
            ("plain_mode", self.output.plain_mode.to_string()),
            ("high_contrast_mode", self.output.high_contrast_mode.to_string()),
            ("screen_reader_mode", self.output.screen_reader_mode.to_string()),
            ("quiet_mode", self.output.quiet_mode.to_string()),
        ]
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "progress_bar_width" => {
                let width = value.trim().parse::<usize>().map_err(|_| {
                    FormError::Config(format!("`{value}` is not a whole number"))
                })?;
                if !(MIN_BAR_WIDTH..=MAX_BAR_WIDTH).contains(&width) {
                    return Err(FormError::Config(format!(
                        "progress_bar_width must be between {MIN_BAR_WIDTH} and {MAX_BAR_WIDTH}"
                    )));
                }
                self.progress_bar_width = width;
            }
            "show_progress_bar" => self.show_progress_bar = parse_flag(value)?,
            "plain_mode" => self.output.plain_mode = parse_flag(value)?,
            "high_contrast_mode" => self.output.high_contrast_mode = parse_flag(value)?,
            "screen_reader_mode" => self.output.screen_reader_mode = parse_flag(value)?,
            "quiet_mode" => self.output.quiet_mode = parse_flag(value)?,
            other => {
                return Err(FormError::Config(format!(
                    "unknown key `{other}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(FormError::Config(format!(
            "`{other}` is not a boolean (use on/off)"
        ))),
    }
}

/// Loads and atomically saves the JSON config file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_home_dir())
    }

    pub fn with_base_dir(base: impl AsRef<Path>) -> Result<Self> {
        let path = config_file_in(base.as_ref());
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        Ok(Self { path })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_all(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "Configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_parses_flags_and_width() {
        let mut config = Config::default();
        config.set("plain_mode", "on").unwrap();
        config.set("progress_bar_width", "20").unwrap();
        assert!(config.output.plain_mode);
        assert_eq!(config.progress_bar_width, 20);
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("progress_bar_width", "200").is_err());
        assert!(config.set("quiet_mode", "maybe").is_err());
        assert!(config.set("theme", "dark").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"show_progress_bar": false}"#).unwrap();
        assert!(!config.show_progress_bar);
        assert_eq!(config.progress_bar_width, 30);
    }

    #[test]
    fn tmp_path_keeps_extension() {
        let path = Path::new("/tmp/config.json");
        assert_eq!(tmp_path(path), PathBuf::from("/tmp/config.json.tmp"));
    }
}
