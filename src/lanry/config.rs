use crate::error::{LanryError, Result};
use crate::upload::AgeRating;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PROJECT_CONFIG_FILENAME: &str = "lanry.json";
const GLOBAL_CONFIG_FILENAME: &str = "config.json";
const DOTENV_FILENAME: &str = ".env";
const DEFAULT_CHAPTERS_DIR: &str = "Chapters";
const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 30;

pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_KEY: &str = "SUPABASE_KEY";

/// Configuration for lanry, stored in `<base>/lanry.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LanryConfig {
    /// Base URL of the Lanry service (the Supabase project URL).
    #[serde(default)]
    pub supabase_url: Option<String>,

    /// Public (anon) API key sent with the login request.
    #[serde(default)]
    pub supabase_key: Option<String>,

    /// Directory holding the chapter files, relative to the base directory.
    #[serde(default = "default_chapters_dir")]
    pub chapters_dir: String,

    #[serde(default = "default_upload_timeout")]
    pub upload_timeout_secs: u64,

    #[serde(default)]
    pub default_age_rating: AgeRating,
}

fn default_chapters_dir() -> String {
    DEFAULT_CHAPTERS_DIR.to_string()
}

fn default_upload_timeout() -> u64 {
    DEFAULT_UPLOAD_TIMEOUT_SECS
}

impl Default for LanryConfig {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_key: None,
            chapters_dir: default_chapters_dir(),
            upload_timeout_secs: DEFAULT_UPLOAD_TIMEOUT_SECS,
            default_age_rating: AgeRating::default(),
        }
    }
}

impl LanryConfig {
    /// Effective configuration for `base_dir`.
    ///
    /// File: `<base>/lanry.json`, else the user-wide `config.json`, else defaults.
    /// Then `<base>/.env`, then the process environment.
    pub fn load<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let global_dir = ProjectDirs::from("com", "lanry", "lanry")
            .map(|dirs| dirs.config_dir().to_path_buf());
        Self::load_layered(base_dir.as_ref(), global_dir.as_deref(), |key| {
            std::env::var(key).ok()
        })
    }

    pub(crate) fn load_layered<F>(base_dir: &Path, global_dir: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_file = base_dir.join(PROJECT_CONFIG_FILENAME);
        let global_file = global_dir.map(|dir| dir.join(GLOBAL_CONFIG_FILENAME));

        let mut config = if project_file.is_file() {
            Self::read_file(&project_file)?
        } else if let Some(global_file) = global_file.filter(|f| f.is_file()) {
            Self::read_file(&global_file)?
        } else {
            Self::default()
        };

        let dotenv_path = base_dir.join(DOTENV_FILENAME);
        if dotenv_path.is_file() {
            let content = fs::read_to_string(&dotenv_path).map_err(LanryError::Io)?;
            debug!(path = %dotenv_path.display(), "applying .env");
            config.apply_vars(parse_dotenv(&content).into_iter());
        }

        let from_env = [ENV_SUPABASE_URL, ENV_SUPABASE_KEY]
            .into_iter()
            .filter_map(|key| env(key).map(|value| (key.to_string(), value)));
        config.apply_vars(from_env);

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.upload_timeout_secs == 0 {
            return Err(LanryError::Config(
                "upload_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn read_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path).map_err(LanryError::Io)?;
        serde_json::from_str(&content)
            .map_err(|e| LanryError::Config(format!("{}: {}", path.display(), e)))
    }

    fn apply_vars(&mut self, vars: impl Iterator<Item = (String, String)>) {
        for (key, value) in vars {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                ENV_SUPABASE_URL => self.supabase_url = Some(value),
                ENV_SUPABASE_KEY => self.supabase_key = Some(value),
                _ => {}
            }
        }
    }

    /// Write the config to `<base>/lanry.json`.
    pub fn save<P: AsRef<Path>>(&self, base_dir: P) -> Result<PathBuf> {
        let base_dir = base_dir.as_ref();
        if !base_dir.exists() {
            fs::create_dir_all(base_dir).map_err(LanryError::Io)?;
        }

        let path = base_dir.join(PROJECT_CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(LanryError::Serialization)?;
        fs::write(&path, content).map_err(LanryError::Io)?;
        Ok(path)
    }

    pub fn chapters_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.chapters_dir)
    }

    /// API key for display: first four characters, the rest starred.
    pub fn masked_key(&self) -> Option<String> {
        self.supabase_key.as_ref().map(|key| {
            let visible: String = key.chars().take(4).collect();
            let hidden = key.chars().count().saturating_sub(4).min(16);
            format!("{}{}", visible, "*".repeat(hidden))
        })
    }
}

/// `KEY=value` lines; blank lines and `#` comments are skipped, matching quotes
/// around the value are removed.
fn parse_dotenv(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            Some((key.trim().to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
