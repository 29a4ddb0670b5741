//! Configuration system (layered: CLI flags > env > settings file > defaults).

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};
use crate::models::DEFAULT_MODEL;

/// Env var naming an alternative settings file.
pub const CONFIG_PATH_ENV: &str = "WEBSAGE_CONFIG";

/// Default number of search snippets returned per tool call.
pub const DEFAULT_MAX_RESULTS: usize = 2;

/// Default cap on tool rounds per user turn.
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

/// Default listen address for `websage serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Providers whose credentials must be present at startup.
pub const REQUIRED_PROVIDERS: [(&str, &str); 2] =
    [("groq", "GROQ_API_KEY"), ("tavily", "TAVILY_API_KEY")];

/// Non-secret settings. Loaded from TOML, overridable from env and flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model: String,
    pub groq_base_url: Option<String>,
    pub tavily_base_url: Option<String>,
    pub max_results: usize,
    pub max_tool_rounds: usize,
    pub system_prompt: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            groq_base_url: None,
            tavily_base_url: None,
            max_results: DEFAULT_MAX_RESULTS,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            system_prompt: None,
            temperature: None,
            max_tokens: None,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| ChatError::Configuration(format!("Invalid settings file: {e}")))
    }

    /// Read settings from a TOML file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ChatError::Configuration(format!("Cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&text)
    }

    /// Platform config location, e.g. `~/.config/websage/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "websage")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn apply_env(&mut self, lookup: &impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(model) = lookup("WEBSAGE_MODEL") {
            self.model = model;
        }
        if let Some(url) = lookup("GROQ_BASE_URL") {
            self.groq_base_url = Some(url);
        }
        if let Some(url) = lookup("TAVILY_BASE_URL") {
            self.tavily_base_url = Some(url);
        }
        if let Some(raw) = lookup("WEBSAGE_MAX_RESULTS") {
            self.max_results = parse_env_number("WEBSAGE_MAX_RESULTS", &raw)?;
        }
        if let Some(raw) = lookup("WEBSAGE_MAX_TOOL_ROUNDS") {
            self.max_tool_rounds = parse_env_number("WEBSAGE_MAX_TOOL_ROUNDS", &raw)?;
        }
        if let Some(prompt) = lookup("WEBSAGE_SYSTEM_PROMPT") {
            self.system_prompt = Some(prompt);
        }
        if let Some(bind) = lookup("WEBSAGE_BIND") {
            self.bind = bind;
        }
        Ok(())
    }

    /// Reject settings the loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(ChatError::Configuration(
                "max_results must be at least 1".into(),
            ));
        }
        if self.max_tool_rounds == 0 {
            return Err(ChatError::Configuration(
                "max_tool_rounds must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn parse_env_number(var: &str, raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| ChatError::Configuration(format!("{var} must be a positive integer, got '{raw}'")))
}

/// Resolved application configuration: credentials plus settings.
#[derive(Clone, Default)]
pub struct AppConfig {
    api_keys: HashMap<String, String>,
    base_urls: HashMap<String, String>,
    pub settings: Settings,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut providers: Vec<&str> = self.api_keys.keys().map(String::as_str).collect();
        providers.sort_unstable();
        f.debug_struct("AppConfig")
            .field("api_keys", &providers)
            .field("base_urls", &self.base_urls)
            .field("settings", &self.settings)
            .finish()
    }
}

impl AppConfig {
    /// Create an empty config with default settings and no credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `.env`, the settings file and the process environment, then check
    /// that both required credentials are present.
    ///
    /// `config_path` wins over `WEBSAGE_CONFIG`, which wins over the platform
    /// default location. Only an explicitly named file must exist.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let lookup = |var: &str| std::env::var(var).ok().filter(|v| !v.is_empty());

        let explicit = config_path
            .map(Path::to_path_buf)
            .or_else(|| lookup(CONFIG_PATH_ENV).map(PathBuf::from));
        let settings = match explicit {
            Some(path) => Settings::load_file(&path)?,
            None => match Settings::default_path().filter(|p| p.is_file()) {
                Some(path) => Settings::load_file(&path)?,
                None => Settings::default(),
            },
        };

        let config = Self::from_lookup(settings, lookup)?;
        config.require_credentials()?;
        Ok(config)
    }

    /// Build a config from base settings and an environment lookup function.
    pub fn from_lookup(
        mut settings: Settings,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        settings.apply_env(&lookup)?;
        settings.validate()?;

        let mut config = Self {
            settings,
            ..Self::default()
        };

        let env_mappings = [
            ("GROQ_API_KEY", "groq"),
            ("TAVILY_API_KEY", "tavily"),
            ("OPENAI_COMPAT_API_KEY", "openai-compatible"),
        ];
        for (env_var, provider) in env_mappings {
            if let Some(key) = lookup(env_var) {
                config.set_api_key(provider, key);
            }
        }

        if let Some(url) = lookup("OPENAI_COMPAT_BASE_URL") {
            config.set_base_url("openai-compatible", url);
        }
        if let Some(url) = config.settings.groq_base_url.clone() {
            config.set_base_url("groq", url);
        }
        if let Some(url) = config.settings.tavily_base_url.clone() {
            config.set_base_url("tavily", url);
        }

        Ok(config)
    }

    /// Fail if any startup credential is missing.
    pub fn require_credentials(&self) -> Result<()> {
        let missing: Vec<&str> = REQUIRED_PROVIDERS
            .iter()
            .filter(|(provider, _)| !self.has_credentials(provider))
            .map(|(_, var)| *var)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ChatError::Configuration(format!(
                "Missing required environment variable(s): {}",
                missing.join(", ")
            )))
        }
    }

    pub fn set_api_key(&mut self, provider: &str, key: String) {
        self.api_keys.insert(provider.to_string(), key);
    }

    pub fn get_api_key(&self, provider: &str) -> Option<String> {
        self.api_keys.get(provider).cloned()
    }

    pub fn set_base_url(&mut self, provider: &str, url: String) {
        self.base_urls.insert(provider.to_string(), url);
    }

    pub fn get_base_url(&self, provider: &str) -> Option<String> {
        self.base_urls.get(provider).cloned()
    }

    pub fn has_credentials(&self, provider: &str) -> bool {
        self.api_keys.contains_key(provider)
    }
}
