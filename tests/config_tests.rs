//! Tests for configuration loading: settings file, environment, credentials.

use std::io::Write;
use std::sync::{Mutex, OnceLock};

use pretty_assertions::assert_eq;
use websage::config::{AppConfig, Settings, CONFIG_PATH_ENV, DEFAULT_BIND};
use websage::error::ChatError;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_ENV_VARS: [&str; 13] = [
    "GROQ_API_KEY",
    "TAVILY_API_KEY",
    "OPENAI_COMPAT_API_KEY",
    "OPENAI_COMPAT_BASE_URL",
    "GROQ_BASE_URL",
    "TAVILY_BASE_URL",
    "WEBSAGE_MODEL",
    "WEBSAGE_MAX_RESULTS",
    "WEBSAGE_MAX_TOOL_ROUNDS",
    "WEBSAGE_SYSTEM_PROMPT",
    "WEBSAGE_BIND",
    CONFIG_PATH_ENV,
    "XDG_CONFIG_HOME",
];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn capture(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|key| ((*key).to_string(), std::env::var(key).ok()))
            .collect();
        for key in keys {
            std::env::remove_var(key);
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Clean environment with no platform config file in reach.
fn isolated_env() -> (std::sync::MutexGuard<'static, ()>, EnvGuard, tempfile::TempDir) {
    let lock = env_lock_guard();
    let guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    let home = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", home.path());
    (lock, guard, home)
}

fn settings_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn load_requires_both_credentials() {
    let (_lock, _guard, _home) = isolated_env();

    let err = AppConfig::load(None).unwrap_err();
    match err {
        ChatError::Configuration(msg) => {
            assert!(msg.contains("GROQ_API_KEY"));
            assert!(msg.contains("TAVILY_API_KEY"));
        }
        other => panic!("expected Configuration, got {other:?}"),
    }

    std::env::set_var("GROQ_API_KEY", "gsk-test");
    let err = AppConfig::load(None).unwrap_err().to_string();
    assert!(!err.contains("GROQ_API_KEY"));
    assert!(err.contains("TAVILY_API_KEY"));
}

#[test]
fn load_with_credentials_uses_defaults() {
    let (_lock, _guard, _home) = isolated_env();
    std::env::set_var("GROQ_API_KEY", "gsk-test");
    std::env::set_var("TAVILY_API_KEY", "tvly-test");

    let config = AppConfig::load(None).unwrap();

    assert_eq!(config.get_api_key("groq"), Some("gsk-test".to_string()));
    assert_eq!(config.get_api_key("tavily"), Some("tvly-test".to_string()));
    assert_eq!(config.settings, Settings::default());
    assert_eq!(config.settings.bind, DEFAULT_BIND);
    assert_eq!(config.settings.max_results, 2);
}

#[test]
fn settings_file_then_env_precedence() {
    let (_lock, _guard, _home) = isolated_env();
    std::env::set_var("GROQ_API_KEY", "gsk-test");
    std::env::set_var("TAVILY_API_KEY", "tvly-test");
    let file = settings_file(
        r#"
model = "groq:llama-3.3-70b-versatile"
max_results = 4
max_tool_rounds = 3
system_prompt = "Be brief."
tavily_base_url = "http://localhost:9000"
"#,
    );
    std::env::set_var("WEBSAGE_MAX_RESULTS", "5");

    let config = AppConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.settings.model, "groq:llama-3.3-70b-versatile");
    assert_eq!(config.settings.max_results, 5);
    assert_eq!(config.settings.max_tool_rounds, 3);
    assert_eq!(config.settings.system_prompt.as_deref(), Some("Be brief."));
    assert_eq!(
        config.get_base_url("tavily"),
        Some("http://localhost:9000".to_string())
    );
}

#[test]
fn config_path_env_points_at_settings_file() {
    let (_lock, _guard, _home) = isolated_env();
    std::env::set_var("GROQ_API_KEY", "gsk-test");
    std::env::set_var("TAVILY_API_KEY", "tvly-test");
    let file = settings_file("bind = \"0.0.0.0:9999\"\n");
    std::env::set_var(CONFIG_PATH_ENV, file.path());

    let config = AppConfig::load(None).unwrap();
    assert_eq!(config.settings.bind, "0.0.0.0:9999");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let (_lock, _guard, home) = isolated_env();
    std::env::set_var("GROQ_API_KEY", "gsk-test");
    std::env::set_var("TAVILY_API_KEY", "tvly-test");

    let missing = home.path().join("nope.toml");
    let err = AppConfig::load(Some(&missing)).unwrap_err();
    assert!(matches!(err, ChatError::Configuration(_)));
}

#[test]
fn malformed_settings_file_is_rejected() {
    let (_lock, _guard, _home) = isolated_env();
    std::env::set_var("GROQ_API_KEY", "gsk-test");
    std::env::set_var("TAVILY_API_KEY", "tvly-test");
    let file = settings_file("max_results = \"many\"\n");

    let err = AppConfig::load(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("Invalid settings file"));
}

#[test]
fn non_numeric_env_override_is_rejected() {
    let (_lock, _guard, _home) = isolated_env();
    std::env::set_var("GROQ_API_KEY", "gsk-test");
    std::env::set_var("TAVILY_API_KEY", "tvly-test");
    std::env::set_var("WEBSAGE_MAX_TOOL_ROUNDS", "lots");

    let err = AppConfig::load(None).unwrap_err();
    assert!(err.to_string().contains("WEBSAGE_MAX_TOOL_ROUNDS"));
}

#[test]
fn debug_output_hides_secrets() {
    let mut config = AppConfig::new();
    config.set_api_key("groq", "gsk-very-secret".to_string());
    let rendered = format!("{config:?}");
    assert!(rendered.contains("groq"));
    assert!(!rendered.contains("gsk-very-secret"));
}
