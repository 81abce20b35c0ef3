//! Configuration for npcchat.
//!
//! Maps directly to `npcchat.toml`. Every field has a default, so an empty
//! file (or no file at all) reproduces the stock behaviour: a Gemini-backed
//! NPC reading `players.json` and appending to `ai_prompts.txt` and
//! `logs.txt`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::window::DEFAULT_WINDOW_CAPACITY;

/// Top-level npcchat configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NpcChatConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Per-player conversation tracking.
    #[serde(default)]
    pub conversation: ConversationConfig,
    /// Text-generation backend.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Retry timing for failed generations.
    #[serde(default)]
    pub retry: RetryConfig,
    /// Input and output locations.
    #[serde(default)]
    pub output: OutputConfig,
    /// Prompt template override.
    #[serde(default)]
    pub prompt: PromptConfig,
}

impl NpcChatConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `CoreError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error. `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Per-player conversation tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Messages kept in each player's window.
    #[serde(default = "default_window_capacity")]
    pub window_capacity: usize,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
        }
    }
}

/// Text-generation backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider: "gemini", "openai", "ollama".
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model name passed to the provider.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL for the API. Each provider has its own default.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Timeout for a single HTTP call in milliseconds. A timed-out call is
    /// retried like any other failure.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
            api_key_env: default_api_key_env(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Retry timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Base of the exponential backoff for rate-limit errors, in seconds.
    /// The n-th consecutive rate-limit wait is `base^n`.
    #[serde(default = "default_backoff_base")]
    pub backoff_base_secs: u64,
    /// Fixed wait after any other error, in seconds.
    #[serde(default = "default_unknown_delay")]
    pub unknown_error_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            backoff_base_secs: default_backoff_base(),
            unknown_error_delay_secs: default_unknown_delay(),
        }
    }
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON batch of player messages.
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,
    /// Prompt/reply transcript.
    #[serde(default = "default_transcript_path")]
    pub transcript_path: PathBuf,
    /// Per-message run log.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    /// Mirror run-log records to stdout.
    #[serde(default = "default_true")]
    pub echo_console: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            transcript_path: default_transcript_path(),
            log_path: default_log_path(),
            echo_console: true,
        }
    }
}

/// Prompt template override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Replacement template. Placeholders: `{mood}`, `{window}`,
    /// `{message}`, `{player_id}`. `None` uses the built-in template.
    #[serde(default)]
    pub template: Option<String>,
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_window_capacity() -> usize { DEFAULT_WINDOW_CAPACITY }
fn default_provider() -> String { "gemini".to_string() }
fn default_model() -> String { "gemini-1.5-flash".to_string() }
fn default_api_key_env() -> String { "GEMINI_API_KEY".to_string() }
fn default_timeout_ms() -> u64 { 30_000 }
fn default_backoff_base() -> u64 { 2 }
fn default_unknown_delay() -> u64 { 2 }
fn default_input_path() -> PathBuf { PathBuf::from("players.json") }
fn default_transcript_path() -> PathBuf { PathBuf::from("ai_prompts.txt") }
fn default_log_path() -> PathBuf { PathBuf::from("logs.txt") }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = NpcChatConfig::from_toml("").expect("empty config is valid");
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.conversation.window_capacity, 3);
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert_eq!(config.llm.api_key_env, "GEMINI_API_KEY");
        assert!(config.llm.base_url.is_none());
        assert_eq!(config.retry.backoff_base_secs, 2);
        assert_eq!(config.retry.unknown_error_delay_secs, 2);
        assert_eq!(config.output.input_path, PathBuf::from("players.json"));
        assert_eq!(config.output.transcript_path, PathBuf::from("ai_prompts.txt"));
        assert_eq!(config.output.log_path, PathBuf::from("logs.txt"));
        assert!(config.output.echo_console);
        assert!(config.prompt.template.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = NpcChatConfig::from_toml(
            r#"
            [llm]
            provider = "ollama"
            model = "qwen2.5:1.5b"

            [output]
            echo_console = false
            "#,
        )
        .expect("should parse");
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.model, "qwen2.5:1.5b");
        assert_eq!(config.llm.timeout_ms, 30_000);
        assert!(!config.output.echo_console);
        assert_eq!(config.output.log_path, PathBuf::from("logs.txt"));
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = NpcChatConfig::from_toml("[llm\nprovider =").expect_err("should fail");
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn from_file_reads_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("npcchat.toml");
        std::fs::write(&path, "[conversation]\nwindow_capacity = 5\n").expect("write");
        let config = NpcChatConfig::from_file(&path).expect("should load");
        assert_eq!(config.conversation.window_capacity, 5);
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let err = NpcChatConfig::from_file(Path::new("/nonexistent/npcchat.toml"))
            .expect_err("should fail");
        assert!(matches!(err, CoreError::Io(_)));
    }
}
