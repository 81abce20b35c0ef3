//! Wiring for the `npcchat` binary: configuration, logging, run.

use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::EnvFilter;

use npcchat_core::config::NpcChatConfig;
use npcchat_core::sink::{AppendFileSink, ConsoleSink, EntrySink, NullSink};
use npcchat_llm::backoff::{RetryPolicy, TokioSleeper};
use npcchat_llm::client::LlmClient;
use npcchat_llm::generator::ReplyGenerator;
use npcchat_llm::prompt::PromptTemplate;

use crate::error::Result;
use crate::loader::JsonFileSource;
use crate::orchestrator::{Orchestrator, RunSummary};

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "npcchat.toml";

/// Load configuration.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
/// used if present, otherwise built-in defaults.
///
/// # Errors
/// Returns an error if the chosen file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<NpcChatConfig> {
    let config = match path {
        Some(path) => NpcChatConfig::from_file(path)?,
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default.exists() {
                NpcChatConfig::from_file(&default)?
            } else {
                NpcChatConfig::default()
            }
        }
    };
    Ok(config)
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `level`. Logs go to stderr; stdout carries the
/// console records.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build every component from `config` and replay the batch.
///
/// `api_key` is the credential read from `config.llm.api_key_env`.
///
/// # Errors
/// Returns an error if the backend cannot be configured, the batch cannot
/// be loaded, or the run log cannot be written.
pub async fn run(config: &NpcChatConfig, api_key: Option<String>) -> Result<RunSummary> {
    let client = LlmClient::from_config(&config.llm, api_key)?;
    info!(
        provider = client.provider().name(),
        model = client.model(),
        input = %config.output.input_path.display(),
        "Starting NPC batch replay"
    );

    let generator = ReplyGenerator::new(
        client,
        TokioSleeper,
        AppendFileSink::new(&config.output.transcript_path),
    )
    .with_policy(RetryPolicy::from(&config.retry))
    .with_template(PromptTemplate::from_override(config.prompt.template.as_deref()));

    let console: Box<dyn EntrySink> = if config.output.echo_console {
        Box::new(ConsoleSink)
    } else {
        Box::new(NullSink)
    };

    let mut orchestrator = Orchestrator::new(
        generator,
        config.conversation.window_capacity,
        AppendFileSink::new(&config.output.log_path),
        console,
    );
    orchestrator
        .run(&JsonFileSource::new(&config.output.input_path))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn explicit_config_path_is_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[llm]\nprovider = \"ollama\"\n").expect("write");

        let config = load_config(Some(&path)).expect("should load");
        assert_eq!(config.llm.provider, "ollama");
    }

    #[test]
    fn explicit_missing_config_is_error() {
        let result = load_config(Some(Path::new("/nonexistent/npcchat.toml")));
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_loading() {
        let config = NpcChatConfig::default();
        let err = run(&config, None).await.expect_err("gemini needs a key");
        assert!(matches!(err, SimError::Llm(_)));
    }

    #[tokio::test]
    async fn missing_batch_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = NpcChatConfig::default();
        config.llm.provider = "ollama".into();
        config.output.input_path = dir.path().join("absent.json");
        config.output.log_path = dir.path().join("logs.txt");
        config.output.transcript_path = dir.path().join("ai_prompts.txt");

        let err = run(&config, None).await.expect_err("no batch");
        assert!(matches!(err, SimError::ReadBatch { .. }));
        assert!(!config.output.log_path.exists());
    }
}
