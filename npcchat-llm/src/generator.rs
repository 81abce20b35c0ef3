//! Reply Generator — prompt, call, retry until a reply arrives.
//!
//! [`ReplyGenerator::generate`] has no error path. Rate-limit failures back
//! off exponentially, everything else waits a fixed delay, and the loop
//! only ends with a reply. Every successful `(prompt, reply)` pair is
//! appended to the transcript sink.

use tracing::{debug, error, warn};

use npcchat_core::mood::Mood;
use npcchat_core::sink::{EntrySink, FILE_DELIMITER_WIDTH, delimiter};
use npcchat_core::types::PlayerId;
use npcchat_core::window::ConversationWindow;

use crate::backend::TextBackend;
use crate::backoff::{RetryEvent, RetryMachine, RetryPolicy, RetryState, Sleeper};
use crate::classify::{ErrorClassifier, FailureClass, KeywordClassifier};
use crate::prompt::PromptTemplate;

/// Format one transcript entry, delimiter line included.
#[must_use]
pub fn transcript_entry(prompt: &str, reply: &str) -> String {
    format!(
        "PROMPT:\n{prompt}\nREPLY:\n{reply}\n{}\n",
        delimiter(FILE_DELIMITER_WIDTH)
    )
}

/// Generates NPC replies, retrying failed calls forever.
pub struct ReplyGenerator<B, S, T, C = KeywordClassifier> {
    backend: B,
    sleeper: S,
    transcript: T,
    classifier: C,
    policy: RetryPolicy,
    template: PromptTemplate,
}

impl<B, S, T> ReplyGenerator<B, S, T>
where
    B: TextBackend,
    S: Sleeper,
    T: EntrySink,
{
    /// Create a generator with the default classifier, policy and template.
    pub fn new(backend: B, sleeper: S, transcript: T) -> Self {
        Self {
            backend,
            sleeper,
            transcript,
            classifier: KeywordClassifier::default(),
            policy: RetryPolicy::default(),
            template: PromptTemplate::builtin(),
        }
    }
}

impl<B, S, T, C> ReplyGenerator<B, S, T, C>
where
    B: TextBackend,
    S: Sleeper,
    T: EntrySink,
    C: ErrorClassifier,
{
    /// Swap the error classifier.
    pub fn with_classifier<C2: ErrorClassifier>(self, classifier: C2) -> ReplyGenerator<B, S, T, C2> {
        ReplyGenerator {
            backend: self.backend,
            sleeper: self.sleeper,
            transcript: self.transcript,
            classifier,
            policy: self.policy,
            template: self.template,
        }
    }

    /// Set the retry policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the prompt template.
    #[must_use]
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// The transcript sink.
    pub fn transcript(&self) -> &T {
        &self.transcript
    }

    /// Build the prompt for one message.
    #[must_use]
    pub fn build_prompt(
        &self,
        player: &PlayerId,
        text: &str,
        window: &ConversationWindow,
        mood: Mood,
    ) -> String {
        self.template.render(player, text, window, mood)
    }

    /// Produce a reply to `text`.
    ///
    /// Blocks the caller until the backend succeeds; there is no attempt
    /// cap and no cancellation. The reply is trimmed of surrounding
    /// whitespace.
    pub async fn generate(
        &mut self,
        player: &PlayerId,
        text: &str,
        window: &ConversationWindow,
        mood: Mood,
    ) -> String {
        let prompt = self.build_prompt(player, text, window, mood);
        let mut machine = RetryMachine::new();

        loop {
            match self.backend.generate_content(&prompt).await {
                Ok(raw) => {
                    machine = machine.transition(&self.policy, RetryEvent::Succeeded);
                    let reply = raw.trim().to_string();
                    debug!(
                        player = %player,
                        attempts = machine.attempts(),
                        "NPC reply generated"
                    );
                    self.record_transcript(&prompt, &reply);
                    return reply;
                }
                Err(err) => {
                    let class = self.classifier.classify(&err);
                    machine = machine.transition(&self.policy, RetryEvent::Failed(class));

                    if let RetryState::BackoffWait(delay) = machine.state() {
                        match class {
                            FailureClass::Transient => warn!(
                                player = %player,
                                attempt = machine.transient_strikes(),
                                wait_secs = delay.as_secs(),
                                "[Rate limit hit] Waiting {} sec before retry...",
                                delay.as_secs()
                            ),
                            FailureClass::Unknown => warn!(
                                player = %player,
                                error = %err,
                                wait_secs = delay.as_secs(),
                                "[NPC model error] {err}, retrying in {} sec...",
                                delay.as_secs()
                            ),
                        }
                        self.sleeper.sleep(delay).await;
                        machine = machine.transition(&self.policy, RetryEvent::WaitElapsed);
                    }
                }
            }
        }
    }

    fn record_transcript(&mut self, prompt: &str, reply: &str) {
        match self.transcript.append(&transcript_entry(prompt, reply)) {
            Ok(()) => debug!(reply_len = reply.len(), "Transcript entry written"),
            Err(e) => error!(error = %e, "Failed to write transcript entry"),
        }
    }
}
