//! Prompt template for NPC replies.
//!
//! One built-in template; a replacement can be supplied through
//! `[prompt] template = "..."` in `npcchat.toml`.

use npcchat_core::mood::Mood;
use npcchat_core::types::PlayerId;
use npcchat_core::window::ConversationWindow;

/// Built-in reply prompt.
pub const NPC_REPLY_TEMPLATE: &str = r#"
You are an NPC in a fantasy RPG.
Mood: {mood}
Player's last messages: {window}
Current player message: "{message}"
Reply in 1-2 short sentences as an NPC.
"#;

/// Simple template interpolation for prompts.
///
/// Replaces `{key}` with the corresponding value in a single left-to-right
/// pass, so substituted text is never scanned again. Unknown keys are left
/// as written.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, close))
        });
        match substituted {
            Some((value, close)) => {
                result.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

/// A ready-to-render reply prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// The built-in template.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            template: NPC_REPLY_TEMPLATE.to_string(),
        }
    }

    /// A custom template. Placeholders: `{mood}`, `{window}`, `{message}`,
    /// `{player_id}`.
    #[must_use]
    pub fn custom(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The configured override, or the built-in template.
    #[must_use]
    pub fn from_override(template: Option<&str>) -> Self {
        template.map_or_else(Self::builtin, Self::custom)
    }

    /// Raw template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Render the prompt for one message.
    ///
    /// Deterministic: identical inputs always give an identical prompt.
    #[must_use]
    pub fn render(
        &self,
        player: &PlayerId,
        message: &str,
        window: &ConversationWindow,
        mood: Mood,
    ) -> String {
        let window = window.to_string();
        render_template(
            &self.template,
            &[
                ("mood", mood.as_str()),
                ("window", &window),
                ("message", message),
                ("player_id", player.as_str()),
            ],
        )
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_of(texts: &[&str]) -> ConversationWindow {
        let mut w = ConversationWindow::default();
        for t in texts {
            w.append(*t);
        }
        w
    }

    #[test]
    fn template_rendering_works() {
        let rendered = render_template(
            "Hello {name}, you are a {role}.",
            &[("name", "Goran"), ("role", "blacksmith")],
        );
        assert_eq!(rendered, "Hello Goran, you are a blacksmith.");
    }

    #[test]
    fn template_handles_missing_vars() {
        let rendered = render_template("Hello {name}, {unknown}.", &[("name", "Goran")]);
        assert_eq!(rendered, "Hello Goran, {unknown}.");
    }

    #[test]
    fn template_handles_stray_braces() {
        assert_eq!(render_template("a { b", &[("b", "x")]), "a { b");
        assert_eq!(render_template("{{name}}", &[("name", "x")]), "{x}");
        assert_eq!(render_template("end {", &[]), "end {");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let rendered = render_template("{a} {b}", &[("a", "{b}"), ("b", "B")]);
        assert_eq!(rendered, "{b} B");
    }

    #[test]
    fn builtin_prompt_matches_layout() {
        let window = window_of(&["thanks!", "you noob"]);
        let prompt = PromptTemplate::builtin().render(
            &PlayerId::new("p1"),
            "you noob",
            &window,
            Mood::Angry,
        );
        let expected = "\nYou are an NPC in a fantasy RPG.\n\
                        Mood: angry\n\
                        Player's last messages: [\"thanks!\", \"you noob\"]\n\
                        Current player message: \"you noob\"\n\
                        Reply in 1-2 short sentences as an NPC.\n";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn rendering_is_deterministic() {
        let template = PromptTemplate::builtin();
        let window = window_of(&["a", "b", "c"]);
        let p = PlayerId::new("p");
        let first = template.render(&p, "c", &window, Mood::Neutral);
        let second = template.render(&p, "c", &window.clone(), Mood::Neutral);
        assert_eq!(first, second);
    }

    #[test]
    fn player_text_with_placeholders_is_literal() {
        let window = window_of(&["{mood}"]);
        let prompt = PromptTemplate::builtin().render(
            &PlayerId::new("p"),
            "{window}",
            &window,
            Mood::Friendly,
        );
        assert!(prompt.contains("Current player message: \"{window}\""));
        assert!(prompt.contains("Player's last messages: [\"{mood}\"]"));
    }

    #[test]
    fn override_template_is_used() {
        let template = PromptTemplate::from_override(Some("{player_id} is {mood}"));
        let rendered = template.render(
            &PlayerId::new("7"),
            "hi",
            &ConversationWindow::default(),
            Mood::Friendly,
        );
        assert_eq!(rendered, "7 is friendly");
        assert_eq!(PromptTemplate::from_override(None), PromptTemplate::builtin());
    }
}
