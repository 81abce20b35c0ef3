//! Property-Based Tests for npcchat Core
//!
//! Uses `proptest` to check the mood classifier and conversation window
//! against arbitrary chat text.

use proptest::prelude::*;

use npcchat_core::mood::{self, ANGRY_KEYWORDS, FRIENDLY_KEYWORDS, Mood};
use npcchat_core::state::ConversationBook;
use npcchat_core::types::PlayerId;
use npcchat_core::window::ConversationWindow;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_mood() -> impl Strategy<Value = Mood> {
    prop::sample::select(Mood::all().to_vec())
}

/// Text that can never contain a keyword: digits, spaces and punctuation.
fn arb_keyword_free_text() -> impl Strategy<Value = String> {
    "[0-9 .,!?]{0,40}"
}

/// Lowercase ASCII filler around keywords.
fn arb_filler() -> impl Strategy<Value = String> {
    "[a-z ]{0,12}"
}

/// Randomly upper/lower-case a keyword.
fn arb_cased(keywords: &'static [&'static str]) -> impl Strategy<Value = String> {
    (prop::sample::select(keywords.to_vec()), any::<bool>()).prop_map(|(k, upper)| {
        if upper { k.to_uppercase() } else { k.to_string() }
    })
}

// ---------------------------------------------------------------------------
// Property: Friendly keywords beat angry keywords
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn friendly_beats_angry(
        friendly in arb_cased(FRIENDLY_KEYWORDS),
        angry in arb_cased(ANGRY_KEYWORDS),
        pre in arb_filler(),
        post in arb_filler(),
        angry_first in any::<bool>(),
        current in arb_mood(),
    ) {
        let text = if angry_first {
            format!("{pre}{angry} {friendly}{post}")
        } else {
            format!("{pre}{friendly} {angry}{post}")
        };
        prop_assert_eq!(mood::classify(&text, current), Mood::Friendly);
    }
}

// ---------------------------------------------------------------------------
// Property: Keyword-free text leaves the mood alone
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn keyword_free_text_is_identity(text in arb_keyword_free_text(), current in arb_mood()) {
        prop_assert_eq!(mood::classify(&text, current), current);
    }
}

// ---------------------------------------------------------------------------
// Property: Window keeps exactly the last `capacity` messages in order
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn window_is_suffix_of_appends(texts in prop::collection::vec(".{0,16}", 3..40)) {
        let mut window = ConversationWindow::default();
        for t in &texts {
            window.append(t.clone());
        }
        prop_assert_eq!(window.len(), 3);
        prop_assert_eq!(window.snapshot(), texts[texts.len() - 3..].to_vec());
    }

    #[test]
    fn window_never_exceeds_capacity(
        capacity in 1usize..8,
        texts in prop::collection::vec(".{0,8}", 0..30),
    ) {
        let mut window = ConversationWindow::new(capacity);
        for t in &texts {
            window.append(t.clone());
            prop_assert!(window.len() <= capacity);
        }
        prop_assert_eq!(window.len(), texts.len().min(capacity));
    }
}

// ---------------------------------------------------------------------------
// Property: The book replays the same history to the same state
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn book_is_deterministic(
        history in prop::collection::vec((0u8..4, "[a-z !]{0,20}"), 0..30),
    ) {
        let replay = || {
            let mut book = ConversationBook::default();
            for (player, text) in &history {
                book.observe(&PlayerId::new(player.to_string()), text);
            }
            book
        };
        let a = replay();
        let b = replay();
        for player in 0u8..4 {
            let id = PlayerId::new(player.to_string());
            prop_assert_eq!(a.get(&id), b.get(&id));
        }
    }
}
