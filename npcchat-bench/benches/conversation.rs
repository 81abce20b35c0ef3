//! npcchat Benchmark Suite
//!
//! Hot paths run once per replayed message:
//!   mood_classify_long_message ....... keyword scan of a chatty message
//!   window_append_steady_state ....... append + evict on a full window
//!   book_observe_100_players ......... lookup + append + classify
//!   prompt_render_full_window ........ reply prompt with 3 messages

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use npcchat_core::mood::{self, Mood};
use npcchat_core::state::ConversationBook;
use npcchat_core::types::PlayerId;
use npcchat_core::window::ConversationWindow;
use npcchat_llm::prompt::PromptTemplate;

fn chatty_message() -> String {
    "Well met, traveler! I have been walking these roads for days and ".repeat(8)
}

/// Benchmark: classify a long message with no keywords (worst case scan).
fn bench_mood_classify(c: &mut Criterion) {
    let text = chatty_message();
    c.bench_function("mood_classify_long_message", |b| {
        b.iter(|| black_box(mood::classify(black_box(&text), Mood::Neutral)));
    });
}

/// Benchmark: append to a window that is already full.
fn bench_window_append(c: &mut Criterion) {
    let mut window = ConversationWindow::default();
    for i in 0..3 {
        window.append(format!("warmup {i}"));
    }
    c.bench_function("window_append_steady_state", |b| {
        b.iter(|| window.append(black_box("another line")));
    });
}

/// Benchmark: observe messages spread across 100 players.
fn bench_book_observe(c: &mut Criterion) {
    let players: Vec<PlayerId> = (0..100).map(|i| PlayerId::new(i.to_string())).collect();
    let mut book = ConversationBook::default();
    let mut i = 0usize;
    c.bench_function("book_observe_100_players", |b| {
        b.iter(|| {
            let player = &players[i % players.len()];
            i = i.wrapping_add(1);
            black_box(book.observe(player, "thanks for the help").mood);
        });
    });
}

/// Benchmark: render the reply prompt with a full window.
fn bench_prompt_render(c: &mut Criterion) {
    let template = PromptTemplate::builtin();
    let player = PlayerId::new("p1");
    let mut window = ConversationWindow::default();
    for text in ["hello", "thanks!", "where is the inn?"] {
        window.append(text);
    }
    c.bench_function("prompt_render_full_window", |b| {
        b.iter(|| {
            black_box(template.render(&player, "where is the inn?", &window, Mood::Friendly))
        });
    });
}

criterion_group!(
    benches,
    bench_mood_classify,
    bench_window_append,
    bench_book_observe,
    bench_prompt_render,
);
criterion_main!(benches);
