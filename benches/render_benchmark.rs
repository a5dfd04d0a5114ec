use criterion::{Criterion, black_box, criterion_group, criterion_main};
use saral_tui::internal::models::StoryRecord;
use saral_tui::internal::ui::view::story_card_lines;
use saral_tui::utils::theme::TuiTheme;

fn benchmark_story_card(c: &mut Criterion) {
    let theme = TuiTheme::default();
    let story = StoryRecord {
        id: Some(1),
        title: "Community kitchen".to_string(),
        content: "Volunteers from three neighbourhoods came together every weekend to cook and serve meals for families affected by the floods. It should handle various lengths and constraints gracefully.".to_string(),
        author: "Asha".to_string(),
        location: Some("Pune".to_string()),
        timestamp: Some("2024-01-01 12:00:00".to_string()),
    };

    c.bench_function("story_card_lines short", |b| {
        b.iter(|| story_card_lines(black_box(&story), black_box(80), &theme))
    });

    let long_story = StoryRecord {
        content: story.content.repeat(10),
        ..story.clone()
    };
    c.bench_function("story_card_lines long", |b| {
        b.iter(|| story_card_lines(black_box(&long_story), black_box(80), &theme))
    });
}

criterion_group!(benches, benchmark_story_card);
criterion_main!(benches);
