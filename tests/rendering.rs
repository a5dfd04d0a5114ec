use ratatui::{Terminal, backend::TestBackend};
use reqwest::StatusCode;
use saral_tui::api::TransportError;
use saral_tui::config::AppConfig;
use saral_tui::internal::models::{DraftField, StoryRecord};
use saral_tui::internal::navigation::Page;
use saral_tui::internal::ui::app::App;
use saral_tui::internal::ui::view;

fn test_app(splash_duration_ms: u64) -> App {
    let mut config = AppConfig::default();
    config.ui.splash_duration_ms = splash_duration_ms;
    App::with_config(config)
}

fn render(app: &mut App) -> String {
    let backend = TestBackend::new(140, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| view::draw(app, f)).unwrap();

    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn story(id: u64, title: &str, author: &str, location: &str) -> StoryRecord {
    StoryRecord {
        id: Some(id),
        title: title.to_string(),
        content: "We planted trees along the river bank.".to_string(),
        author: author.to_string(),
        location: Some(location.to_string()),
        timestamp: Some("2024-01-01 12:00:00".to_string()),
    }
}

#[test]
fn test_splash_hides_pages() {
    let mut app = test_app(60_000);
    let screen = render(&mut app);

    assert!(screen.contains("Policy Saral"));
    assert!(!screen.contains("Share Your Story"));
}

#[test]
fn test_stories_page_loading() {
    let mut app = test_app(0);
    app.stories.mount();
    let screen = render(&mut app);

    assert!(screen.contains("Success Stories"));
    assert!(screen.contains("Share Your Story"));
    assert!(screen.contains("Loading stories..."));
    assert!(screen.contains("Submit Story"));
}

#[test]
fn test_stories_page_empty_list() {
    let mut app = test_app(0);
    let tag = app.stories.mount().unwrap();
    app.stories.finish_load(tag, Ok(Vec::new()));
    let screen = render(&mut app);

    assert!(screen.contains("No success stories have been shared yet."));
    assert!(!screen.contains("Could not fetch stories."));
}

#[test]
fn test_stories_page_failure() {
    let mut app = test_app(0);
    let tag = app.stories.mount().unwrap();
    app.stories.finish_load(
        tag,
        Err(TransportError::Status {
            url: "http://127.0.0.1:5000/stories".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }),
    );
    let screen = render(&mut app);

    assert!(screen.contains("Could not fetch stories."));
    assert!(!screen.contains("No success stories"));
}

#[test]
fn test_stories_page_cards() {
    let mut app = test_app(0);
    let tag = app.stories.mount().unwrap();
    app.stories.finish_load(
        tag,
        Ok(vec![
            story(2, "River cleanup", "Asha", "Pune"),
            story(1, "Night school", "Ravi", ""),
        ]),
    );
    let screen = render(&mut app);

    assert!(screen.contains("Stories (2)"));
    assert!(screen.contains("River cleanup"));
    assert!(screen.contains("By Asha from Pune on 2024-01-01"));
    assert!(screen.contains("By Ravi on 2024-01-01"));
    assert!(screen.find("River cleanup") < screen.find("Night school"));
}

#[test]
fn test_form_failure_message() {
    let mut app = test_app(0);
    app.form.set_field(DraftField::Title, "T");
    app.form.set_field(DraftField::Content, "C");
    app.form.set_field(DraftField::Author, "X");
    app.form.begin_submit().unwrap();
    app.form.finish_submit(Err(TransportError::Network {
        url: "http://127.0.0.1:5000/stories".to_string(),
        reason: "connection refused".to_string(),
    }));
    let screen = render(&mut app);

    assert!(screen.contains("Failed to submit"));
}

#[test]
fn test_placeholder_pages() {
    let mut app = test_app(0);

    app.navigation.select(Page::Policies);
    let screen = render(&mut app);
    assert!(screen.contains("Policy Simplifier"));
    assert!(screen.contains("Your policy simplification UI goes here."));

    app.navigation.select(Page::Volunteers);
    let screen = render(&mut app);
    assert!(screen.contains("Volunteer Hub"));
    assert!(screen.contains("Your volunteer management UI goes here."));
}

#[test]
fn test_refresh_keeps_cards_under_loading_banner() {
    let mut app = test_app(0);
    let tag = app.stories.mount().unwrap();
    app.stories
        .finish_load(tag, Ok(vec![story(1, "River cleanup", "Asha", "Pune")]));
    app.stories.refresh();
    let screen = render(&mut app);

    assert!(screen.contains("Loading stories..."));
    assert!(screen.contains("River cleanup"));
    assert!(screen.contains("Stories (1)"));
}
