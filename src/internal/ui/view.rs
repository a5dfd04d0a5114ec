use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use strum::IntoEnumIterator;

use super::app::{App, InputMode};
use crate::internal::form::FormState;
use crate::internal::models::{DraftField, StoryRecord};
use crate::internal::navigation::Page;
use crate::internal::stories::{EMPTY_LIST_MESSAGE, ListState};
use crate::utils::theme::TuiTheme;

const SIDEBAR_WIDTH: u16 = 26;
const APP_TITLE: &str = "Policy Saral";

#[tracing::instrument(skip(app, f))]
pub fn draw(app: &mut App, f: &mut Frame) {
    let background = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(background, f.area());

    if app.splash_visible() {
        render_splash(app, f);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_top_bar(app, f, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(chunks[1]);

    render_sidebar(app, f, body[0]);

    match app.navigation.current() {
        Page::Stories => render_stories_page(app, f, body[1]),
        Page::Policies => render_placeholder(
            app,
            f,
            body[1],
            Page::Policies.title(),
            "This section is where you can build out the feature to simplify complex government policies using a language model.",
            "Your policy simplification UI goes here.",
        ),
        Page::Volunteers => render_placeholder(
            app,
            f,
            body[1],
            Page::Volunteers.title(),
            "This section can be used for volunteer-related features, such as a forum or a list of available projects.",
            "Your volunteer management UI goes here.",
        ),
    }

    render_status_bar(app, f, chunks[2]);
}

fn panel_block<'a>(app: &App, title: impl Into<Line<'a>>) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .padding(Padding::new(
            app.config.ui.padding.horizontal,
            app.config.ui.padding.horizontal,
            app.config.ui.padding.vertical,
            app.config.ui.padding.vertical,
        ))
        .border_style(Style::default().fg(app.theme.border))
        .title(title)
        .title_style(
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(app.theme.panel))
}

fn render_splash(app: &App, f: &mut Frame) {
    let area = f.area();
    let popup_width = 40.min(area.width.saturating_sub(4));
    let popup_height = 7.min(area.height);
    let popup_x = area.width.saturating_sub(popup_width) / 2;
    let popup_y = area.height.saturating_sub(popup_height) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    let block = panel_block(app, "");
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Tagline
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Gauge
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(APP_TITLE)
            .style(
                Style::default()
                    .fg(app.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new("Community stories, simplified")
            .style(Style::default().fg(app.theme.muted))
            .alignment(Alignment::Center),
        chunks[1],
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.accent).bg(app.theme.panel))
        .label("")
        .ratio(app.splash.progress(Instant::now()));
    f.render_widget(gauge, chunks[3]);
}

fn render_top_bar(app: &App, f: &mut Frame, area: Rect) {
    let text = format!("{} v{}  {}", APP_TITLE, app.app_version, app.client.base_url());
    let p = Paragraph::new(text)
        .alignment(Alignment::Right)
        .style(Style::default().fg(app.theme.muted).bg(app.theme.background));
    f.render_widget(p, area);
}

fn render_sidebar(app: &App, f: &mut Frame, area: Rect) {
    let current = app.navigation.current();
    let items: Vec<ListItem> = Page::iter()
        .enumerate()
        .map(|(idx, page)| {
            let style = match page == current {
                true => Style::default()
                    .fg(app.theme.foreground)
                    .bg(app.theme.border)
                    .add_modifier(Modifier::BOLD),
                false => Style::default().fg(app.theme.muted),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", idx + 1), Style::default().fg(app.theme.accent)),
                Span::styled(format!("{:<20}", page.title()), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(panel_block(app, format!(" {} ", APP_TITLE)));
    f.render_widget(list, area);
}

fn render_stories_page(app: &mut App, f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            Page::Stories.title(),
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Read and share how volunteers are making a difference in local communities.",
            Style::default().fg(app.theme.muted),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
        .split(chunks[1]);

    render_form(app, f, columns[0]);
    render_story_list(app, f, columns[1]);
}

fn render_form(app: &App, f: &mut Frame, area: Rect) {
    let block = panel_block(app, " Share Your Story ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(8), // Content
            Constraint::Length(3), // Author
            Constraint::Length(3), // Location
            Constraint::Length(1), // Submit
            Constraint::Length(2), // Message
            Constraint::Min(0),
        ])
        .split(inner);

    let editing = app.input_mode == InputMode::Editing;
    for (field, field_area) in DraftField::iter().zip(chunks.iter()) {
        let focused = editing && app.form.focused() == Some(field);
        render_field(app, f, *field_area, field, focused);
    }

    let (button_text, button_style) = match app.form.state() {
        FormState::Submitting => (
            format!("{} Submitting...", app.get_spinner_char()),
            Style::default().fg(app.theme.muted).bg(app.theme.border),
        ),
        _ => (
            "Submit Story".to_string(),
            Style::default()
                .fg(app.theme.background)
                .bg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    };
    f.render_widget(
        Paragraph::new(button_text)
            .style(button_style)
            .alignment(Alignment::Center),
        chunks[4],
    );

    let message = match app.form.state() {
        FormState::SubmitSucceeded(msg) => Some((msg.as_str(), app.theme.accent)),
        FormState::SubmitFailed(msg) => Some((msg.as_str(), app.theme.error)),
        _ => None,
    };
    if let Some((msg, color)) = message {
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            chunks[5],
        );
    }
}

fn render_field(app: &App, f: &mut Frame, area: Rect, field: DraftField, focused: bool) {
    let value = app.form.draft().get(field);
    let border_color = match focused {
        true => app.theme.accent,
        false => app.theme.border,
    };
    let title = match field.is_required() {
        true => format!(" {} * ", field.label()),
        false => format!(" {} ", field.label()),
    };

    let text: Text = match (value.is_empty(), focused) {
        (true, false) => Line::from(Span::styled(
            field.label(),
            Style::default().fg(app.theme.muted),
        ))
        .into(),
        _ => Text::from(value.to_string()),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title)
        .title_style(Style::default().fg(app.theme.muted))
        .style(Style::default().bg(app.theme.background));
    let inner = block.inner(area);

    // Keep the cursor line in view for multi-line content
    let line_count = value.split('\n').count() as u16;
    let scroll = line_count.saturating_sub(inner.height.max(1));

    let p = Paragraph::new(text)
        .style(Style::default().fg(app.theme.foreground))
        .block(block)
        .scroll((scroll, 0));
    f.render_widget(p, area);

    if focused {
        let last_line = value.rsplit('\n').next().unwrap_or_default();
        let x = inner.x + (last_line.chars().count() as u16).min(inner.width.saturating_sub(1));
        let y = inner.y + line_count.saturating_sub(1).saturating_sub(scroll);
        f.set_cursor_position((x, y));
    }
}

/// "By Bob from Pune on 2024-01-01"; location and date are omitted when absent.
pub fn story_meta_line(story: &StoryRecord) -> String {
    let mut meta = format!("By {}", story.author);
    if let Some(location) = story.location() {
        meta.push_str(&format!(" from {}", location));
    }
    if let Some(ts) = story.timestamp.as_deref() {
        meta.push_str(&format!(
            " on {}",
            crate::utils::datetime::format_story_date(ts)
        ));
    }
    meta
}

/// Lines of one story card, content wrapped to `width`.
pub fn story_card_lines(story: &StoryRecord, width: u16, theme: &TuiTheme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            story.title.clone(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            story_meta_line(story),
            Style::default().fg(theme.muted),
        )),
    ];

    let wrap_width = (width as usize).max(20);
    for paragraph in story.content.split('\n') {
        for line in textwrap::wrap(paragraph, wrap_width) {
            lines.push(Line::from(Span::styled(
                line.into_owned(),
                Style::default().fg(theme.foreground),
            )));
        }
    }
    lines.push(Line::from(""));
    lines
}

fn render_story_list(app: &mut App, f: &mut Frame, area: Rect) {
    let shown = app.stories.stories().len();
    let title = match shown {
        0 => " Stories ".to_string(),
        n => format!(" Stories ({}) ", n),
    };
    let block = panel_block(app, title);
    let loading = format!("{} Loading stories...", app.get_spinner_char());

    let notice = match app.stories.state() {
        ListState::Loading if shown == 0 => Some((loading.clone(), app.theme.muted)),
        ListState::Failed(msg) => Some((msg.clone(), app.theme.error)),
        ListState::Loaded(stories) if stories.is_empty() => {
            Some((EMPTY_LIST_MESSAGE.to_string(), app.theme.muted))
        }
        _ => None,
    };

    if let Some((text, color)) = notice {
        let p = Paragraph::new(text)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    // Previous cards stay visible under a banner while reloading
    let list_area = match app.stories.is_loading() {
        true => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(inner);
            f.render_widget(
                Paragraph::new(loading)
                    .style(Style::default().fg(app.theme.muted))
                    .alignment(Alignment::Center),
                rows[0],
            );
            rows[1]
        }
        false => inner,
    };

    let width = list_area.width.saturating_sub(2);
    let items: Vec<ListItem> = app
        .stories
        .stories()
        .iter()
        .map(|story| ListItem::new(story_card_lines(story, width, &app.theme)))
        .collect();

    let list = List::new(items)
        .highlight_symbol("▌ ")
        .highlight_style(Style::default().bg(app.theme.background));

    f.render_stateful_widget(list, list_area, &mut app.stories.cursor);
}

fn render_placeholder(
    app: &App,
    f: &mut Frame,
    area: Rect,
    title: &str,
    description: &str,
    placeholder: &str,
) {
    let block = panel_block(app, format!(" {} ", title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(inner);

    f.render_widget(
        Paragraph::new(description)
            .style(Style::default().fg(app.theme.foreground))
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let dashed = Block::default()
        .borders(Borders::ALL)
        .border_set(ratatui::symbols::border::PLAIN)
        .border_style(Style::default().fg(app.theme.muted));
    let dashed_inner = dashed.inner(chunks[1]);
    f.render_widget(dashed, chunks[1]);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(dashed_inner);
    f.render_widget(
        Paragraph::new(placeholder)
            .style(Style::default().fg(app.theme.muted))
            .alignment(Alignment::Center),
        vertical[1],
    );
}

fn render_status_bar(app: &App, f: &mut Frame, area: Rect) {
    let hints = match (app.input_mode, app.navigation.current()) {
        (InputMode::Editing, _) => {
            "Type to edit | Tab/↓: Next field | Shift+Tab/↑: Prev | Ctrl+S: Submit | Esc: Done"
        }
        (InputMode::Normal, Page::Stories) => {
            "1-3/Tab: Pages | n: Write story | s: Submit | r: Refresh | j/k: Scroll | q: Quit"
        }
        (InputMode::Normal, _) => "1-3/Tab: Pages | q: Quit",
    };

    let status = match app.loading_description() {
        Some(desc) => format!("{} {} | {}", app.get_spinner_char(), desc, hints),
        None => hints.to_string(),
    };

    let p = Paragraph::new(status)
        .block(
            Block::default()
                .padding(Padding::new(
                    app.config.ui.padding.horizontal,
                    app.config.ui.padding.horizontal,
                    0,
                    0,
                ))
                .style(Style::default().bg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.foreground));
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story() -> StoryRecord {
        StoryRecord {
            id: Some(1),
            title: "A".to_string(),
            content: "c".to_string(),
            author: "Bob".to_string(),
            location: Some(String::new()),
            timestamp: Some("2024-01-01T00:00:00Z".to_string()),
        }
    }

    #[test]
    fn test_meta_line_without_location() {
        assert_eq!(story_meta_line(&story()), "By Bob on 2024-01-01");
    }

    #[test]
    fn test_meta_line_with_location() {
        let s = StoryRecord {
            location: Some("Jaipur".to_string()),
            timestamp: Some("2024-05-06 07:08:09".to_string()),
            ..story()
        };
        assert_eq!(story_meta_line(&s), "By Bob from Jaipur on 2024-05-06");
    }

    #[test]
    fn test_card_wraps_content() {
        let s = StoryRecord {
            content: "word ".repeat(30),
            ..story()
        };
        let lines = story_card_lines(&s, 20, &TuiTheme::default());
        // title + meta + several wrapped lines + spacer
        assert!(lines.len() > 4);
        assert_eq!(lines[0].to_string(), "A");
    }
}
