//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  This makes it easy to change the
//! visual layout without touching business logic.
//!
//! ## For contributors
//!
//! * The layout is a five-row split: category pills, country pills, the
//!   scrollable headline list, a one-line link bar for the selected story,
//!   and a one-line status bar.
//! * Colours and styles are defined inline.  Feel free to extract them into
//!   constants or a theme struct if the palette grows.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, InputMode, CATEGORIES, COUNTRIES};
use crate::source::Article;

/// Draw the complete UI for one frame.
///
/// Called once per tick from the main loop.  Delegates to helper functions
/// for each screen region.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [category_area, country_area, main_area, link_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_category_bar(app, frame, category_area);
    draw_country_bar(app, frame, country_area);
    if app.is_priming() {
        draw_notice(app, frame, main_area, "Loading…", None);
    } else if app.items.is_empty() {
        draw_notice(
            app,
            frame,
            main_area,
            "No news found or API limit exceeded",
            Some("Try changing search, category, or country. Please try again later."),
        );
    } else {
        draw_headline_list(app, frame, main_area);
    }
    draw_link_bar(app, frame, link_area);
    draw_status_bar(app, frame, status_area);
}

/// Render the category pills, highlighting the active one.
fn draw_category_bar(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for category in CATEGORIES {
        let style = if category == app.query.category {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {category} "), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the country pills by display name, highlighting the active one.
fn draw_country_bar(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (code, name) in COUNTRIES {
        let style = if code == app.query.country {
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {name} "), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Title shared by the list and the notice states.
fn feed_title(app: &App) -> String {
    let last = app.last_loaded_page();
    if last > app.start_page {
        format!(" {} · pages {}-{} ", app.query, app.start_page, last)
    } else {
        format!(" {} · page {} ", app.query, app.start_page)
    }
}

/// Render the scrollable headline list.
fn draw_headline_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let list_items: Vec<ListItem> = app.items.iter().map(article_row).collect();

    let list = List::new(list_items)
        .block(Block::default().title(feed_title(app)).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// One two-line row: timestamp and headline, then the description.
fn article_row(article: &Article) -> ListItem<'_> {
    let date_str = article
        .published()
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "no date".into());

    let headline = Line::from(vec![
        Span::styled(format!("{date_str:<17}"), Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled(article.display_title(), Style::default().fg(Color::White)),
    ]);
    let summary = Line::from(vec![
        Span::raw(" ".repeat(18)),
        Span::styled(article.display_description(), Style::default().fg(Color::Gray)),
    ]);

    ListItem::new(Text::from(vec![headline, summary]))
}

/// Render a centred notice in place of the list (loading / empty states).
fn draw_notice(app: &App, frame: &mut Frame, area: Rect, headline: &str, detail: Option<&str>) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            headline,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(detail) = detail {
        lines.push(Line::from(Span::styled(
            detail,
            Style::default().fg(Color::Gray),
        )));
    }

    let notice = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(Block::default().title(feed_title(app)).borders(Borders::ALL));
    frame.render_widget(notice, area);
}

/// Render the link to the selected story, when it has one.
fn draw_link_bar(app: &App, frame: &mut Frame, area: Rect) {
    let line = match app.selected_article().and_then(|a| a.url.as_deref()) {
        Some(url) => Line::from(vec![
            Span::styled(" Read more → ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                url,
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the bottom status bar, or the search prompt while it is open.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let line = match app.input_mode {
        InputMode::Search => Line::from(vec![
            Span::styled(" search: ", Style::default().fg(Color::Yellow)),
            Span::raw(app.search_draft.as_str()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
            Span::styled(
                "  enter: go (empty clears)  esc: cancel",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        InputMode::Normal => Line::from(vec![
            Span::raw(" "),
            Span::styled(&app.status, Style::default().fg(Color::Yellow)),
            Span::raw("  "),
            Span::styled(
                format!("{} articles", app.items.len()),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  q: quit  ↑/↓: scroll  /: search  tab: category  c: country  n/p: page"),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchMsg, FetchRequest};
    use crate::source::NewsQuery;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::mpsc::{self, Receiver};

    fn test_app() -> (App, Receiver<FetchRequest>) {
        let (tx, rx) = mpsc::channel();
        (App::new(NewsQuery::default(), 1, tx), rx)
    }

    fn make_article(title: &str, url: &str) -> Article {
        Article {
            title: Some(title.to_string()),
            description: Some("A short description".to_string()),
            url: Some(url.to_string()),
            url_to_image: None,
            published_at: Some("2026-02-01T09:00:00Z".to_string()),
        }
    }

    /// Land `articles` as the session's first page.
    fn prime(app: &mut App, rx: &Receiver<FetchRequest>, articles: Vec<Article>) {
        let request = rx.try_recv().expect("a request should be pending");
        app.on_fetch(FetchMsg {
            generation: request.generation,
            page: request.page,
            articles,
        });
    }

    fn render_to_text(app: &mut App) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();

        let buf = terminal.backend().buffer().clone();
        buf.content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    #[test]
    fn draw_does_not_panic_while_priming() {
        let (mut app, _rx) = test_app();
        let text = render_to_text(&mut app);
        assert!(text.contains("Loading…"));
    }

    #[test]
    fn empty_session_shows_the_no_news_notice() {
        let (mut app, rx) = test_app();
        prime(&mut app, &rx, vec![]);

        let text = render_to_text(&mut app);
        assert!(text.contains("No news found or API limit exceeded"));
    }

    #[test]
    fn headlines_render_with_dates_and_descriptions() {
        let (mut app, rx) = test_app();
        prime(
            &mut app,
            &rx,
            vec![make_article("Visible headline", "https://example.com/a")],
        );
        app.select_first();

        let text = render_to_text(&mut app);
        assert!(text.contains("Visible headline"));
        assert!(text.contains("2026-02-01 09:00"));
        assert!(text.contains("A short description"));
    }

    #[test]
    fn status_bar_shows_the_article_count() {
        let (mut app, rx) = test_app();
        prime(
            &mut app,
            &rx,
            vec![
                make_article("One", "https://example.com/1"),
                make_article("Two", "https://example.com/2"),
                make_article("Three", "https://example.com/3"),
            ],
        );

        let text = render_to_text(&mut app);
        assert!(text.contains("3 articles"));
    }

    #[test]
    fn link_bar_shows_the_selected_story_url() {
        let (mut app, rx) = test_app();
        prime(
            &mut app,
            &rx,
            vec![make_article("One", "https://example.com/full-story")],
        );
        app.select_first();

        let text = render_to_text(&mut app);
        assert!(text.contains("https://example.com/full-story"));
    }

    #[test]
    fn search_prompt_echoes_the_draft() {
        let (mut app, _rx) = test_app();
        app.open_search();
        app.push_search_char('r');
        app.push_search_char('u');
        app.push_search_char('s');
        app.push_search_char('t');

        let text = render_to_text(&mut app);
        assert!(text.contains("search: rust"));
    }

    #[test]
    fn active_filters_appear_in_the_pills_and_title() {
        let (mut app, rx) = test_app();
        prime(&mut app, &rx, vec![make_article("One", "https://example.com/1")]);

        let text = render_to_text(&mut app);
        assert!(text.contains("technology"));
        assert!(text.contains("India"));
        assert!(text.contains("page 1"));
    }
}
