//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use shelf_core::{category_summary, route_for, KeyValueStore, FAVORITES_LABEL};

use super::app::{ActivePane, App, NavItem};
use crate::commands::about;

/// Main UI rendering function
pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(22),
            Constraint::Percentage(38),
            Constraint::Percentage(40),
        ])
        .split(outer_chunks[0]);

    draw_nav_pane(frame, app, pane_chunks[0]);
    draw_books_pane(frame, app, pane_chunks[1]);
    draw_detail_pane(frame, app, pane_chunks[2]);
    draw_status_bar(frame, app, outer_chunks[1]);

    if app.show_about {
        draw_about_overlay(frame);
    }
    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn pane_styles(is_active: bool) -> (Style, Style) {
    let border_style = if is_active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let highlight_style = if is_active {
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };
    (border_style, highlight_style)
}

/// Draw the navigation pane (left)
fn draw_nav_pane<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let (border_style, highlight_style) = pane_styles(app.active_pane == ActivePane::Nav);

    let items: Vec<ListItem> = app
        .nav
        .iter()
        .map(|item| {
            let name = match item {
                NavItem::AllBooks => "▤ All Books".to_string(),
                NavItem::Favorites => {
                    format!("♥ {} ({})", FAVORITES_LABEL, app.session.favorites().len())
                }
                NavItem::Category(category) => format!("  {}", category),
            };
            ListItem::new(name)
        })
        .collect();

    let block = Block::default()
        .title(" Browse ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style);

    let mut state = ListState::default();
    state.select(Some(app.nav_index));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the books pane (middle)
fn draw_books_pane<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let (border_style, highlight_style) = pane_styles(app.active_pane == ActivePane::Books);
    let books = app.books();

    let view_title = if app.state().show_favorites {
        FAVORITES_LABEL.to_string()
    } else if app.state().has_category_filter() {
        app.state().active_category.clone()
    } else {
        "All Books".to_string()
    };
    let block = Block::default()
        .title(format!(" {} ({}) ", view_title, books.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if books.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                app.empty_message(),
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let max_len = area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = books
        .iter()
        .map(|book| {
            let marker = if app.session.is_favorite(&book.id) {
                Span::styled("♥ ", Style::default().fg(Color::Red))
            } else {
                Span::raw("  ")
            };
            let title = Line::from(vec![marker, Span::raw(truncate(book.short_title(), max_len))]);
            let category = Line::from(Span::styled(
                format!("  {}", truncate(&book.category, max_len)),
                Style::default().add_modifier(Modifier::DIM),
            ));
            ListItem::new(vec![title, category])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style);

    let mut state = ListState::default();
    state.select(Some(app.book_index));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the detail pane (right)
fn draw_detail_pane<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let (border_style, _) = pane_styles(app.active_pane == ActivePane::Detail);

    let block = Block::default()
        .title(" Detail ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let mut lines = if let Some(book) = app.current_book() {
        let mut lines = vec![Line::from(vec![
            Span::styled("Title: ", bold),
            Span::raw(book.short_title()),
        ])];
        if let Some(subtitle) = book.subtitle() {
            lines.push(Line::from(vec![
                Span::styled("Subtitle: ", bold),
                Span::raw(subtitle),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Category: ", bold),
            Span::raw(&book.category),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Favorite: ", bold),
            Span::raw(if app.session.is_favorite(&book.id) {
                "♥ yes"
            } else {
                "no"
            }),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Buy: ", bold),
            Span::raw(if book.purchase_link.is_empty() {
                "-"
            } else {
                book.purchase_link.as_str()
            }),
        ]));
        if !book.image_url.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Cover: ", bold),
                Span::raw(&book.image_url),
            ]));
        }
        lines
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled("Select a book to view details", dim)),
        ]
    };

    let state = app.state();
    let summary = if state.show_favorites {
        category_summary(FAVORITES_LABEL)
    } else {
        category_summary(&state.active_category)
    };
    if let Some(summary) = summary {
        let header = "── About this view ";
        let remaining = area.width.saturating_sub(header.chars().count() as u16 + 2) as usize;
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{}{}", header, "─".repeat(remaining)),
            dim,
        )));
        lines.push(Line::from(summary));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Route: ", dim),
        Span::styled(route_for(state), dim),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.detail_scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Draw the status bar at the bottom
fn draw_status_bar<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let content = if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        "f:favorite  F:favorites  A:all  Enter:open  i:about  ?:help  q:quit".to_string()
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Centered popup area, clamped to the terminal
fn popup_area(frame: &Frame, width: u16, height: u16) -> Rect {
    let area = frame.area();
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let area = popup_area(frame, 50, 20);
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/k, ↑/↓    Move up/down"),
        Line::from("  gg          Jump to first item"),
        Line::from("  G           Jump to last item"),
        Line::from("  h/l, ←/→    Switch panes"),
        Line::from("  Tab         Cycle panes"),
        Line::from("  Enter       Open link / Apply selection"),
        Line::from(""),
        Line::from("Books:"),
        Line::from("  f, Space    Toggle favorite"),
        Line::from("  F           Favorites view"),
        Line::from("  A           All books"),
        Line::from("  i           About"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Draw about overlay
fn draw_about_overlay(frame: &mut Frame) {
    let area = popup_area(frame, 64, 22);
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            about::TAGLINE,
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
    ];
    for paragraph in about::ABOUT_PARAGRAPHS {
        lines.push(Line::from(*paragraph));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        about::footer(),
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .title(format!(" {} ", about::APP_TITLE))
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Truncate to `max` characters, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
