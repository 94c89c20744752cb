//! TUI rendering logic for the movie search screen.

use std::time::Instant;

use cinefav_api::omdb::MovieRecord;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::state::{ActivePane, AppState};
use crate::form::FormField;

/// Draws the whole screen.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut AppState, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // form
            Constraint::Length(1), // loading / error
            Constraint::Min(8),    // card + favorites
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_form(frame, chunks[0], state);
    draw_status(frame, chunks[1], state);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    draw_card(frame, body[0], state);
    draw_favorites(frame, body[1], state, now);
    draw_footer(frame, chunks[3], state);
}

/// Draws the title and rating inputs and the search button.
#[allow(clippy::indexing_slicing)]
fn draw_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let fields = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55),
            Constraint::Percentage(30),
            Constraint::Min(12),
        ])
        .split(area);

    let focused = |field: FormField| {
        state.active_pane == ActivePane::Form && state.form.focus == field
    };

    let inputs = [
        (FormField::Title, &state.form.title, " Movie title "),
        (FormField::MinRating, &state.form.min_rating, " Min rating (0-10) "),
    ];
    for (index, (field, text, label)) in inputs.into_iter().enumerate() {
        let style = if focused(field) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let input = Paragraph::new(text.as_str())
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(label));
        frame.render_widget(input, fields[index]);

        if focused(field) {
            let width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
            let input_area = fields[index];
            frame.set_cursor_position((
                input_area.x.saturating_add(1).saturating_add(width),
                input_area.y.saturating_add(1),
            ));
        }
    }

    let button_style = if state.form.can_submit() && !state.search.is_loading() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Paragraph::new(Line::from("Search").centered())
        .style(button_style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, fields[2]);
}

/// Draws the loading indicator followed by the error message.
fn draw_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = Vec::new();
    if state.search.is_loading() {
        spans.push(Span::styled(" Loading...", Style::default().fg(Color::Yellow)));
    }
    if let Some(message) = state.search.error_message() {
        spans.push(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draws the result card (left).
fn draw_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::ALL).title(" Movie ");

    let Some(movie) = state.search.visible_movie() else {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Type a title and press Enter to search",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let action = if state.favorites.is_favorite(movie) {
        Span::styled(
            "[Ctrl+F] Remove from Favorites",
            Style::default().fg(Color::Red),
        )
    } else {
        Span::styled(
            "[Ctrl+F] Add to Favorites",
            Style::default().fg(Color::Green),
        )
    };

    let mut lines = vec![
        Line::from(Span::styled(
            movie.heading(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    lines.extend(card_fields(movie));
    lines.push(Line::default());
    lines.push(Line::from(action));

    let card = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(card, area);
}

/// Builds the labelled detail lines of a card.
fn card_fields(movie: &MovieRecord) -> Vec<Line<'_>> {
    [
        ("Rating", &movie.imdb_rating),
        ("Duration", &movie.runtime),
        ("Director", &movie.director),
        ("Actors", &movie.actors),
        ("Description", &movie.plot),
        ("Poster", &movie.poster),
    ]
    .into_iter()
    .map(|(label, value)| {
        Line::from(vec![
            Span::styled(
                format!("{label}: "),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(value.as_str()),
        ])
    })
    .collect()
}

/// Draws the favorites list (right).
fn draw_favorites(frame: &mut Frame, area: Rect, state: &mut AppState, now: Instant) {
    let border_style = if state.active_pane == ActivePane::Favorites {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = state
        .favorites
        .iter()
        .map(|fav| {
            let offset = usize::from(state.slide_offset(&fav.title, now));
            let style = if state.favorites.is_animating(&fav.title) {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{}{}", " ".repeat(offset), fav.heading())).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Your Favorite Movies ({}) ", state.favorites.len()))
                .border_style(border_style),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::REVERSED),
        );

    frame.render_stateful_widget(list, area, &mut state.favorites_list_state);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let help_text = match state.active_pane {
        ActivePane::Form => Line::from(
            "Tab: next field  Enter: search  Ctrl+F: favorite  Ctrl+O: poster  Esc: quit",
        ),
        ActivePane::Favorites => Line::from(
            "Tab: form  \u{2191}\u{2193}/j/k: move  d/Del: remove  o: poster  Ctrl+F: favorite  q: quit",
        ),
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use cinefav_api::omdb::Lookup;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::form::SearchForm;
    use crate::messages::Locale;

    fn render(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|frame| draw(frame, state, Instant::now()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn inception() -> MovieRecord {
        MovieRecord {
            title: String::from("Inception"),
            year: String::from("2010"),
            imdb_rating: String::from("8.8"),
            runtime: String::from("148 min"),
            director: String::from("Christopher Nolan"),
            ..MovieRecord::default()
        }
    }

    #[test]
    fn test_card_shows_heading_and_fields() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::new("Inception", "7"));
        let ticket = state.submit().unwrap();
        state.apply_result(ticket.generation, Ok(Lookup::Found(inception())));

        // Act
        let screen = render(&mut state);

        // Assert
        assert!(screen.contains("Inception (2010)"));
        assert!(screen.contains("Rating: 8.8"));
        assert!(screen.contains("Christopher Nolan"));
        assert!(screen.contains("Add to Favorites"));
    }

    #[test]
    fn test_not_found_shows_error_without_card() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::new("Zzznotfilm", "5"));
        let ticket = state.submit().unwrap();
        state.apply_result(
            ticket.generation,
            Ok(Lookup::NotFound {
                reason: String::from("Movie not found!"),
            }),
        );

        // Act
        let screen = render(&mut state);

        // Assert
        assert!(screen.contains("Movie not found"));
        assert!(!screen.contains("Add to Favorites"));
    }

    #[test]
    fn test_loading_indicator() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::new("Inception", "7"));
        let _ticket = state.submit().unwrap();

        // Act
        let screen = render(&mut state);

        // Assert
        assert!(screen.contains("Loading..."));
    }

    #[test]
    fn test_invalid_submit_while_loading_shows_error() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::new("Inception", "7"));
        let ticket = state.submit().unwrap();
        state.form = SearchForm::new("I", "7");
        assert!(state.submit().is_none());

        // Act
        let during = render(&mut state);
        state.apply_result(ticket.generation, Ok(Lookup::Found(inception())));
        let after = render(&mut state);

        // Assert
        assert!(during.contains("Loading..."));
        assert!(during.contains("Please enter valid data."));
        assert!(!after.contains("Loading..."));
        assert!(after.contains("Please enter valid data."));
    }

    #[test]
    fn test_favorites_list_and_remove_label() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::new("Inception", "7"));
        let ticket = state.submit().unwrap();
        state.apply_result(ticket.generation, Ok(Lookup::Found(inception())));
        state.toggle_current_favorite(Instant::now());

        // Act
        let screen = render(&mut state);

        // Assert
        assert!(screen.contains("Your Favorite Movies (1)"));
        assert!(screen.contains("Remove from Favorites"));
    }
}
