//! Movie search TUI main loop.

/// Movie search state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use cinefav_api::omdb::{Lookup, MovieApi};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use self::state::{ActivePane, AppState};
use crate::form::SearchForm;
use crate::messages::Locale;
use crate::search::SearchTicket;

/// Idle sleep between terminal polls; also drives the slide-in animation.
const TICK_INTERVAL: Duration = Duration::from_millis(30);

/// Provider outcome tagged with the search it belongs to.
#[derive(Debug)]
struct SearchResult {
    generation: u64,
    outcome: Result<Lookup>,
}

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq)]
enum Action {
    /// Nothing beyond the state change already applied.
    None,
    /// Leave the TUI.
    Quit,
    /// Send the ticket's query to the provider.
    Search(SearchTicket),
    /// Open a URL in the system browser.
    Open(String),
}

/// Runs the movie search TUI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails. Search
/// failures are shown in the UI and never end the session.
#[allow(clippy::module_name_repetitions)]
pub async fn run_movie_search<A>(api: Arc<A>, locale: Locale, form: SearchForm) -> Result<()>
where
    A: MovieApi + Send + Sync + 'static,
{
    let mut state = AppState::new(locale, form);
    let (tx, mut rx) = unbounded_channel();

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, &api, &tx, &mut rx).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    tracing::info!(favorites = state.favorites.len(), "session ended");
    result
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    api: &Arc<A>,
    tx: &UnboundedSender<SearchResult>,
    rx: &mut UnboundedReceiver<SearchResult>,
) -> Result<()>
where
    A: MovieApi + Send + Sync + 'static,
{
    loop {
        while let Ok(result) = rx.try_recv() {
            state.apply_result(result.generation, result.outcome);
        }

        let now = Instant::now();
        state.tick(now);
        terminal
            .draw(|frame| ui::draw(frame, state, now))
            .context("failed to draw TUI")?;

        if !event::poll(Duration::ZERO).context("failed to poll events")? {
            tokio::time::sleep(TICK_INTERVAL).await;
            continue;
        }

        if let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            match handle_key(state, key, Instant::now()) {
                Action::Quit => return Ok(()),
                Action::Search(ticket) => spawn_search(api, tx, ticket),
                Action::Open(url) => open_url(&url),
                Action::None => {}
            }
        }
    }
}

/// Sends the query on a background task; the result comes back over `tx`.
fn spawn_search<A>(api: &Arc<A>, tx: &UnboundedSender<SearchResult>, ticket: SearchTicket)
where
    A: MovieApi + Send + Sync + 'static,
{
    let api = Arc::clone(api);
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = api.lookup_title(&ticket.query.title).await;
        let result = SearchResult {
            generation: ticket.generation,
            outcome,
        };
        if tx.send(result).is_err() {
            tracing::debug!(generation = ticket.generation, "UI closed before search finished");
        }
    });
}

/// Dispatches a key press to the focused pane.
fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return Action::Quit,
        KeyCode::Char('c') if ctrl => return Action::Quit,
        KeyCode::Char('f') if ctrl => {
            state.toggle_current_favorite(now);
            return Action::None;
        }
        KeyCode::Char('o') if ctrl => {
            return poster_action(state.search.visible_movie().map(|m| m.poster.as_str()));
        }
        KeyCode::Tab => {
            state.focus_next();
            return Action::None;
        }
        _ => {}
    }

    match state.active_pane {
        ActivePane::Form => handle_form_input(state, key.code, ctrl),
        ActivePane::Favorites => handle_favorites_input(state, key.code),
    }
}

/// Handles key input in the form. Enter on an invalid form shows the error.
fn handle_form_input(state: &mut AppState, key: KeyCode, ctrl: bool) -> Action {
    match key {
        KeyCode::Enter => state.submit().map_or(Action::None, Action::Search),
        KeyCode::Backspace => {
            state.form.pop_char();
            Action::None
        }
        KeyCode::Char(c) if !ctrl => {
            state.form.push_char(c);
            Action::None
        }
        _ => Action::None,
    }
}

/// Handles key input in the favorites list.
fn handle_favorites_input(state: &mut AppState, key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d') => {
            state.remove_selected_favorite();
        }
        KeyCode::Char('o') => {
            return poster_action(state.selected_favorite().map(|m| m.poster.as_str()));
        }
        _ => {}
    }
    Action::None
}

/// Returns an open action for a usable poster URL.
fn poster_action(poster: Option<&str>) -> Action {
    match poster {
        Some(url) if url.starts_with("http") => Action::Open(String::from(url)),
        _ => Action::None,
    }
}

/// Opens `url` in the system browser.
fn open_url(url: &str) {
    if let Err(err) = open::that(url) {
        tracing::warn!(%url, error = %err, "failed to open poster");
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use cinefav_api::omdb::MovieRecord;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(state, press(KeyCode::Char(c)), Instant::now());
        }
    }

    /// Provider that finds every title it is asked for.
    struct EchoApi;

    impl MovieApi for EchoApi {
        async fn lookup_title(&self, title: &str) -> Result<Lookup> {
            Ok(Lookup::Found(MovieRecord {
                title: String::from(title),
                year: String::from("2010"),
                ..MovieRecord::default()
            }))
        }
    }

    fn inception() -> MovieRecord {
        MovieRecord {
            title: String::from("Inception"),
            year: String::from("2010"),
            poster: String::from("https://example.com/inception.jpg"),
            ..MovieRecord::default()
        }
    }

    #[test]
    fn test_typing_then_enter_starts_search() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::default());

        // Act
        type_text(&mut state, "Inception");
        handle_key(&mut state, press(KeyCode::Tab), Instant::now());
        type_text(&mut state, "7");
        let action = handle_key(&mut state, press(KeyCode::Enter), Instant::now());

        // Assert
        let Action::Search(ticket) = action else {
            panic!("expected a search action, got {action:?}");
        };
        assert_eq!(ticket.query.title, "Inception");
        assert!(state.search.is_loading());
    }

    #[test]
    fn test_enter_on_invalid_form_issues_no_search() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::new("I", "7"));

        // Act
        let action = handle_key(&mut state, press(KeyCode::Enter), Instant::now());

        // Assert
        assert_eq!(action, Action::None);
        assert_eq!(state.search.error_message(), Some("Please enter valid data."));
    }

    #[test]
    fn test_quit_keys() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::default());

        // Act & Assert
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Esc), Instant::now()),
            Action::Quit
        );
        assert_eq!(handle_key(&mut state, ctrl('c'), Instant::now()), Action::Quit);
        // 'q' is text while the form is focused
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('q')), Instant::now()),
            Action::None
        );
        assert_eq!(state.form.title, "q");
    }

    #[test]
    fn test_ctrl_f_adds_then_delete_removes() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::new("Inception", "7"));
        let ticket = state.submit().unwrap();
        state.apply_result(ticket.generation, Ok(Lookup::Found(inception())));

        // Act
        handle_key(&mut state, ctrl('f'), Instant::now());
        let added = state.favorites.len();
        state.active_pane = ActivePane::Favorites;
        handle_key(&mut state, press(KeyCode::Char('d')), Instant::now());

        // Assert
        assert_eq!(added, 1);
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn test_open_poster_of_selected_favorite() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::default());
        state.favorites.add(inception());
        state.active_pane = ActivePane::Favorites;

        // Act
        let action = handle_key(&mut state, press(KeyCode::Char('o')), Instant::now());

        // Assert
        assert_eq!(
            action,
            Action::Open(String::from("https://example.com/inception.jpg"))
        );
    }

    #[tokio::test]
    async fn test_spawned_search_reports_back_over_channel() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::new("Inception", "7"));
        let ticket = state.submit().unwrap();
        let (tx, mut rx) = unbounded_channel();

        // Act
        spawn_search(&Arc::new(EchoApi), &tx, ticket.clone());
        let result = rx.recv().await.unwrap();
        state.apply_result(result.generation, result.outcome);

        // Assert
        assert_eq!(result.generation, ticket.generation);
        assert!(!state.search.is_loading());
        assert_eq!(
            state.search.visible_movie().map(MovieRecord::heading),
            Some(String::from("Inception (2010)"))
        );
    }

    #[test]
    fn test_poster_placeholder_is_not_opened() {
        assert_eq!(poster_action(Some("N/A")), Action::None);
        assert_eq!(poster_action(None), Action::None);
    }
}
