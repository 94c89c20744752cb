//! Movie search TUI state management.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use cinefav_api::omdb::{Lookup, MovieRecord};
use ratatui::widgets::ListState;

use crate::favorites::Favorites;
use crate::form::{FormField, SearchForm};
use crate::messages::Locale;
use crate::search::{SearchController, SearchTicket};

/// Length of the slide-in transition of a newly added favorite.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(600);

/// Columns a new favorite row travels during the slide-in.
pub const SLIDE_COLUMNS: u16 = 12;

/// Currently focused pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    /// Search form (title / rating inputs).
    Form,
    /// Favorites list (right).
    Favorites,
}

/// State for the movie search TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct AppState {
    /// Input form.
    pub form: SearchForm,
    /// Loading / error / result state.
    pub search: SearchController,
    /// Favorites added this session.
    pub favorites: Favorites,
    /// Currently focused pane.
    pub active_pane: ActivePane,
    /// List state for the favorites pane (selection and scroll).
    pub favorites_list_state: ListState,
    /// Start of the running slide-in per title.
    animation_started: HashMap<String, Instant>,
}

impl AppState {
    /// Creates the initial state with a pre-filled form.
    #[must_use]
    pub fn new(locale: Locale, form: SearchForm) -> Self {
        Self {
            form,
            search: SearchController::new(locale),
            favorites: Favorites::new(),
            active_pane: ActivePane::Form,
            favorites_list_state: ListState::default(),
            animation_started: HashMap::new(),
        }
    }

    /// Moves focus: title -> rating -> favorites -> title.
    pub fn focus_next(&mut self) {
        match (self.active_pane, self.form.focus) {
            (ActivePane::Form, FormField::Title) => self.form.toggle_focus(),
            (ActivePane::Form, FormField::MinRating) => {
                self.active_pane = ActivePane::Favorites;
                self.clamp_selection();
            }
            (ActivePane::Favorites, _) => {
                self.active_pane = ActivePane::Form;
                self.form.focus = FormField::Title;
            }
        }
    }

    /// Starts a search from the current form contents.
    ///
    /// Returns `None` if validation failed (the error message is set).
    pub fn submit(&mut self) -> Option<SearchTicket> {
        self.search.begin(&self.form).ok()
    }

    /// Applies a provider outcome. Stale and failed outcomes only update
    /// the controller's message state.
    pub fn apply_result(&mut self, generation: u64, outcome: anyhow::Result<Lookup>) {
        if let Err(err) = self.search.complete(generation, outcome) {
            tracing::debug!(error = %err, "search finished without a result");
        }
    }

    /// Adds the displayed movie to favorites, or removes it if present.
    pub fn toggle_current_favorite(&mut self, now: Instant) {
        let Some(movie) = self.search.visible_movie().cloned() else {
            return;
        };
        if self.favorites.toggle(&movie) {
            self.animation_started.insert(movie.title, now);
        } else {
            self.animation_started.remove(&movie.title);
        }
        self.clamp_selection();
    }

    /// Removes the favorite under the cursor.
    pub fn remove_selected_favorite(&mut self) {
        let Some(movie) = self.selected_favorite().cloned() else {
            return;
        };
        self.favorites.remove(&movie);
        self.animation_started.remove(&movie.title);
        self.clamp_selection();
    }

    /// Returns the favorite under the cursor.
    #[must_use]
    pub fn selected_favorite(&self) -> Option<&MovieRecord> {
        self.favorites
            .get(self.favorites_list_state.selected().unwrap_or(0))
    }

    /// Moves the favorites cursor up.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_up(&mut self) {
        let current = self.favorites_list_state.selected().unwrap_or(0);
        if current > 0 {
            self.favorites_list_state.select(Some(current - 1));
        }
    }

    /// Moves the favorites cursor down.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self) {
        let current = self.favorites_list_state.selected().unwrap_or(0);
        if current + 1 < self.favorites.len() {
            self.favorites_list_state.select(Some(current + 1));
        }
    }

    /// Ends slide-in transitions that have run for [`ANIMATION_DURATION`].
    pub fn tick(&mut self, now: Instant) {
        let finished: Vec<String> = self
            .animation_started
            .iter()
            .filter(|(_, started)| now.saturating_duration_since(**started) >= ANIMATION_DURATION)
            .map(|(title, _)| title.clone())
            .collect();
        for title in finished {
            self.animation_started.remove(&title);
            self.favorites.clear_animation(&title);
        }
    }

    /// Left padding of a favorite row during its slide-in (0 when settled).
    #[must_use]
    pub fn slide_offset(&self, title: &str, now: Instant) -> u16 {
        if !self.favorites.is_animating(title) {
            return 0;
        }
        let Some(started) = self.animation_started.get(title) else {
            return 0;
        };
        let remaining = ANIMATION_DURATION.saturating_sub(now.saturating_duration_since(*started));
        let columns = u128::from(SLIDE_COLUMNS).saturating_mul(remaining.as_millis())
            / ANIMATION_DURATION.as_millis().max(1);
        u16::try_from(columns).unwrap_or(SLIDE_COLUMNS)
    }

    /// Keeps the favorites selection inside the list bounds.
    #[allow(clippy::arithmetic_side_effects)]
    fn clamp_selection(&mut self) {
        let len = self.favorites.len();
        if len == 0 {
            self.favorites_list_state.select(None);
            return;
        }
        let current = self.favorites_list_state.selected().unwrap_or(0);
        self.favorites_list_state.select(Some(current.min(len - 1)));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::arithmetic_side_effects)]

    use super::*;

    fn movie(title: &str, year: &str) -> MovieRecord {
        MovieRecord {
            title: String::from(title),
            year: String::from(year),
            ..MovieRecord::default()
        }
    }

    fn found_state(title: &str, year: &str) -> AppState {
        let mut state = AppState::new(Locale::En, SearchForm::new(title, "7"));
        let ticket = state.submit().unwrap();
        state.apply_result(ticket.generation, Ok(Lookup::Found(movie(title, year))));
        state
    }

    #[test]
    fn test_initial_state() {
        // Arrange & Act
        let state = AppState::new(Locale::En, SearchForm::default());

        // Assert
        assert_eq!(state.active_pane, ActivePane::Form);
        assert_eq!(state.form.focus, FormField::Title);
        assert!(state.favorites.is_empty());
        assert!(state.selected_favorite().is_none());
    }

    #[test]
    fn test_focus_cycle() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::default());

        // Act & Assert
        state.focus_next();
        assert_eq!(state.form.focus, FormField::MinRating);
        state.focus_next();
        assert_eq!(state.active_pane, ActivePane::Favorites);
        state.focus_next();
        assert_eq!(state.active_pane, ActivePane::Form);
        assert_eq!(state.form.focus, FormField::Title);
    }

    #[test]
    fn test_submit_invalid_form_sets_error() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::new("I", "7"));

        // Act
        let ticket = state.submit();

        // Assert
        assert!(ticket.is_none());
        assert!(state.search.error_message().is_some());
        assert!(!state.search.is_loading());
    }

    #[test]
    fn test_toggle_current_favorite() {
        // Arrange
        let mut state = found_state("Inception", "2010");
        let now = Instant::now();

        // Act
        state.toggle_current_favorite(now);

        // Assert
        assert_eq!(state.favorites.len(), 1);
        assert!(state.favorites.is_animating("Inception"));
        assert_eq!(state.favorites_list_state.selected(), Some(0));

        // Act: toggling again removes it
        state.toggle_current_favorite(now);

        // Assert
        assert!(state.favorites.is_empty());
        assert_eq!(state.favorites_list_state.selected(), None);
    }

    #[test]
    fn test_toggle_without_card_is_noop() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::default());

        // Act
        state.toggle_current_favorite(Instant::now());

        // Assert
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn test_tick_clears_animation_after_duration() {
        // Arrange
        let mut state = found_state("Inception", "2010");
        let start = Instant::now();
        state.toggle_current_favorite(start);

        // Act
        state.tick(start + ANIMATION_DURATION / 2);
        let mid = state.favorites.is_animating("Inception");
        state.tick(start + ANIMATION_DURATION);

        // Assert
        assert!(mid);
        assert!(!state.favorites.is_animating("Inception"));
        assert_eq!(state.slide_offset("Inception", start + ANIMATION_DURATION), 0);
    }

    #[test]
    fn test_slide_offset_decreases() {
        // Arrange
        let mut state = found_state("Inception", "2010");
        let start = Instant::now();
        state.toggle_current_favorite(start);

        // Act
        let at_start = state.slide_offset("Inception", start);
        let halfway = state.slide_offset("Inception", start + ANIMATION_DURATION / 2);

        // Assert
        assert_eq!(at_start, SLIDE_COLUMNS);
        assert_eq!(halfway, SLIDE_COLUMNS / 2);
    }

    #[test]
    fn test_remove_selected_favorite_keeps_cursor_in_bounds() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::default());
        state.favorites.add(movie("Alien", "1979"));
        state.favorites.add(movie("Aliens", "1986"));
        state.active_pane = ActivePane::Favorites;
        state.favorites_list_state.select(Some(1));

        // Act
        state.remove_selected_favorite();

        // Assert
        assert_eq!(state.favorites.len(), 1);
        assert_eq!(state.favorites_list_state.selected(), Some(0));
        assert_eq!(
            state.selected_favorite().map(|m| m.title.as_str()),
            Some("Alien")
        );
    }

    #[test]
    fn test_move_down_up() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::default());
        state.favorites.add(movie("A", "2001"));
        state.favorites.add(movie("B", "2002"));
        state.favorites_list_state.select(Some(0));

        // Act & Assert
        state.move_down();
        assert_eq!(state.favorites_list_state.selected(), Some(1));
        state.move_down();
        assert_eq!(state.favorites_list_state.selected(), Some(1));
        state.move_up();
        state.move_up();
        assert_eq!(state.favorites_list_state.selected(), Some(0));
    }

    #[test]
    fn test_stale_result_does_not_replace_card() {
        // Arrange
        let mut state = AppState::new(Locale::En, SearchForm::new("Alien", "5"));
        let first = state.submit().unwrap();
        state.form = SearchForm::new("Inception", "7");
        let second = state.submit().unwrap();

        // Act
        state.apply_result(second.generation, Ok(Lookup::Found(movie("Inception", "2010"))));
        state.apply_result(first.generation, Ok(Lookup::Found(movie("Alien", "1979"))));

        // Assert
        assert_eq!(
            state.search.visible_movie().map(MovieRecord::heading),
            Some(String::from("Inception (2010)"))
        );
    }
}
