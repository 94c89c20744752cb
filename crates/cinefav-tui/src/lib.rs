//! Movie search and favorites for cinefav.
//!
//! The form, search controller and favorites list are plain state types
//! usable without a terminal; [`app`] wires them into a `ratatui` UI.

/// Interactive terminal application.
pub mod app;
/// Session-scoped favorites list.
pub mod favorites;
/// Title and minimum-rating input form.
pub mod form;
/// Localized user-visible messages.
pub mod messages;
/// Search controller and its error kinds.
pub mod search;

pub use app::run_movie_search;
pub use favorites::Favorites;
pub use form::{FormField, SearchForm, SearchQuery, ValidationError};
pub use messages::Locale;
pub use search::{SearchController, SearchError, SearchTicket};
