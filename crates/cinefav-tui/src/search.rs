//! Search controller: one logical request at a time, latest wins.

use cinefav_api::omdb::{LocalMovieApi, Lookup, MovieRecord};
use thiserror::Error;

use crate::form::{SearchForm, SearchQuery, ValidationError};
use crate::messages::Locale;

/// Failure of a search action.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum SearchError {
    /// Input rejected before any request was issued.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Provider answered `Response: "False"`.
    #[error("movie not found: {reason}")]
    NotFound {
        /// Provider error text.
        reason: String,
    },
    /// Network, HTTP status or JSON decoding failure.
    #[error("request failed: {0}")]
    Transport(String),
    /// A newer search was started before this one resolved.
    #[error("search #{generation} superseded by #{latest}")]
    Superseded {
        /// Generation of the discarded result.
        generation: u64,
        /// Generation currently awaited.
        latest: u64,
    },
}

/// Handle for a started search.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchTicket {
    /// Monotonic id; only the latest ticket's result is applied.
    pub generation: u64,
    /// Validated query to send.
    pub query: SearchQuery,
}

/// Loading, error and result state of the search card.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchController {
    locale: Locale,
    generation: u64,
    current_movie: Option<MovieRecord>,
    error_message: Option<String>,
    is_loading: bool,
}

impl SearchController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    /// Last found movie, if any.
    #[must_use]
    pub const fn current_movie(&self) -> Option<&MovieRecord> {
        self.current_movie.as_ref()
    }

    /// User-visible error text, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// `true` while the latest request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Movie to show as a card: present only while no error is displayed.
    #[must_use]
    pub fn visible_movie(&self) -> Option<&MovieRecord> {
        if self.error_message.is_some() {
            return None;
        }
        self.current_movie.as_ref()
    }

    /// Starts a search from the form.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Validation`] and sets the invalid-input message
    /// when the form does not validate. No request must be issued then.
    pub fn begin(&mut self, form: &SearchForm) -> Result<SearchTicket, SearchError> {
        let query = match form.validate() {
            Ok(query) => query,
            Err(err) => {
                tracing::debug!(error = %err, "search rejected by validation");
                self.error_message = Some(String::from(self.locale.invalid_input()));
                return Err(err.into());
            }
        };

        self.generation = self.generation.wrapping_add(1);
        self.is_loading = true;
        self.error_message = None;
        tracing::info!(
            generation = self.generation,
            title = %query.title,
            min_rating = query.min_rating,
            "searching for movie"
        );

        Ok(SearchTicket {
            generation: self.generation,
            query,
        })
    }

    /// Applies the provider outcome of the search `generation`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Superseded`] if a newer search was started; state is untouched.
    /// - [`SearchError::NotFound`] on a negative match.
    /// - [`SearchError::Transport`] if the request failed.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: anyhow::Result<Lookup>,
    ) -> Result<&MovieRecord, SearchError> {
        if generation != self.generation {
            tracing::debug!(generation, latest = self.generation, "discarding stale result");
            return Err(SearchError::Superseded {
                generation,
                latest: self.generation,
            });
        }

        self.is_loading = false;
        match outcome {
            Ok(Lookup::Found(record)) => {
                // an error set since `begin` came from a later rejected submit
                tracing::info!(title = %record.title, year = %record.year, "movie found");
                Ok(self.current_movie.insert(record))
            }
            Ok(Lookup::NotFound { reason }) => {
                tracing::info!(%reason, "movie not found");
                self.current_movie = None;
                self.error_message = Some(String::from(self.locale.not_found()));
                Err(SearchError::NotFound { reason })
            }
            Err(err) => {
                let detail = format!("{err:#}");
                tracing::warn!(error = %detail, "movie request failed");
                self.current_movie = None;
                self.error_message = Some(String::from(self.locale.request_failed()));
                Err(SearchError::Transport(detail))
            }
        }
    }

    /// Runs a whole search against `api` and waits for the result.
    ///
    /// # Errors
    ///
    /// See [`Self::begin`] and [`Self::complete`].
    #[allow(clippy::future_not_send)]
    pub async fn search<A: LocalMovieApi>(
        &mut self,
        api: &A,
        form: &SearchForm,
    ) -> Result<&MovieRecord, SearchError> {
        let ticket = self.begin(form)?;
        let outcome = api.lookup_title(&ticket.query.title).await;
        self.complete(ticket.generation, outcome)
    }
}
