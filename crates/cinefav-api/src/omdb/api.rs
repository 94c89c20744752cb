//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::Lookup;

/// Movie metadata provider trait.
///
/// Abstracts the provider for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait;
/// the TUI requires the `Send` variant to run lookups on a spawned task.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// Looks up a single movie by its exact title.
    ///
    /// A provider-side "not found" is a successful call returning
    /// [`Lookup::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the provider answers
    /// with a non-success status, or the body is not valid JSON.
    async fn lookup_title(&self, title: &str) -> Result<Lookup>;
}
