//! OMDb API client module.
//!
//! Sends title lookups to an OMDb-compatible endpoint and maps the
//! `Response` flag of the JSON body to a found record or a not-found result.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMovieApi, MovieApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, OmdbClient, OmdbClientBuilder};
pub use types::{Lookup, MovieRecord, OmdbResponse};
