//! Movie metadata client library for cinefav.
//!
//! Provides a client for the OMDb title lookup API.

/// OMDb API client.
pub mod omdb;
