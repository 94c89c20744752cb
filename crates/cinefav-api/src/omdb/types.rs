//! OMDb API response types.

use serde::{Deserialize, Serialize};

/// Value of the `Response` field for a positive match.
const RESPONSE_TRUE: &str = "True";

/// A movie as returned by the provider.
///
/// Fields are kept verbatim (including values such as `"N/A"`).
/// Missing fields deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieRecord {
    /// Movie title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year (may be a range for series, e.g. `"2011–2019"`).
    #[serde(rename = "Year")]
    pub year: String,
    /// IMDb rating (e.g. `"8.8"`).
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    /// Runtime (e.g. `"148 min"`).
    #[serde(rename = "Runtime")]
    pub runtime: String,
    /// Director name(s).
    #[serde(rename = "Director")]
    pub director: String,
    /// Comma-separated lead actors.
    #[serde(rename = "Actors")]
    pub actors: String,
    /// Short plot.
    #[serde(rename = "Plot")]
    pub plot: String,
    /// Poster image URL.
    #[serde(rename = "Poster")]
    pub poster: String,
}

impl MovieRecord {
    /// Returns the card heading, e.g. `"Inception (2010)"`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }
}

/// Raw body of a title lookup (`?t=`).
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbResponse {
    /// `"True"` on a match, `"False"` otherwise.
    #[serde(rename = "Response")]
    pub response: String,
    /// Provider error text, present when `response` is `"False"`.
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    /// Movie fields (empty when `response` is `"False"`).
    #[serde(flatten)]
    pub record: MovieRecord,
}

impl OmdbResponse {
    /// Converts the raw body into a [`Lookup`].
    #[must_use]
    pub fn into_lookup(self) -> Lookup {
        if self.response == RESPONSE_TRUE {
            Lookup::Found(self.record)
        } else {
            Lookup::NotFound {
                reason: self.error.unwrap_or_default(),
            }
        }
    }
}

/// Outcome of a successful provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The provider matched the title.
    Found(MovieRecord),
    /// The provider answered `Response: "False"`.
    NotFound {
        /// Provider error text (e.g. `"Movie not found!"`).
        reason: String,
    },
}
