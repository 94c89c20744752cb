//! Message catalog for the three user-visible error texts.

use serde::{Deserialize, Serialize};

/// UI language for user-visible messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Russian.
    Ru,
}

impl Locale {
    /// Shown when the form is submitted with invalid input.
    #[must_use]
    pub const fn invalid_input(self) -> &'static str {
        match self {
            Self::En => "Please enter valid data.",
            Self::Ru => "Введите корректные данные.",
        }
    }

    /// Shown when the provider reports no match.
    #[must_use]
    pub const fn not_found(self) -> &'static str {
        match self {
            Self::En => "Movie not found",
            Self::Ru => "Фильм не найден",
        }
    }

    /// Shown on transport or decoding failures.
    #[must_use]
    pub const fn request_failed(self) -> &'static str {
        match self {
            Self::En => "Request failed",
            Self::Ru => "Ошибка запроса",
        }
    }
}
