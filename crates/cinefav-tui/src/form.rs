//! Search form state and validation.

use thiserror::Error;

/// Minimum title length, in characters.
pub const MIN_TITLE_LEN: usize = 2;

/// Lowest accepted minimum rating.
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted minimum rating.
pub const MAX_RATING: f64 = 10.0;

/// Why the form cannot be submitted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Title is shorter than [`MIN_TITLE_LEN`].
    #[error("title must be at least {MIN_TITLE_LEN} characters (got {0})")]
    TitleTooShort(usize),
    /// Rating field is empty or not a finite number.
    #[error("minimum rating must be a number (got {0:?})")]
    RatingNotANumber(String),
    /// Rating is outside `[MIN_RATING, MAX_RATING]`.
    #[error("minimum rating must be between 0 and 10 (got {0})")]
    RatingOutOfRange(f64),
}

/// Which input currently receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// Movie title input.
    #[default]
    Title,
    /// Minimum rating input.
    MinRating,
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Title sent to the provider, exactly as typed.
    pub title: String,
    /// Parsed minimum rating. Validated but not applied to results.
    pub min_rating: f64,
}

/// Form with a title and a minimum-rating field, both raw text.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchForm {
    /// Title text.
    pub title: String,
    /// Minimum rating text.
    pub min_rating: String,
    /// Focused field.
    pub focus: FormField,
}

impl SearchForm {
    /// Creates a form pre-filled with the given values.
    #[must_use]
    pub fn new(title: impl Into<String>, min_rating: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            min_rating: min_rating.into(),
            focus: FormField::Title,
        }
    }

    /// Validates both fields.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule: title length, then rating.
    pub fn validate(&self) -> Result<SearchQuery, ValidationError> {
        let title_len = self.title.chars().count();
        if title_len < MIN_TITLE_LEN {
            return Err(ValidationError::TitleTooShort(title_len));
        }

        let raw = self.min_rating.trim();
        let min_rating = raw
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite())
            .ok_or_else(|| ValidationError::RatingNotANumber(self.min_rating.clone()))?;
        if !(MIN_RATING..=MAX_RATING).contains(&min_rating) {
            return Err(ValidationError::RatingOutOfRange(min_rating));
        }

        Ok(SearchQuery {
            title: self.title.clone(),
            min_rating,
        })
    }

    /// Returns `true` when the submit action is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    /// Moves focus to the other field.
    pub const fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::MinRating,
            FormField::MinRating => FormField::Title,
        };
    }

    /// Appends a character to the focused field.
    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    /// Removes the last character of the focused field.
    pub fn pop_char(&mut self) {
        self.focused_mut().pop();
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::MinRating => &mut self.min_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_valid_form() {
        // Arrange
        let form = SearchForm::new("Inception", "7");

        // Act
        let query = form.validate().unwrap();

        // Assert
        assert_eq!(query.title, "Inception");
        assert!((query.min_rating - 7.0).abs() < f64::EPSILON);
        assert!(form.can_submit());
    }

    #[test]
    fn test_short_titles_cannot_submit() {
        for title in ["", "a", "Я"] {
            // Arrange
            let form = SearchForm::new(title, "5");

            // Act & Assert
            assert!(!form.can_submit(), "title {title:?}");
            assert!(matches!(
                form.validate(),
                Err(ValidationError::TitleTooShort(_))
            ));
        }
    }

    #[test]
    fn test_two_char_title_is_counted_in_chars() {
        // Arrange: two Cyrillic letters are four bytes
        let form = SearchForm::new("Он", "5");

        // Act & Assert
        assert!(form.can_submit());
    }

    #[test]
    fn test_ratings_out_of_range_cannot_submit() {
        for rating in ["-0.5", "-1", "10.01", "11", "100"] {
            // Arrange
            let form = SearchForm::new("Inception", rating);

            // Act & Assert
            assert!(!form.can_submit(), "rating {rating:?}");
            assert!(matches!(
                form.validate(),
                Err(ValidationError::RatingOutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_rating_bounds_are_inclusive() {
        for rating in ["0", "10", "7.5", " 3 "] {
            // Arrange
            let form = SearchForm::new("Inception", rating);

            // Act & Assert
            assert!(form.can_submit(), "rating {rating:?}");
        }
    }

    #[test]
    fn test_non_numeric_rating_cannot_submit() {
        for rating in ["", "seven", "NaN", "inf"] {
            // Arrange
            let form = SearchForm::new("Inception", rating);

            // Act & Assert
            assert!(matches!(
                form.validate(),
                Err(ValidationError::RatingNotANumber(_))
            ));
        }
    }

    #[test]
    fn test_editing_follows_focus() {
        // Arrange
        let mut form = SearchForm::default();

        // Act
        form.push_char('U');
        form.push_char('p');
        form.toggle_focus();
        form.push_char('8');
        form.push_char('x');
        form.pop_char();

        // Assert
        assert_eq!(form.title, "Up");
        assert_eq!(form.min_rating, "8");
        assert_eq!(form.focus, FormField::MinRating);
    }

    #[test]
    fn test_error_message_names_the_rule() {
        // Arrange
        let form = SearchForm::new("a", "5");

        // Act
        let err = form.validate().unwrap_err();

        // Assert
        assert_eq!(
            err.to_string(),
            "title must be at least 2 characters (got 1)"
        );
    }
}
