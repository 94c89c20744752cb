//! Favorites list with per-title enter-animation flags.

use std::collections::HashMap;

use cinefav_api::omdb::MovieRecord;

/// Ordered favorites, unique on exact (case-sensitive) title.
///
/// Lives for one session only. Each added title carries a "just added"
/// flag that the UI clears once the enter transition has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    /// Entries in insertion order.
    entries: Vec<MovieRecord>,
    /// Title -> "just added".
    animations: HashMap<String, bool>,
}

impl Favorites {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if an entry with the same title exists.
    #[must_use]
    pub fn is_favorite(&self, record: &MovieRecord) -> bool {
        self.position(&record.title).is_some()
    }

    /// Appends `record` unless its title is already present.
    ///
    /// Returns `true` if the record was added.
    pub fn add(&mut self, record: MovieRecord) -> bool {
        if self.is_favorite(&record) {
            return false;
        }
        tracing::debug!(title = %record.title, "adding favorite");
        self.animations.insert(record.title.clone(), true);
        self.entries.push(record);
        true
    }

    /// Removes the entry whose title matches `record`.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove(&mut self, record: &MovieRecord) -> bool {
        let Some(index) = self.position(&record.title) else {
            return false;
        };
        tracing::debug!(title = %record.title, "removing favorite");
        self.entries.remove(index);
        self.animations.remove(&record.title);
        true
    }

    /// Adds `record` if absent, removes it otherwise. Returns `true` if added.
    pub fn toggle(&mut self, record: &MovieRecord) -> bool {
        if self.remove(record) {
            false
        } else {
            self.add(record.clone())
        }
    }

    /// Marks the enter transition of `title` as finished.
    pub fn clear_animation(&mut self, title: &str) {
        if let Some(flag) = self.animations.get_mut(title) {
            *flag = false;
        }
    }

    /// Returns `true` while `title` is still flagged as just added.
    #[must_use]
    pub fn is_animating(&self, title: &str) -> bool {
        self.animations.get(title).copied().unwrap_or(false)
    }

    /// Returns the entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MovieRecord> {
        self.entries.get(index)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MovieRecord> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|fav| fav.title == title)
    }
}
