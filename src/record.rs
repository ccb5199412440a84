use serde::{Deserialize, Serialize};

use crate::config::SENTINEL;

/// One holding as written to `books.json`. No field is ever empty; missing
/// values are the sentinel `-`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub publication_year: String,
    pub registration_number: String,
    pub shelving_date: String,
    pub library: String,
}

impl Default for BookRecord {
    fn default() -> Self {
        Self {
            title: SENTINEL.into(),
            author: SENTINEL.into(),
            publisher: SENTINEL.into(),
            publication_year: SENTINEL.into(),
            registration_number: SENTINEL.into(),
            shelving_date: SENTINEL.into(),
            library: SENTINEL.into(),
        }
    }
}

impl BookRecord {
    pub fn fields(&self) -> [&str; 7] {
        [
            self.title.as_str(),
            self.author.as_str(),
            self.publisher.as_str(),
            self.publication_year.as_str(),
            self.registration_number.as_str(),
            self.shelving_date.as_str(),
            self.library.as_str(),
        ]
    }
}
