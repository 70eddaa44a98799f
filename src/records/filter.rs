//! Client-side search and filtering over fetched rows

use crate::records::Status;

/// A row that can be matched against a free-text query
pub trait Searchable {
    /// Text fields the query is matched against
    fn search_fields(&self) -> Vec<&str>;

    fn status(&self) -> Option<&Status> {
        None
    }

    /// Case-insensitive substring match on any field. Blank queries match.
    fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Keep rows matching `query`
pub fn search<T: Searchable>(rows: Vec<T>, query: &str) -> Vec<T> {
    rows.into_iter().filter(|row| row.matches(query)).collect()
}

/// Keep rows whose status equals `status`. Rows without a status are dropped.
pub fn with_status<T: Searchable>(rows: Vec<T>, status: &Status) -> Vec<T> {
    rows.into_iter()
        .filter(|row| row.status() == Some(status))
        .collect()
}
