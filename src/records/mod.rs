//! Health records: typed payloads, status labels and client-side filtering

pub mod filter;
pub mod ids;
pub mod models;
pub mod status;

pub use filter::{search, with_status, Searchable};
pub use models::*;
pub use status::Status;
