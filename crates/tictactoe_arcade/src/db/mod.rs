//! SQLite persistence for match records.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::StorageError;
pub use repository::MatchRepository;
