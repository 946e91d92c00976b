//! Domain models for the book catalog

pub mod book;
pub mod validation;

pub use book::{Book, BookDraft};
pub use validation::ValidationError;
