//! Route declarations

pub mod books;
pub mod health;
