//! Account management module
//!
//! In-memory ledger store: the [`Account`] entity, the [`AccountRepository`]
//! seam consumed by the transfer engine, and boundary field validation.

pub mod models;
pub mod repository;
pub mod validation;

// Re-export commonly used types
pub use models::Account;
pub use repository::{AccountRepository, InMemoryAccountRepository, RepositoryError};
pub use validation::{ValidationError, validate_account_id, validate_non_negative};
