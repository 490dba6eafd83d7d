//! Row models and request/response DTOs for the storage layer.
//!
//! Each submodule covers one table: row structs derive `FromRow`, create
//! and update DTOs are sparse `Option<T>` structs with merge semantics
//! defined in the corresponding repository.

pub mod approval;
pub mod listing;
pub mod user;
