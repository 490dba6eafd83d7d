//! Domain types and validation for the pallet marketplace.
//!
//! This crate has no internal dependencies so it can be used by the
//! repository layer, the API layer, and any future CLI tooling.

pub mod approval;
pub mod error;
pub mod listing;
pub mod pagination;
pub mod types;
