//! Repositories: one zero-sized struct per table, with explicit column
//! lists and bind-by-position queries.

pub mod approval_repo;
pub mod listing_repo;
pub mod user_repo;

pub use approval_repo::ApprovalRepo;
pub use listing_repo::ListingRepo;
pub use user_repo::UserRepo;
