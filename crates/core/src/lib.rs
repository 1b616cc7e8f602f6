//! Domain building blocks shared by the database and API crates.
//!
//! Nothing in here touches the store or HTTP.

pub mod error;
pub mod pagination;
pub mod status;
pub mod types;
