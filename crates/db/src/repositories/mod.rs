//! Repositories over the store. Each operation runs in its own session.

mod estimation_request_repo;

pub use estimation_request_repo::EstimationRequestRepo;
