pub mod estimation_request;
