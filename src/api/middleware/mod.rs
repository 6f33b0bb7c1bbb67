//! API middleware.

pub mod audit;
