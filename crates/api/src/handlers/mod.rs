//! Request handlers.
//!
//! Handlers open a per-request `ProductContext`, delegate to it, and map
//! outcomes via [`AppError`](crate::error::AppError).

pub mod product;
