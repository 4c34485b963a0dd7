//! Saved quotations and their CRM status.

pub mod document;
pub mod models;
pub mod queries;
pub mod routes;
pub mod services;

pub use models::{QuoteRecord, QuoteStatus};
pub use routes::router;
