//! Delivery/reception store: one delivery record per (message,
//! recipient) pair, each with its own lifecycle state and optional
//! folder placement.

mod repository;
mod types;

pub use repository::ReceptionRepository;
pub use types::{Reception, ReceptionDetail, ReceptionState, ReceptionStats};
