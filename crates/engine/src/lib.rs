//! `cheflist-engine` — Supplier catalog reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded catalog and order content,
//! returns per-supplier purchase orders and a consolidated quote.
//! No CLI dependencies; file paths never cross this boundary.

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod similarity;

pub use catalog::Catalog;
pub use config::RunConfig;
pub use engine::{load_catalog, load_order, run};
pub use error::EngineError;
pub use model::{MatchOutcome, Order, RunResult};
