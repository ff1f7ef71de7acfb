pub mod database;
pub mod metrics;
pub mod providers;
pub mod store;

pub use database::PgStore;
pub use metrics::render_metrics;
pub use store::{MemoryStore, Store};
