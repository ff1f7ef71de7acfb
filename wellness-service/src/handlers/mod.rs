pub mod analysis;
pub mod chat;
pub mod health;
pub mod plans;

pub use analysis::analyze_image;
pub use chat::chat;
pub use health::{health_check, liveness, metrics_endpoint, readiness_check};
pub use plans::{daily_plan, weekly_summary};
