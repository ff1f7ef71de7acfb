pub mod analysis;
pub mod chat;
pub mod plans;

pub use analysis::AnalysisResponse;
pub use chat::{ChatRequest, ChatResponse};
pub use plans::{PlanResponse, ResponseSource};
