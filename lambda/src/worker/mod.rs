//! Worker Lambda handler and the summarization pipeline

pub mod handler;
pub mod poll;
pub mod response;
pub mod summarize;

// Re-export the main handler for convenience
pub use handler::handler;
