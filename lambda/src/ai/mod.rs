//! Inference API integration

pub mod client;
pub mod output;

pub use client::{JobApi, RunpodClient};
pub use output::normalize_output;
