//! HTTP surface for the Oneira dream interpretation service.
//!
//! Thin compatibility layer over the engine: route aliases from every
//! deployed client generation, inbound field aliases, per-route response
//! wrapping, environment configuration, and error-to-status mapping.

mod api;
mod config;
mod request;
mod response;

pub use api::{AppState, router};
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PORT, ServiceConfig, ServiceConfigBuilder,
    resolve_model,
};
pub use request::{
    DailyMessageBody, DeepAnalysisBody, DreamTextBody, GlobalAnalysisBody, LifeContextBody,
    SymbolBody,
};
pub use response::ApiError;
