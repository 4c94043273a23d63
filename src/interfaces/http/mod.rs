//! HTTP REST API
//!
//! - `common`: response envelope and validated JSON extractor
//! - `modules`: handlers per resource
//! - `router`: route table with CORS and request tracing

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
