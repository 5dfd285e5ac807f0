//! Extraction client for the FIRLens backend.
//!
//! Wraps the managed LlamaCloud extraction agent behind the
//! [`firlens_core::DocumentExtractor`] seam: resolve the configured agent,
//! make exactly one extraction call, normalize whatever comes back.

pub mod client;
pub mod extractor;
pub mod mock;
pub mod normalize;

pub use client::LlamaCloudClient;
pub use extractor::FirExtractor;
pub use normalize::normalize_payload;
