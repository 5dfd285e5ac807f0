//! Structured logging for the FIRLens backend.
//!
//! Handles log redaction, console output, and optional rolling JSON file
//! output.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_sensitive_data;
