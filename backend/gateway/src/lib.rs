//! FIRLens Gateway HTTP Server
//!
//! Exposes the upload endpoint: accept a FIR document image, stage it on
//! scratch storage, hand it to the extraction client once, return the
//! agent's result verbatim, and always clean the staged file up.

pub mod error;
pub mod server;
pub mod temp;
pub mod upload;

pub use error::ApiError;
pub use server::{build_router, start_server, GatewayState};
pub use temp::{sanitize_filename, TempUpload};
