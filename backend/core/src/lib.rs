pub mod error;
pub mod schema;
pub mod traits;
pub mod types;

pub use error::FirlensError;
pub use schema::fir_extraction_schema;
pub use traits::{AgentResolver, AgentResult, DocumentExtractor, ExtractionAgent};
pub use types::ExtractedDocument;
