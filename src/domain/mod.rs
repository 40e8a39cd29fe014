//! Domain types and DTOs
//!
//! Documents, analysis results and chat replies.

pub mod analysis;
pub mod chat;
pub mod document;

// Re-export commonly used types
pub use analysis::*;
pub use chat::*;
pub use document::*;
