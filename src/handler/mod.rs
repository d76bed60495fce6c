//! Request handler module
//!
//! The SPA routing rule layered on top of static file serving: an existing
//! file is served as-is, anything else gets the fallback document.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
