//! HTTP protocol layer module
//!
//! Response building and MIME detection, decoupled from the routing logic.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_403_response, build_404_response, build_500_response, build_501_response,
    build_file_response,
};
