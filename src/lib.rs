//! spaserve - local development HTTP server for single-page applications.
//!
//! Serves static files from a document root. A GET request whose path does
//! not name an existing file receives the SPA shell (`index.html`) with a
//! `200` instead of a `404`, so client-side routers keep control of paths
//! like `/about` while the browser address bar stays untouched.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
