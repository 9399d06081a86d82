//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client for the backend API ports
//! - Local filesystem for the SessionStore port
//! - In-memory SessionStore for tests and throwaway sessions

pub mod http;
pub mod memory;
pub mod session_file;

#[cfg(test)]
pub mod backend_mock;

pub use http::HttpBackend;
pub use memory::MemorySessionStore;
pub use session_file::FileSessionStore;
