//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod backend;
mod session_store;

pub use backend::{
    AnalyticsApi, AuthApi, InvoiceApi, LoginRequest, LoginResponse, ProductApi, RegisterRequest,
    Role,
};
pub use session_store::SessionStore;
