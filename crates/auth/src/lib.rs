//! `clout-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and from the identity
//! service: it defines the permission taxonomy, brand (tenant) codes, the
//! resolved per-request context, and the rejection taxonomy. Deriving a
//! context from headers or from an upstream verification lives in the
//! transport layers.

pub mod brand;
pub mod context;
pub mod mode;
pub mod permission;
pub mod rejection;

pub use brand::Brand;
pub use context::AuthContext;
pub use mode::AuthMode;
pub use permission::PermissionLevel;
pub use rejection::AuthRejection;
