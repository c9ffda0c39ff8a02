//! HTTP surface: edge gateway, per-request context resolver, and routing.
//!
//! Trust flows one way here. The gateway strips inbound `x-clout-*` headers
//! from every external request, verifies page-request credentials upstream,
//! and re-injects trusted identity headers for downstream code. Handlers
//! resolve their context through [`resolver::Resolver`], which prefers those
//! gateway-set headers and otherwise re-verifies credentials directly.

pub mod app;
pub mod config;
pub mod cookies;
pub mod errors;
pub mod gateway;
pub mod headers;
pub mod resolver;
pub mod routes;
pub mod token;
