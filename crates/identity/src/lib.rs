//! `clout-identity` — client for the external identity verification service.
//!
//! One verification per call, strict typed payload handling, and the
//! gateway-tier bounded retry wrapper. Definitive upstream answers
//! (including denials) come back as [`VerifyOutcome`]; only transport-level
//! failures are errors, because only those are safe to retry.

pub mod client;
pub mod retry;

pub use client::{IdentityClient, IdentityConfig, VerifiedIdentity, VerifyError, VerifyOutcome};
pub use retry::{RETRY_BASE_DELAY, VERIFY_ATTEMPTS, verify_with_retry};
