//! Inbound-abuse guard
//!
//! Per-client sliding-window rate limiting with a permanent block list, and
//! structural/adversarial validation of chat messages. Both run before any
//! external call is made.

pub mod rate_limit;
pub mod validate;

pub use rate_limit::{Clock, RateDecision, RateLimiter, SystemClock};
pub use validate::{InputValidator, ValidationError};
