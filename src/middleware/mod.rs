//! Request middleware

pub mod client_id;
pub mod request_id;

pub use client_id::{ClientId, client_id_middleware, forwarded_for_or_peer};
pub use request_id::{RequestId, request_id_middleware};
