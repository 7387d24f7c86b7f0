//! Image ingress for SnapSolve.
//!
//! Uploaded payloads arrive in whatever format the client chose; everything
//! forwarded to the inference gateway is first decoded and re-encoded to a
//! canonical lossless PNG.

pub mod ingress;
pub mod sniff;

pub use ingress::{reencode_to_png, IngressError, CANONICAL_MIME};
pub use sniff::{is_image, sniff_mime};
