//! HTTP building blocks
//!
//! Body plumbing, MIME detection and response builders shared by the
//! request handlers.

pub mod body;
pub mod mime;
pub mod response;
