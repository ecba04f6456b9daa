//! Data Transfer Objects for the build server API
//!
//! Only the fields the tools actually read are modelled; everything else in
//! the server's responses is ignored during deserialization.

pub mod build;
pub mod crumb;
pub mod job;
pub mod queue;
