//! emuci Core
//!
//! Core types shared by the emuci CI tools.
//!
//! This crate contains:
//! - Domain types: job specifications, step records, parent build linkage, test reports
//! - DTOs: the subset of the build server's JSON payloads the tools consume

pub mod domain;
pub mod dto;
