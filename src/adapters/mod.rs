//! Adapters Layer
//!
//! `inbound` drives the application (HTTP front end); `outbound` implements
//! the domain ports against external provider APIs.

pub mod inbound;
pub mod outbound;
