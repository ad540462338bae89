//! Paperboy Core - Shared types library.
//!
//! This crate provides common types used across all Paperboy components:
//! - `client` - Typed async client for the story service REST API
//! - `integration-tests` - End-to-end tests against a stub of the service
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and the session token

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
