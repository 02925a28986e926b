//! OnlyLands Core - Shared types library.
//!
//! This crate provides common types used across the OnlyLands client
//! binaries:
//! - `marketplace` - Public marketplace site (sellers, brokers, visitors)
//! - `admin` - Internal administration console
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients. Both binaries talk to the OnlyLands backend themselves; this
//! crate gives them a shared vocabulary for what comes back.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, phone numbers, statuses, and media
//! - [`entities`] - Entity shapes consumed from the backend
//! - [`token`] - Bearer-token payload decoding

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod entities;
pub mod token;
pub mod types;

pub use entities::{Broker, Listing, PaymentRecord, User};
pub use token::{TokenClaims, TokenError};
pub use types::*;
