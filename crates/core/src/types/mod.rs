//! Core types for the OnlyLands client.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod media;
pub mod phone;
pub mod status;

pub use id::*;
pub use media::MediaRef;
pub use phone::{PhoneError, PhoneNumber};
pub use status::*;
