//! Domain models for the marketplace binary.

pub mod draft;
pub mod session;

pub use draft::PostLandDraft;
pub use session::{CurrentUser, session_keys};
