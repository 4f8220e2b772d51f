//! Arena-specific error type.
//!
//! The definition lives in `photomeson-core` so that the fatal
//! [`EventError`](photomeson_core::EventError) can wrap it.

pub use photomeson_core::error::ArenaError;
