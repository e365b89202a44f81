//! Aria Player Core
//!
//! Domain types, identifiers, and error handling shared across the Aria
//! engine crates.
//!
//! This crate defines:
//! - **Domain Types**: `Track`, `Album`, `Artwork`, `AnimationDecision`
//! - **Identifiers**: `TrackId`, `AlbumId`, `SlotId`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use aria_core::types::{Track, TrackId};
//! use std::path::PathBuf;
//!
//! let track = Track::new("My Favorite Song", PathBuf::from("/music/song.mp3"));
//! assert_eq!(track.title, "My Favorite Song");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{
    Album, AlbumId, AnimationDecision, Artwork, ContentAdvisory, QualityTier, SlotId, Track,
    TrackId,
};
