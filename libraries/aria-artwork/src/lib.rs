//! Aria Artwork - cover art extraction
//!
//! Finds the artwork for an audio file and derives a dominant color for
//! visual hints.
//!
//! Lookup order:
//! 1. Embedded front-cover picture (ID3v2 APIC, MP4 covr, FLAC picture block)
//! 2. Any embedded picture, or a binary tag whose key looks like a cover
//! 3. A loose image file next to the audio file (`cover.jpg`, `folder.png`, ...)
//!
//! All lookups are best-effort: a missing or unreadable cover is `None`,
//! never an error on the extraction path.

mod color;
mod error;
mod extractor;

pub use color::dominant_color;
pub use error::{ArtworkError, Result};
pub use extractor::{find_artwork, folder_artwork};
