//! Aria Metadata
//!
//! Tag extraction and library building for the Aria engine.
//!
//! This crate provides:
//! - Best-effort tag extraction into normalized [`Track`](aria_core::Track)
//!   records (ID3, MP4 atoms, Vorbis comments via lofty), with documented
//!   fallback rules for every field
//! - Album grouping with album-artist resolution
//! - Library scanning over a caller-supplied path list (directory traversal
//!   helper included for convenience)
//!
//! Extraction never fails outward: a file that cannot be read still yields a
//! track named after its file stem.
//!
//! # Example
//!
//! ```rust,no_run
//! use aria_metadata::{LibraryScanner, MetadataExtractor};
//! use std::path::Path;
//!
//! let extractor = MetadataExtractor::new();
//! let track = extractor.extract(Path::new("/music/song.mp3"));
//! println!("{} - {}", track.artist, track.title);
//!
//! let scanner = LibraryScanner::new();
//! let snapshot = scanner.scan_directory(Path::new("/music"));
//! println!("{} albums", snapshot.albums.len());
//! ```

mod error;
mod extractor;
mod grouper;
mod scanner;

pub use error::{MetadataError, Result};
pub use extractor::MetadataExtractor;
pub use grouper::group_albums;
pub use scanner::{LibraryScanner, LibrarySnapshot, ScanConfig};
