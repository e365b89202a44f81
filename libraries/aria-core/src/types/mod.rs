//! Domain types for the Aria engine

mod album;
mod animation;
mod ids;
mod track;

pub use album::Album;
pub use animation::AnimationDecision;
pub use ids::{AlbumId, SlotId, TrackId};
pub use track::{Artwork, ContentAdvisory, QualityTier, Track};
