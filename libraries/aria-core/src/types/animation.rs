//! Cover-art animation decision
//!
//! The decision is produced by an external analyzer and stored verbatim; the
//! engine only transports it. The rendering layer switches on the variant.

use serde::{Deserialize, Serialize};

/// Animation style decision for an album cover
///
/// Closed set of styles with a parameter payload per variant, plus the
/// analyzer's textual rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum AnimationDecision {
    /// Slow zoom-and-pan over the artwork
    KenBurns {
        /// Zoom factor, typically 1.0..=1.5
        zoom: f32,
        /// Pan distance as a fraction of image size
        pan: f32,
        /// Analyzer rationale
        rationale: String,
    },

    /// Depth-layered parallax motion
    Parallax {
        /// Apparent layer depth
        depth: f32,
        /// Analyzer rationale
        rationale: String,
    },

    /// Pulsing glow derived from cover colors
    AmbientGlow {
        /// Glow intensity, 0.0..=1.0
        intensity: f32,
        /// Analyzer rationale
        rationale: String,
    },

    /// No animation
    None {
        /// Analyzer rationale
        rationale: String,
    },
}

impl AnimationDecision {
    /// Get the analyzer's rationale text
    pub fn rationale(&self) -> &str {
        match self {
            Self::KenBurns { rationale, .. }
            | Self::Parallax { rationale, .. }
            | Self::AmbientGlow { rationale, .. }
            | Self::None { rationale } => rationale,
        }
    }
}
