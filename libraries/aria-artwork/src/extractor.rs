use crate::error::{ArtworkError, Result};
use aria_core::types::Artwork;
use lofty::{ItemValue, PictureType, TaggedFileExt};
use std::path::Path;

/// Maximum artwork size (5MB)
const MAX_ARTWORK_SIZE: usize = 5 * 1024 * 1024;

/// Sidecar image basenames, in preference order
const FOLDER_BASENAMES: [&str; 5] = ["cover", "folder", "album", "front", "artwork"];

/// Sidecar image extensions, in preference order
const FOLDER_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Find the artwork for an audio file
///
/// Checks embedded pictures first, then loose image files in the same
/// directory. Best-effort: returns `None` on any failure.
pub fn find_artwork(path: &Path) -> Option<Artwork> {
    match embedded_artwork(path) {
        Ok(Some(artwork)) => Some(artwork),
        _ => folder_artwork(path),
    }
}

/// Extract embedded artwork from an audio file's tags
///
/// Prefers the front-cover picture, then the first picture, then any binary
/// tag item whose key looks like a cover (contains a cover/picture/artwork
/// marker).
pub(crate) fn embedded_artwork(path: &Path) -> Result<Option<Artwork>> {
    if !path.exists() {
        return Err(ArtworkError::FileNotFound(path.to_path_buf()));
    }

    let tagged_file = lofty::read_from_path(path)?;

    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag());

    let Some(tag) = tag else {
        return Ok(None);
    };

    // Prefer front cover, otherwise first picture
    let pictures = tag.pictures();
    let picture = pictures
        .iter()
        .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
        .or_else(|| pictures.first());

    if let Some(picture) = picture {
        let data = picture.data();
        if data.len() > MAX_ARTWORK_SIZE {
            return Err(ArtworkError::TooLarge(data.len(), MAX_ARTWORK_SIZE));
        }

        let mime_type = picture.mime_type().map(|m| m.as_str().to_string());
        return Ok(Some(Artwork::new(data.to_vec(), mime_type)));
    }

    // Some rips stash the cover in a nonstandard binary item
    for item in tag.items() {
        if let lofty::ItemKey::Unknown(key) = item.key() {
            if !looks_like_cover_key(key.as_str()) {
                continue;
            }
            if let ItemValue::Binary(data) = item.value() {
                if data.is_empty() || data.len() > MAX_ARTWORK_SIZE {
                    continue;
                }
                return Ok(Some(Artwork::new(data.clone(), None)));
            }
        }
    }

    Ok(None)
}

/// Find a loose image file next to the audio file
///
/// Checks `cover`, `folder`, `album`, `front`, `artwork` basenames against
/// `jpg`, `jpeg`, `png`, `webp` extensions, in that order.
pub fn folder_artwork(audio_path: &Path) -> Option<Artwork> {
    let dir = audio_path.parent()?;

    for basename in FOLDER_BASENAMES {
        for ext in FOLDER_EXTENSIONS {
            let candidate = dir.join(format!("{basename}.{ext}"));
            if !candidate.is_file() {
                continue;
            }
            if let Ok(data) = std::fs::read(&candidate) {
                if data.is_empty() {
                    continue;
                }
                return Some(Artwork::new(data, Some(mime_for_extension(ext))));
            }
        }
    }

    None
}

fn looks_like_cover_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.contains("cover") || key.contains("picture") || key.contains("artwork")
}

fn mime_for_extension(ext: &str) -> String {
    match ext {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "png" => "image/png".to_string(),
        "webp" => "image/webp".to_string(),
        other => format!("image/{other}"),
    }
}
