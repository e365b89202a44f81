//! Integration tests for metadata extraction against real files
//!
//! Fixtures are generated on the fly: minimal PCM WAV files plus loose
//! sidecar images, exercising the fallback chains end to end.

use aria_core::types::QualityTier;
use aria_metadata::{LibraryScanner, MetadataExtractor};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write a minimal mono 16-bit 44.1kHz PCM WAV of the given length
fn write_wav(path: &Path, seconds: u32) {
    let sample_rate: u32 = 44_100;
    let num_samples = sample_rate * seconds;
    let data_size = num_samples * 2;

    let mut file = fs::File::create(path).unwrap();
    file.write_all(b"RIFF").unwrap();
    file.write_all(&(36 + data_size).to_le_bytes()).unwrap();
    file.write_all(b"WAVE").unwrap();

    file.write_all(b"fmt ").unwrap();
    file.write_all(&16u32.to_le_bytes()).unwrap();
    file.write_all(&1u16.to_le_bytes()).unwrap(); // PCM
    file.write_all(&1u16.to_le_bytes()).unwrap(); // mono
    file.write_all(&sample_rate.to_le_bytes()).unwrap();
    file.write_all(&(sample_rate * 2).to_le_bytes()).unwrap(); // byte rate
    file.write_all(&2u16.to_le_bytes()).unwrap(); // block align
    file.write_all(&16u16.to_le_bytes()).unwrap(); // bits per sample

    file.write_all(b"data").unwrap();
    file.write_all(&data_size.to_le_bytes()).unwrap();
    file.write_all(&vec![0u8; data_size as usize]).unwrap();
}

#[test]
fn untagged_wav_resolves_from_stream_and_filename() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Morning Light.wav");
    write_wav(&path, 2);

    let track = MetadataExtractor::new().extract(&path);

    assert_eq!(track.title, "Morning Light");
    assert_eq!(track.artist, "Unknown Artist");
    assert_eq!(track.album, "Unknown Album");
    assert_eq!(track.format.as_deref(), Some("PCM"));
    assert_eq!(track.sample_rate, Some(44_100));
    assert_eq!(track.channels, Some(1));
    assert_eq!(track.bit_depth, Some(16));
    assert!(track.duration_secs.unwrap() > 1.5);
    assert!(track.file_size.unwrap() > 0);
    // 16-bit mono PCM at 44.1kHz is ~705 kbps however it is derived
    assert!(track.bitrate_kbps.unwrap() > 320);
    assert_eq!(track.quality_tier(), QualityTier::High);
}

#[test]
fn folder_artwork_is_picked_up_when_tags_have_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("track.wav");
    write_wav(&path, 1);
    fs::write(dir.path().join("cover.jpg"), [0xFFu8, 0xD8, 0xFF, 0xE0]).unwrap();

    let track = MetadataExtractor::new().extract(&path);

    let artwork = track.artwork.expect("sidecar cover should be found");
    assert_eq!(artwork.mime_type.as_deref(), Some("image/jpeg"));
    assert!(!artwork.data.is_empty());
}

#[test]
fn disc_number_falls_back_to_path_marker() {
    let dir = tempfile::tempdir().unwrap();
    let disc_dir = dir.path().join("Greatest Hits CD2");
    fs::create_dir(&disc_dir).unwrap();
    let path = disc_dir.join("track.wav");
    write_wav(&path, 1);

    let track = MetadataExtractor::new().extract(&path);
    assert_eq!(track.disc_number, Some(2));
}

#[test]
fn scan_directory_builds_albums_from_wav_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    write_wav(&dir.path().join("one.wav"), 1);
    write_wav(&dir.path().join("two.wav"), 1);
    fs::write(dir.path().join("ignore.txt"), "not audio").unwrap();

    let snapshot = LibraryScanner::new().scan_directory(dir.path());

    assert_eq!(snapshot.tracks.len(), 2);
    // Both untagged tracks land in the same fallback album
    assert_eq!(snapshot.albums.len(), 1);
    assert_eq!(snapshot.albums[0].title, "Unknown Album");
    assert_eq!(snapshot.albums[0].tracks.len(), 2);
}
