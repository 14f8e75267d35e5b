#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use picsort_core::prompt::Confirmer;

/// Write `contents` to `dir/name`, creating parent directories
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, contents).unwrap();
    path
}

/// Write a tiny JPEG carrying the given EXIF dates
pub fn write_photo(dir: &Path, name: &str, modified: Option<&str>, original: Option<&str>) -> PathBuf {
    write_file(dir, name, &exif_jpeg(modified, original))
}

/// Smallest JPEG the EXIF reader accepts: SOI, one APP1 segment, EOI.
///
/// The TIFF block is little-endian with `DateTime` in IFD0 and
/// `DateTimeOriginal` in the Exif sub-IFD. Dates must be 19 characters.
pub fn exif_jpeg(modified: Option<&str>, original: Option<&str>) -> Vec<u8> {
    const ASCII: u16 = 2;
    const LONG: u16 = 4;

    let ifd0_offset: u32 = 8;
    let ifd0_entries = modified.is_some() as u32 + original.is_some() as u32;
    let exif_offset = ifd0_offset + 2 + 12 * ifd0_entries + 4;
    let exif_len = if original.is_some() { 2 + 12 + 4 } else { 0 };
    let modified_offset = exif_offset + exif_len;
    let original_offset = modified_offset + modified.map_or(0, |m| m.len() as u32 + 1);

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&ifd0_offset.to_le_bytes());

    let entry = |tiff: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32| {
        tiff.extend_from_slice(&tag.to_le_bytes());
        tiff.extend_from_slice(&kind.to_le_bytes());
        tiff.extend_from_slice(&count.to_le_bytes());
        tiff.extend_from_slice(&value.to_le_bytes());
    };

    // IFD0
    tiff.extend_from_slice(&(ifd0_entries as u16).to_le_bytes());
    if let Some(m) = modified {
        entry(&mut tiff, 0x0132, ASCII, m.len() as u32 + 1, modified_offset);
    }
    if original.is_some() {
        entry(&mut tiff, 0x8769, LONG, 1, exif_offset);
    }
    tiff.extend_from_slice(&0u32.to_le_bytes());

    // Exif IFD
    if let Some(o) = original {
        tiff.extend_from_slice(&1u16.to_le_bytes());
        entry(&mut tiff, 0x9003, ASCII, o.len() as u32 + 1, original_offset);
        tiff.extend_from_slice(&0u32.to_le_bytes());
    }

    for value in [modified, original].into_iter().flatten() {
        tiff.extend_from_slice(value.as_bytes());
        tiff.push(0);
    }

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

// Same double as the crate's `test_utils`, which integration tests cannot reach
/// Answers prompts from a script; `None` accepts the suggestion
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    answers: VecDeque<Option<String>>,
    pub suggestions: Vec<String>,
}

impl ScriptedConfirmer {
    pub fn new(answers: &[Option<&str>]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.map(String::from)).collect(),
            suggestions: Vec::new(),
        }
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&mut self, suggestion: &str) -> picsort_core::Result<String> {
        self.suggestions.push(suggestion.to_string());
        Ok(self
            .answers
            .pop_front()
            .flatten()
            .unwrap_or_else(|| suggestion.to_string()))
    }
}
