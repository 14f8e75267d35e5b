use std::collections::{HashMap, VecDeque};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::metadata::{CaptureFields, MetadataReader};
use crate::prompt::Confirmer;

/// Write `contents` to `dir/name`, creating parent directories
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let file_path = dir.join(name);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let mut file = File::create(&file_path).unwrap();
    file.write_all(contents).unwrap();
    file_path
}

/// Metadata looked up from a table instead of the file
#[derive(Debug, Default)]
pub struct FakeMetadata {
    fields: HashMap<PathBuf, CaptureFields>,
}

impl FakeMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &Path, fields: CaptureFields) -> Self {
        self.fields.insert(path.to_path_buf(), fields);
        self
    }

    /// Both EXIF dates set to `original`
    pub fn taken(self, path: &Path, original: &str) -> Self {
        self.with(
            path,
            CaptureFields {
                modified: Some(original.to_string()),
                original: Some(original.to_string()),
            },
        )
    }
}

impl MetadataReader for FakeMetadata {
    fn read_capture_fields(&self, path: &Path) -> Option<CaptureFields> {
        self.fields.get(path).cloned()
    }
}

/// Answers prompts from a script; a `None` answer accepts the suggestion.
///
/// Every suggestion it was shown is kept for inspection.
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
    fn confirm(&mut self, suggestion: &str) -> Result<String> {
        self.suggestions.push(suggestion.to_string());
        Ok(self
            .answers
            .pop_front()
            .flatten()
            .unwrap_or_else(|| suggestion.to_string()))
    }
}
