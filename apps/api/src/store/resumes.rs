use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::StoreError;

const RESUME_EXTENSION: &str = "typ";

/// A résumé available for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeEntry {
    /// File stem, used as the identifier in requests and call logs.
    pub id: String,
    /// Human-readable name derived from the stem.
    pub name: String,
}

/// Enumerates and reads Typst résumé sources from a single directory.
#[derive(Debug, Clone)]
pub struct ResumeStore {
    dir: PathBuf,
}

impl ResumeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Lists every `*.typ` file, sorted by display name. A missing directory is empty.
    pub async fn list(&self) -> Result<Vec<ResumeEntry>, StoreError> {
        let mut read_dir = match tokio::fs::read_dir(&self.dir).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        while let Some(entry) = read_dir.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() || !has_resume_extension(&path) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                entries.push(ResumeEntry {
                    id: stem.to_string(),
                    name: display_name(stem),
                });
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(entries)
    }

    /// Reads the raw source for `id`. Fails with `NotFound` for unknown ids.
    pub async fn load(&self, id: &str) -> Result<String, StoreError> {
        if !is_plain_identifier(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let path = self.dir.join(format!("{id}.{RESUME_EXTENSION}"));
        match tokio::fs::read_to_string(&path).await {
            Ok(source) => Ok(source),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(id.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

fn has_resume_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(RESUME_EXTENSION)
}

// Ids are bare file stems; anything that could walk out of the directory is rejected.
fn is_plain_identifier(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && !id.contains("..")
}

/// `senior_backend-engineer` → `Senior Backend Engineer`.
///
/// Every alphabetic run starts uppercase and continues lowercase.
pub fn display_name(stem: &str) -> String {
    let spaced = stem.replace(['_', '-'], " ");
    let mut out = String::with_capacity(spaced.len());
    let mut prev_alpha = false;
    for c in spaced.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
