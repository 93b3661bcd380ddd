use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::warn;

/// Reads `<dir>/<name>.txt` prompt templates.
///
/// A missing or unreadable template loads as an empty string; callers decide
/// whether an empty template is fatal.
#[derive(Debug, Clone)]
pub struct PromptStore {
    dir: PathBuf,
}

impl PromptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn load(&self, name: &str) -> String {
        let path = self.dir.join(format!("{name}.txt"));
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => {
                warn!("Failed to read prompt {}: {e}", path.display());
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_reads_named_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("full_system.txt"), "You are a recruiter.").unwrap();

        let store = PromptStore::new(dir.path());
        assert_eq!(store.load("full_system").await, "You are a recruiter.");
    }

    #[tokio::test]
    async fn test_missing_template_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PromptStore::new(dir.path());
        assert_eq!(store.load("score_template").await, "");
    }

    #[tokio::test]
    async fn test_missing_directory_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PromptStore::new(dir.path().join("does-not-exist"));
        assert_eq!(store.load("full_template").await, "");
    }

    #[tokio::test]
    async fn test_template_is_reread_on_every_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score_system.txt");
        std::fs::write(&path, "v1").unwrap();

        let store = PromptStore::new(dir.path());
        assert_eq!(store.load("score_system").await, "v1");

        std::fs::write(&path, "v2").unwrap();
        assert_eq!(store.load("score_system").await, "v2");
    }
}
