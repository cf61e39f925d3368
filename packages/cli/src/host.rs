//! Native host: files on disk stand in for the browser's picker and download
//! prompt, and links are printed for the user to follow.

use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use colored::Colorize;
use isoflow_editor::{FileSelection, FileSource, LinkOpener, SaveArtifact, SavePrompt, SelectedFile};
use tracing::debug;

/// "Picks" the path given on the command line. No path means the user
/// dismissed the picker.
#[derive(Debug, Default)]
pub struct PathFileSource {
    path: Option<PathBuf>,
}

impl PathFileSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl FileSource for PathFileSource {
    type File = PathFile;

    async fn request_file(&self, accept: &str) -> FileSelection<PathFile> {
        match &self.path {
            Some(path) => {
                debug!(path = %path.display(), accept, "Using file from command line");
                FileSelection::Selected(PathFile { path: path.clone() })
            }
            None => FileSelection::Cancelled,
        }
    }
}

#[derive(Debug)]
pub struct PathFile {
    path: PathBuf,
}

impl SelectedFile for PathFile {
    fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    async fn read_text(self) -> io::Result<String> {
        tokio::fs::read_to_string(&self.path).await
    }
}

/// Writes exported scenes into a directory
#[derive(Debug)]
pub struct DirectorySavePrompt {
    out_dir: PathBuf,
    written: Mutex<Vec<PathBuf>>,
}

impl DirectorySavePrompt {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            written: Mutex::default(),
        }
    }

    /// Paths written so far, oldest first
    pub fn written(&self) -> Vec<PathBuf> {
        lock(&self.written).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Timestamps contain `:`, which Windows rejects in file names
fn portable_file_name(name: &str) -> String {
    name.replace(':', "-")
}

impl SavePrompt for DirectorySavePrompt {
    fn save(&self, artifact: &SaveArtifact) -> io::Result<()> {
        std::fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(portable_file_name(&artifact.file_name));
        std::fs::write(&path, &artifact.bytes)?;

        debug!(path = %path.display(), mime = %artifact.mime_type, "Wrote scene file");
        lock(&self.written).push(path);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct PrintLinkOpener;

impl LinkOpener for PrintLinkOpener {
    fn open_url(&self, url: &str) -> io::Result<()> {
        println!("  {} {}", "→".cyan(), url.underline());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_path_is_cancelled() {
        let source = PathFileSource::new(None);
        let selection = source.request_file("application/json").await;
        assert!(matches!(selection, FileSelection::Cancelled));
    }

    #[tokio::test]
    async fn test_path_file_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, "{\"title\":\"x\"}").unwrap();

        let source = PathFileSource::new(Some(path));
        let FileSelection::Selected(file) = source.request_file("application/json").await else {
            panic!("expected a selected file");
        };

        assert_eq!(file.name(), "scene.json");
        assert_eq!(file.read_text().await.unwrap(), "{\"title\":\"x\"}");
    }

    #[tokio::test]
    async fn test_missing_path_fails_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let source = PathFileSource::new(Some(dir.path().join("nope.json")));
        let FileSelection::Selected(file) = source.request_file("application/json").await else {
            panic!("expected a selected file");
        };

        let err = file.read_text().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_directory_prompt_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let prompt = DirectorySavePrompt::new(dir.path().join("out"));
        let artifact = SaveArtifact {
            file_name: "isoflow-2024-01-01T00:00:00.000Z.json".to_string(),
            mime_type: "application/json;charset=utf-8".to_string(),
            bytes: b"{}".to_vec(),
        };

        prompt.save(&artifact).unwrap();

        let written = prompt.written();
        assert_eq!(written.len(), 1);
        assert_eq!(
            written[0].file_name().unwrap(),
            "isoflow-2024-01-01T00-00-00.000Z.json"
        );
        assert_eq!(std::fs::read(&written[0]).unwrap(), b"{}");
    }

    #[test]
    fn test_directory_prompt_survives_poisoned_lock() {
        let dir = tempfile::tempdir().unwrap();
        let prompt = DirectorySavePrompt::new(dir.path());

        std::thread::scope(|scope| {
            let result = scope
                .spawn(|| {
                    let _guard = prompt.written.lock().unwrap();
                    panic!("writer crashed while holding the lock");
                })
                .join();
            assert!(result.is_err());
        });

        let artifact = SaveArtifact {
            file_name: "scene.json".to_string(),
            mime_type: "application/json;charset=utf-8".to_string(),
            bytes: b"{}".to_vec(),
        };
        prompt.save(&artifact).unwrap();

        assert_eq!(prompt.written(), vec![dir.path().join("scene.json")]);
    }
}
