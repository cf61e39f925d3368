//! Capabilities the editor needs from its host.
//!
//! The controller never touches files, dialogs or browsers directly. A
//! desktop shell, a web shell and the CLI each provide these traits; tests use
//! the mocks at the bottom of this module.

use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

/// Accept filter passed to file pickers
pub const SCENE_FILE_ACCEPT: &str = "application/json";

/// MIME type of exported scene files
pub const SCENE_FILE_MIME: &str = "application/json;charset=utf-8";

/// Result of presenting a file picker. Dismissing it is not an error.
#[derive(Debug)]
pub enum FileSelection<F> {
    Selected(F),
    Cancelled,
}

/// A file the user picked, not yet read
pub trait SelectedFile: Send {
    fn name(&self) -> &str;

    /// Read the full text content
    fn read_text(self) -> impl Future<Output = io::Result<String>> + Send;
}

pub trait FileSource: Send + Sync {
    type File: SelectedFile;

    /// Ask the user for one file matching `accept`
    fn request_file(&self, accept: &str) -> impl Future<Output = FileSelection<Self::File>> + Send;
}

/// Blob handed to the host for download/save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveArtifact {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

pub trait SavePrompt: Send + Sync {
    fn save(&self, artifact: &SaveArtifact) -> io::Result<()>;
}

/// Opens a URL in a new browser context
pub trait LinkOpener: Send + Sync {
    fn open_url(&self, url: &str) -> io::Result<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// File source that hands out pre-queued selections, then cancels
#[derive(Debug, Default)]
pub struct MockFileSource {
    selections: Mutex<VecDeque<FileSelection<MockFile>>>,
    requests: Mutex<Vec<String>>,
}

impl MockFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_file(&self, file: MockFile) {
        lock(&self.selections).push_back(FileSelection::Selected(file));
    }

    pub fn push_cancel(&self) {
        lock(&self.selections).push_back(FileSelection::Cancelled);
    }

    /// Accept filters passed to each `request_file` call
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }
}

impl FileSource for MockFileSource {
    type File = MockFile;

    async fn request_file(&self, accept: &str) -> FileSelection<MockFile> {
        lock(&self.requests).push(accept.to_string());
        lock(&self.selections)
            .pop_front()
            .unwrap_or(FileSelection::Cancelled)
    }
}

#[derive(Debug)]
enum MockContent {
    Ready(io::Result<String>),
    Gated {
        started: oneshot::Sender<()>,
        text: oneshot::Receiver<String>,
    },
}

#[derive(Debug)]
pub struct MockFile {
    name: String,
    content: MockContent,
}

/// Test-side handle of a gated [`MockFile`]
#[derive(Debug)]
pub struct FileGate {
    /// Resolves once the reader starts waiting
    pub started: oneshot::Receiver<()>,
    /// Sends the file content and lets the read finish
    pub release: oneshot::Sender<String>,
}

impl MockFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: MockContent::Ready(Ok(text.into())),
        }
    }

    pub fn unreadable(name: impl Into<String>, kind: io::ErrorKind) -> Self {
        Self {
            name: name.into(),
            content: MockContent::Ready(Err(io::Error::new(kind, "mock read failure"))),
        }
    }

    /// File whose read blocks until the gate is released
    pub fn gated(name: impl Into<String>) -> (Self, FileGate) {
        let (started_tx, started_rx) = oneshot::channel();
        let (text_tx, text_rx) = oneshot::channel();
        let file = Self {
            name: name.into(),
            content: MockContent::Gated {
                started: started_tx,
                text: text_rx,
            },
        };
        let gate = FileGate {
            started: started_rx,
            release: text_tx,
        };
        (file, gate)
    }
}

impl SelectedFile for MockFile {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_text(self) -> io::Result<String> {
        match self.content {
            MockContent::Ready(result) => result,
            MockContent::Gated { started, text } => {
                let _ = started.send(());
                text.await
                    .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "file gate dropped"))
            }
        }
    }
}

/// Save prompt that records artifacts instead of writing them
#[derive(Debug, Default)]
pub struct MockSavePrompt {
    saved: Mutex<Vec<SaveArtifact>>,
    fail_with: Option<io::ErrorKind>,
}

impl MockSavePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            saved: Mutex::default(),
            fail_with: Some(kind),
        }
    }

    pub fn saved(&self) -> Vec<SaveArtifact> {
        lock(&self.saved).clone()
    }
}

impl SavePrompt for MockSavePrompt {
    fn save(&self, artifact: &SaveArtifact) -> io::Result<()> {
        if let Some(kind) = self.fail_with {
            return Err(io::Error::new(kind, "mock save failure"));
        }
        lock(&self.saved).push(artifact.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockLinkOpener {
    opened: Mutex<Vec<String>>,
}

impl MockLinkOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        lock(&self.opened).clone()
    }
}

impl LinkOpener for MockLinkOpener {
    fn open_url(&self, url: &str) -> io::Result<()> {
        lock(&self.opened).push(url.to_string());
        Ok(())
    }
}
