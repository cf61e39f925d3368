//! # Scene Store
//!
//! Holds the current [`Scene`] and replaces it wholesale.
//!
//! ## Consistency
//!
//! Readers get an `Arc<Scene>` snapshot, so a reader never sees a scene that is
//! half old and half new. Subscribers (the renderer) are notified through a
//! `watch` channel after each replacement.
//!
//! ## Tickets
//!
//! Replacements that wait on I/O (Open) take a [`SceneTicket`] up front and
//! commit with it later. Tickets and [`SceneStore::set_scene`] draw from one
//! increasing sequence. A commit lands only if nothing newer has replaced the
//! scene since, so a slow commit can't overwrite newer content, and a ticket
//! that is never committed (failed read) blocks nobody:
//!
//! ```text
//! open:  issue(1) ─── read file ............. commit(1) → StaleTicket
//! clear:           set_scene (2) ──────────────────────────
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use isoflow_model::{Scene, SceneInput};
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

/// Replacement content accepted by [`SceneStore::set_scene`]
#[derive(Debug, Clone)]
pub enum SceneUpdate {
    Input(SceneInput),
    Model(Scene),
}

impl SceneUpdate {
    fn into_scene(self) -> Scene {
        match self {
            SceneUpdate::Input(input) => Scene::from(input),
            SceneUpdate::Model(scene) => scene,
        }
    }
}

impl From<Scene> for SceneUpdate {
    fn from(scene: Scene) -> Self {
        SceneUpdate::Model(scene)
    }
}

impl From<SceneInput> for SceneUpdate {
    fn from(input: SceneInput) -> Self {
        SceneUpdate::Input(input)
    }
}

/// Permission to replace the scene, valid until a newer one is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneTicket {
    generation: u64,
}

impl SceneTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Scene ticket {ticket} was superseded by generation {current}")]
pub struct StaleTicket {
    pub ticket: u64,
    pub current: u64,
}

#[derive(Debug)]
pub struct SceneStore {
    scene: watch::Sender<Arc<Scene>>,
    /// Last sequence number handed out
    issued: AtomicU64,
    /// Sequence number of the replacement currently shown
    generation: AtomicU64,
}

impl SceneStore {
    pub fn new(initial: Scene) -> Self {
        let (scene, _) = watch::channel(Arc::new(initial));
        Self {
            scene,
            issued: AtomicU64::new(0),
            generation: AtomicU64::new(0),
        }
    }

    /// Current scene snapshot
    pub fn scene(&self) -> Arc<Scene> {
        self.scene.borrow().clone()
    }

    /// Receiver notified after every replacement
    pub fn subscribe(&self) -> watch::Receiver<Arc<Scene>> {
        self.scene.subscribe()
    }

    /// Sequence number of the last replacement, 0 for the initial scene
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Replace the whole scene. Outstanding tickets become stale.
    pub fn set_scene(&self, next: impl Into<SceneUpdate>) {
        let scene = Arc::new(next.into().into_scene());

        self.scene.send_modify(|current| {
            let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            self.generation.store(generation, Ordering::SeqCst);
            debug!(generation, nodes = scene.nodes.len(), "Scene replaced");
            *current = scene;
        });
    }

    /// Start a replacement that will commit later
    pub fn issue_ticket(&self) -> SceneTicket {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        SceneTicket { generation }
    }

    /// Replace the scene unless something issued after `ticket` already has
    pub fn commit(&self, ticket: SceneTicket, scene: Scene) -> Result<(), StaleTicket> {
        let mut outcome = Ok(());

        self.scene.send_if_modified(|current| {
            let generation = self.generation.load(Ordering::SeqCst);
            if generation > ticket.generation {
                outcome = Err(StaleTicket {
                    ticket: ticket.generation,
                    current: generation,
                });
                return false;
            }

            self.generation.store(ticket.generation, Ordering::SeqCst);
            debug!(generation = ticket.generation, nodes = scene.nodes.len(), "Scene committed");
            *current = Arc::new(scene);
            true
        });

        outcome
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(Scene::default())
    }
}
