//! Gallery controller: single owner of the store
//!
//! All user actions become [`GalleryCommand`]s processed one at a time by a
//! worker task. A load awaits its source inside the worker, so commands sent
//! while it is pending queue up behind it and see the loaded page.

use crate::acquire::ImageProvider;
use crate::error::{GalleryError, Result};
use crate::photo::{ImageRef, Photo, PhotoId};
use crate::source::PhotoSource;
use crate::store::{GallerySnapshot, GalleryStore};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

type Reply<T> = oneshot::Sender<T>;

/// Commands accepted by the controller
#[derive(Debug)]
pub enum GalleryCommand {
    Load { reply: Reply<Result<usize>> },
    LoadNextPage { reply: Reply<Result<usize>> },
    SelectPhoto { index: usize, reply: Reply<Result<()>> },
    ClearSelection { reply: Reply<()> },
    NextPhoto { reply: Reply<()> },
    PreviousPhoto { reply: Reply<()> },
    ToggleFavoriteSelected { reply: Reply<bool> },
    ToggleFavorite { index: usize, reply: Reply<bool> },
    AddPhoto {
        image: ImageRef,
        title: Option<String>,
        reply: Reply<PhotoId>,
    },
    DeletePhoto { index: usize, reply: Reply<Option<Photo>> },
    Shutdown,
}

impl GalleryCommand {
    fn name(&self) -> &'static str {
        match self {
            GalleryCommand::Load { .. } => "load",
            GalleryCommand::LoadNextPage { .. } => "load_next_page",
            GalleryCommand::SelectPhoto { .. } => "select_photo",
            GalleryCommand::ClearSelection { .. } => "clear_selection",
            GalleryCommand::NextPhoto { .. } => "next_photo",
            GalleryCommand::PreviousPhoto { .. } => "previous_photo",
            GalleryCommand::ToggleFavoriteSelected { .. } => "toggle_favorite_selected",
            GalleryCommand::ToggleFavorite { .. } => "toggle_favorite",
            GalleryCommand::AddPhoto { .. } => "add_photo",
            GalleryCommand::DeletePhoto { .. } => "delete_photo",
            GalleryCommand::Shutdown => "shutdown",
        }
    }
}

/// Worker that owns the store
pub struct GalleryController {
    store: GalleryStore,
    source: Arc<dyn PhotoSource>,
    snapshot_tx: watch::Sender<GallerySnapshot>,
}

impl GalleryController {
    /// Start the worker on the current tokio runtime
    pub fn spawn(store: GalleryStore, source: Arc<dyn PhotoSource>) -> GalleryHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(store.snapshot());

        let controller = Self {
            store,
            source,
            snapshot_tx,
        };
        tokio::spawn(controller.run(command_rx));

        GalleryHandle {
            command_tx,
            snapshot_rx,
        }
    }

    async fn run(mut self, mut command_rx: mpsc::UnboundedReceiver<GalleryCommand>) {
        tracing::debug!("Gallery controller started");

        while let Some(command) = command_rx.recv().await {
            tracing::trace!("Handling {}", command.name());
            if matches!(command, GalleryCommand::Shutdown) {
                break;
            }
            self.handle(command).await;
        }

        tracing::debug!("Gallery controller stopped");
    }

    /// Apply one command. The new snapshot is published before the reply is sent,
    /// so a caller that awaited the reply always observes its own change.
    async fn handle(&mut self, command: GalleryCommand) {
        match command {
            GalleryCommand::Load { reply } => {
                let result = self.load().await;
                self.publish_and_reply(reply, result);
            }
            GalleryCommand::LoadNextPage { reply } => {
                self.store.advance_page();
                let result = self.load().await;
                self.publish_and_reply(reply, result);
            }
            GalleryCommand::SelectPhoto { index, reply } => {
                let result = self.store.select_photo(index);
                self.publish_and_reply(reply, result);
            }
            GalleryCommand::ClearSelection { reply } => {
                self.store.clear_selection();
                self.publish_and_reply(reply, ());
            }
            GalleryCommand::NextPhoto { reply } => {
                self.store.next_photo();
                self.publish_and_reply(reply, ());
            }
            GalleryCommand::PreviousPhoto { reply } => {
                self.store.previous_photo();
                self.publish_and_reply(reply, ());
            }
            GalleryCommand::ToggleFavoriteSelected { reply } => {
                let toggled = self.store.toggle_favorite_selected();
                self.publish_and_reply(reply, toggled);
            }
            GalleryCommand::ToggleFavorite { index, reply } => {
                let toggled = self.store.toggle_favorite(index);
                self.publish_and_reply(reply, toggled);
            }
            GalleryCommand::AddPhoto { image, title, reply } => {
                let id = self.store.add_new_photo(image, title.as_deref());
                self.publish_and_reply(reply, id);
            }
            GalleryCommand::DeletePhoto { index, reply } => {
                let removed = self.store.delete_photo(index);
                self.publish_and_reply(reply, removed);
            }
            GalleryCommand::Shutdown => {}
        }
    }

    async fn load(&mut self) -> Result<usize> {
        self.store.begin_load();
        self.publish();
        let fetched = self.source.load_photos().await;
        self.store.finish_load(fetched)
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.store.snapshot());
    }

    fn publish_and_reply<T>(&self, reply: Reply<T>, value: T) {
        self.publish();
        // The caller may have stopped waiting
        let _ = reply.send(value);
    }
}

/// Cloneable handle views use to read and mutate the gallery
#[derive(Clone)]
pub struct GalleryHandle {
    command_tx: mpsc::UnboundedSender<GalleryCommand>,
    snapshot_rx: watch::Receiver<GallerySnapshot>,
}

impl GalleryHandle {
    /// Latest published state
    pub fn snapshot(&self) -> GallerySnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver notified after every applied command
    pub fn subscribe(&self) -> watch::Receiver<GallerySnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.command_tx.is_closed()
    }

    fn send(&self, command: GalleryCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| GalleryError::ControllerClosed)
    }

    async fn request<T>(&self, make: impl FnOnce(Reply<T>) -> GalleryCommand) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.send(make(tx))?;
        rx.await.map_err(|_| GalleryError::ControllerClosed)
    }

    pub async fn load(&self) -> Result<usize> {
        self.request(|reply| GalleryCommand::Load { reply }).await?
    }

    pub async fn load_next_page(&self) -> Result<usize> {
        self.request(|reply| GalleryCommand::LoadNextPage { reply }).await?
    }

    pub async fn select_photo(&self, index: usize) -> Result<()> {
        self.request(|reply| GalleryCommand::SelectPhoto { index, reply }).await?
    }

    pub async fn clear_selection(&self) -> Result<()> {
        self.request(|reply| GalleryCommand::ClearSelection { reply }).await
    }

    pub async fn next_photo(&self) -> Result<()> {
        self.request(|reply| GalleryCommand::NextPhoto { reply }).await
    }

    pub async fn previous_photo(&self) -> Result<()> {
        self.request(|reply| GalleryCommand::PreviousPhoto { reply }).await
    }

    pub async fn toggle_favorite_selected(&self) -> Result<bool> {
        self.request(|reply| GalleryCommand::ToggleFavoriteSelected { reply }).await
    }

    pub async fn toggle_favorite(&self, index: usize) -> Result<bool> {
        self.request(|reply| GalleryCommand::ToggleFavorite { index, reply }).await
    }

    pub async fn add_new_photo(&self, image: ImageRef, title: Option<String>) -> Result<PhotoId> {
        self.request(|reply| GalleryCommand::AddPhoto { image, title, reply }).await
    }

    pub async fn delete_photo(&self, index: usize) -> Result<Option<Photo>> {
        self.request(|reply| GalleryCommand::DeletePhoto { index, reply }).await
    }

    /// Ask `provider` for an image and add it. A cancelled request adds nothing.
    pub async fn import(&self, provider: &dyn ImageProvider) -> Result<Option<PhotoId>> {
        match provider.request_image().await? {
            Some(image) => Ok(Some(self.add_new_photo(image, None).await?)),
            None => Ok(None),
        }
    }

    /// Stop the worker once previously queued commands are done
    pub fn shutdown(&self) -> Result<()> {
        self.send(GalleryCommand::Shutdown)
    }
}
