//! Seeding a list view from a [`DataSource`].
//!
//! The fetch runs as a bubbletea command and answers with a [`LoadedMsg`]
//! carrying the ticket it was started with. Responses for an older ticket, or
//! for a view that has been unmounted, are dropped.

use super::types::{LoadedMsg, Record};
use super::ListView;
use crate::source::DataSource;
use bubbletea_rs::{Cmd, Msg};
use std::sync::Arc;

impl<T: Record> ListView<T> {
    /// Starts fetching from `source`. The source is remembered for
    /// [`ListView::retry`].
    ///
    /// Returns `None` once the view has been unmounted.
    pub fn load(&mut self, source: Arc<dyn DataSource<T>>) -> Option<Cmd> {
        self.source = Some(Arc::clone(&source));
        self.fetch(source)
    }

    /// Re-issues the last fetch. `None` if nothing was ever loaded or the
    /// view has been unmounted.
    pub fn retry(&mut self) -> Option<Cmd> {
        let source = self.source.clone()?;
        tracing::info!(view_id = self.view_id(), "retrying load");
        self.fetch(source)
    }

    fn fetch(&mut self, source: Arc<dyn DataSource<T>>) -> Option<Cmd> {
        let ticket = self.loader.begin()?;
        tracing::info!(
            view_id = ticket.view_id,
            generation = ticket.generation,
            source = %source.describe(),
            "loading"
        );
        let cmd: Cmd = Box::pin(async move {
            let result = source.fetch().await;
            Some(Box::new(LoadedMsg { ticket, result }) as Msg)
        });
        Some(cmd)
    }

    /// Applies a fetch result. Returns true if the collection was replaced.
    pub fn apply_loaded(&mut self, msg: LoadedMsg<T>) -> bool {
        match self.loader.complete(msg.ticket, msg.result) {
            Some(items) => {
                tracing::info!(view_id = self.view_id(), count = items.len(), "loaded");
                self.set_items(items);
                true
            }
            None => false,
        }
    }

    /// Tears the view down; in-flight responses will be ignored.
    pub fn unmount(&mut self) {
        self.loader.unmount();
    }

    /// True while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }
}
