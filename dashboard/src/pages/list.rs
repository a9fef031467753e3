use shared::types::Entity;
use tracing::{debug, warn};

use crate::api::{ApiError, Backend};

/// State behind an entity table: the fetched collection, the search box and
/// a page-level error string.
#[derive(Debug, Clone)]
pub struct ListPage<T: Entity> {
    items: Vec<T>,
    query: String,
    error: Option<String>,
    loading: bool,
}

impl<T: Entity> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            query: String::new(),
            error: None,
            loading: false,
        }
    }
}

impl<T: Entity> ListPage<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a fetch as started. Returns `false` (and changes nothing) if one
    /// is already running.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    /// Apply a fetch result. Failures empty the list and surface a message;
    /// nothing is retried. Ignored if no fetch was started.
    pub fn finish_load(&mut self, result: Result<Vec<T>, ApiError>) {
        if !self.loading {
            return;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                debug!("Loaded {} {}", items.len(), T::COLLECTION);
                self.items = items;
            }
            Err(e) => {
                warn!("Loading {} failed: {}", T::COLLECTION, e);
                self.items.clear();
                self.error = Some(e.user_message());
            }
        }
    }

    pub async fn load<B: Backend>(&mut self, backend: &B, token: &str) {
        if !self.begin_load() {
            return;
        }
        let result = backend.list::<T>(token).await;
        self.finish_load(result);
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Items matching the current search, in fetch order.
    pub fn visible(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| item.matches(&self.query))
            .collect()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Patch in a created or edited item without re-fetching.
    pub fn upsert(&mut self, item: T) {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    pub fn remove(&mut self, id: i64) -> Option<T> {
        let pos = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(pos))
    }
}
