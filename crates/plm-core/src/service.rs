//! The list service: registry and factory of persistent lists.
//!
//! Reads (`get_list`, `get_lists` and the first check in `ensure_list`) go
//! straight to the `DashMap` and never take the service lock. Bootstrap,
//! `create_list`, the slow path of `ensure_list` and `remove_list` serialize
//! on `sync_lock` and call the metadata store while holding it.
//!
//! Visibility: an insert completed under `sync_lock` is observed by every
//! later `get_list` on any thread, because the map publishes through its
//! shard locks. `loaded` is stored with `Release` and read with `Acquire`, so
//! a reader that sees it set also sees every bootstrapped entry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use plm_protocols::error::ListServiceError;
use plm_protocols::{
    LifecycleHook, ListMetadata, MetadataStore, PersistentList, PersistentListProvider,
};

use crate::events::{EventListenerList, ListChange, ListServiceEvent, ListServiceEventListener};
use crate::lifecycle::priority;
use crate::registry::{initialize_if_supported, PluginResolver};

/// Outcome of a bootstrap pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapSummary {
    /// Records turned into live lists.
    pub loaded: usize,
    /// Records skipped because a type could not be resolved, the list
    /// failed to load, or its key is taken by a list from another record.
    pub skipped: usize,
}

/// Registry holding at most one live list per key.
pub struct ListService {
    store: Arc<dyn MetadataStore>,
    resolver: Arc<PluginResolver>,
    default_provider: String,
    lists: DashMap<String, Arc<dyn PersistentList>>,
    sync_lock: Mutex<()>,
    loaded: AtomicBool,
    listeners: EventListenerList,
}

impl ListService {
    /// Create a service that must be bootstrapped with [`on_startup`] before
    /// lookups return anything.
    ///
    /// `default_provider` is the provider type wired into lists created
    /// through [`create_list`] and [`ensure_list`].
    ///
    /// [`on_startup`]: Self::on_startup
    /// [`create_list`]: Self::create_list
    /// [`ensure_list`]: Self::ensure_list
    pub fn new(
        store: Arc<dyn MetadataStore>,
        resolver: Arc<PluginResolver>,
        default_provider: impl Into<String>,
    ) -> Self {
        Self {
            store,
            resolver,
            default_provider: default_provider.into(),
            lists: DashMap::new(),
            sync_lock: Mutex::new(()),
            loaded: AtomicBool::new(false),
            listeners: EventListenerList::new(),
        }
    }

    /// Mark the service loaded without reading the metadata store.
    pub fn without_bootstrap(self) -> Self {
        self.loaded.store(true, Ordering::Release);
        self
    }

    pub fn store(&self) -> &Arc<dyn MetadataStore> {
        &self.store
    }

    pub fn resolver(&self) -> &Arc<PluginResolver> {
        &self.resolver
    }

    pub fn default_provider_type(&self) -> &str {
        &self.default_provider
    }

    /// Whether bootstrap has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Get the list for `key`, creating it if it does not exist yet.
    ///
    /// Concurrent callers with the same key all receive the same instance and
    /// exactly one of them creates it.
    pub fn ensure_list(
        &self,
        list_type: &str,
        key: &str,
        description: Option<&str>,
    ) -> Result<Arc<dyn PersistentList>, ListServiceError> {
        validate_list_type(list_type)?;
        validate_key(key)?;

        if let Some(list) = self.lookup(key) {
            return Ok(list);
        }

        let list = {
            let _guard = self.sync_lock.lock();
            if let Some(list) = self.lookup(key) {
                return Ok(list);
            }

            debug!("Could not find the '{}' list. Creating a new list...", key);
            self.create_locked(list_type, key, description)?
        };

        self.fire(ListChange::Added(list.clone()));
        debug!("The '{}' list was created.", key);

        Ok(list)
    }

    /// Create a new list.
    ///
    /// Fails with [`ListServiceError::DuplicateKey`] if the key is taken. The
    /// metadata record is persisted before the list becomes visible; if
    /// anything fails, the registry is left as it was.
    pub fn create_list(
        &self,
        list_type: &str,
        key: &str,
        description: Option<&str>,
    ) -> Result<Arc<dyn PersistentList>, ListServiceError> {
        validate_list_type(list_type)?;
        validate_key(key)?;

        debug!("Creating the '{}' list...", key);

        let list = {
            let _guard = self.sync_lock.lock();
            self.create_locked(list_type, key, description)?
        };

        self.fire(ListChange::Added(list.clone()));
        debug!("The '{}' list was created.", key);

        Ok(list)
    }

    /// Delete a list and its metadata record.
    ///
    /// Removing an absent key is a no-op. If the store refuses the delete,
    /// the list stays registered.
    pub fn remove_list(&self, key: &str) -> Result<(), ListServiceError> {
        validate_key(key)?;

        if !self.lists.contains_key(key) {
            return Ok(());
        }

        debug!("Deleting the '{}' list...", key);

        let removed = {
            let _guard = self.sync_lock.lock();
            let Some(list) = self.lookup(key) else {
                return Ok(());
            };

            let stored_key = list.metadata().map(|m| m.key.as_str()).unwrap_or(key);
            self.store.remove_list(stored_key)?;
            self.lists.remove(key);
            list
        };

        self.fire(ListChange::Removed(removed));
        debug!("The '{}' list was deleted.", key);

        Ok(())
    }

    /// Look up a list by key.
    ///
    /// Returns `None` both for unknown keys and while bootstrap has not
    /// completed.
    pub fn get_list(&self, key: &str) -> Result<Option<Arc<dyn PersistentList>>, ListServiceError> {
        if key.is_empty() {
            return Err(ListServiceError::InvalidArgument(
                "The list key must be defined".to_string(),
            ));
        }
        if !self.is_loaded() {
            return Ok(None);
        }

        Ok(self.lookup(key))
    }

    /// Snapshot of all registered lists, in no particular order.
    pub fn get_lists(&self) -> Vec<Arc<dyn PersistentList>> {
        if !self.is_loaded() {
            return Vec::new();
        }
        self.lists.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.is_loaded() && self.lists.contains_key(key)
    }

    /// Number of registered lists. Zero until bootstrap completes.
    pub fn len(&self) -> usize {
        if !self.is_loaded() {
            return 0;
        }
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add_event_listener(&self, listener: Arc<dyn ListServiceEventListener>) {
        self.listeners.add(listener);
    }

    /// Returns `false` if the listener was not registered.
    pub fn remove_event_listener(&self, listener: &Arc<dyn ListServiceEventListener>) -> bool {
        self.listeners.remove(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Rebuild the registry from the metadata store.
    pub fn on_startup(&self) -> Result<(), ListServiceError> {
        self.bootstrap().map(|_| ())
    }

    pub fn on_shutdown(&self) -> Result<(), ListServiceError> {
        debug!("List service shutting down with {} lists", self.lists.len());
        Ok(())
    }

    /// Load every stored list.
    ///
    /// Holds the service lock for the whole pass. A record whose provider or
    /// list type cannot be resolved, or whose list fails to load, is logged
    /// and skipped. Runs at most once: after a successful pass, or when the
    /// service was built [`without_bootstrap`](Self::without_bootstrap), it
    /// returns an empty summary.
    pub fn bootstrap(&self) -> Result<BootstrapSummary, ListServiceError> {
        let _guard = self.sync_lock.lock();
        if self.is_loaded() {
            debug!("List service already loaded, skipping bootstrap");
            return Ok(BootstrapSummary::default());
        }

        debug!("Loading the configured lists from the '{}' store...", self.store.id());

        let records = self.store.lists()?;
        let mut summary = BootstrapSummary::default();

        for metadata in records {
            if !self.types_resolvable(&metadata) {
                summary.skipped += 1;
                continue;
            }

            let list = match self.materialize(&metadata) {
                Ok(list) => list,
                Err(e) => {
                    error!("Could not load the '{}' list: {}", metadata.key, e);
                    summary.skipped += 1;
                    continue;
                }
            };

            let canonical = list.key().to_string();
            if let Some(existing) = self.lookup(&canonical) {
                // Created before bootstrap from this same record.
                if existing.metadata().is_some_and(|m| m.key == metadata.key) {
                    debug!("The '{}' list is already live, keeping it", canonical);
                    summary.loaded += 1;
                } else {
                    warn!("Skipping stored list '{}': key '{}' is already loaded", metadata.key, canonical);
                    summary.skipped += 1;
                }
                continue;
            }

            self.lists.insert(canonical, list);
            summary.loaded += 1;
        }

        self.loaded.store(true, Ordering::Release);
        info!("Loaded {} lists ({} skipped).", summary.loaded, summary.skipped);

        Ok(summary)
    }

    fn lookup(&self, key: &str) -> Option<Arc<dyn PersistentList>> {
        self.lists.get(key).map(|entry| entry.value().clone())
    }

    /// Must be called with `sync_lock` held.
    fn create_locked(
        &self,
        list_type: &str,
        key: &str,
        description: Option<&str>,
    ) -> Result<Arc<dyn PersistentList>, ListServiceError> {
        if self.lists.contains_key(key) {
            return Err(ListServiceError::DuplicateKey(key.to_string()));
        }

        let provider = self.resolver.resolve_provider(&self.default_provider)?;
        let list = self.resolver.resolve_list(list_type)?;

        let metadata = ListMetadata::new(key, self.default_provider.as_str(), list_type)
            .with_description(description);
        let metadata = self.store.add_list(metadata)?;

        let list = match wire(list, &metadata, provider) {
            Ok(list) => list,
            Err(e) => {
                self.discard_record(&metadata.key);
                return Err(e);
            }
        };

        let canonical = list.key().to_string();
        if canonical != key && self.lists.contains_key(&canonical) {
            self.discard_record(&metadata.key);
            return Err(ListServiceError::DuplicateKey(canonical));
        }

        self.lists.insert(canonical, list.clone());
        Ok(list)
    }

    fn types_resolvable(&self, metadata: &ListMetadata) -> bool {
        let mut resolvable = true;
        if !self.resolver.has_provider_type(&metadata.provider_type) {
            error!(
                "Could not load the '{}' provider type for list '{}'.",
                metadata.provider_type, metadata.key
            );
            resolvable = false;
        }
        if !self.resolver.has_list_type(&metadata.list_type) {
            error!(
                "Could not load the '{}' list type for list '{}'.",
                metadata.list_type, metadata.key
            );
            resolvable = false;
        }
        resolvable
    }

    fn materialize(&self, metadata: &ListMetadata) -> Result<Arc<dyn PersistentList>, ListServiceError> {
        let provider = self.resolver.resolve_provider(&metadata.provider_type)?;
        let list = self.resolver.resolve_list(&metadata.list_type)?;
        wire(list, metadata, provider)
    }

    fn discard_record(&self, key: &str) {
        if let Err(e) = self.store.remove_list(key) {
            warn!("Could not roll back stored metadata for list '{}': {}", key, e);
        }
    }

    fn fire(&self, change: ListChange) {
        let event = ListServiceEvent::new(self, change);
        self.listeners.fire(&event);
    }
}

impl LifecycleHook for ListService {
    fn name(&self) -> &str {
        "list-service"
    }

    fn on_startup(&self) -> Result<(), ListServiceError> {
        ListService::on_startup(self)
    }

    fn on_shutdown(&self) -> Result<(), ListServiceError> {
        ListService::on_shutdown(self)
    }

    fn priority(&self) -> i32 {
        priority::LIST_SERVICE
    }
}

/// Load, attach the provider, then initialize.
fn wire(
    mut list: Box<dyn PersistentList>,
    metadata: &ListMetadata,
    provider: Arc<dyn PersistentListProvider>,
) -> Result<Arc<dyn PersistentList>, ListServiceError> {
    list.load(metadata)?;
    list.set_provider(provider);
    initialize_if_supported(list.as_initializable())?;
    Ok(Arc::from(list))
}

fn validate_list_type(list_type: &str) -> Result<(), ListServiceError> {
    if list_type.is_empty() {
        return Err(ListServiceError::InvalidArgument(
            "The list type must be defined.".to_string(),
        ));
    }
    Ok(())
}

fn validate_key(key: &str) -> Result<(), ListServiceError> {
    if key.is_empty() {
        return Err(ListServiceError::InvalidArgument(
            "The list must have a key.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
