//! Mock plugins, store and listeners shared by the unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

use parking_lot::Mutex;

use plm_protocols::error::{ListError, ListenerError, PersistenceError};
use plm_protocols::{
    Initializable, ListItem, ListMetadata, MetadataStore, PersistentList, PersistentListProvider,
};

use crate::events::{ListServiceEvent, ListServiceEventListener};
use crate::registry::PluginResolver;

pub const PROVIDER: &str = "mock-provider";
pub const FAILING_PROVIDER: &str = "failing-provider";
pub const LIST: &str = "mock-list";
pub const LOWERCASE_LIST: &str = "lowercase-list";
pub const FAILING_LIST: &str = "failing-list";

pub struct MockProvider {
    inits: Arc<AtomicUsize>,
    fail_init: bool,
}

impl MockProvider {
    pub fn new(inits: Arc<AtomicUsize>) -> Self {
        Self {
            inits,
            fail_init: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            inits: Arc::new(AtomicUsize::new(0)),
            fail_init: true,
        }
    }
}

impl Initializable for MockProvider {
    fn initialize(&self) -> Result<(), ListError> {
        self.inits.fetch_add(1, Ordering::SeqCst);
        if self.fail_init {
            return Err(ListError::InitializationFailed("provider offline".to_string()));
        }
        Ok(())
    }
}

impl PersistentListProvider for MockProvider {
    fn load_items(&self, _list: &ListMetadata) -> Result<Vec<ListItem>, ListError> {
        Ok(Vec::new())
    }

    fn add_item(&self, _list: &ListMetadata, _item: &ListItem, _index: usize) -> Result<(), ListError> {
        Ok(())
    }

    fn remove_item(&self, _list: &ListMetadata, _item: &ListItem) -> Result<bool, ListError> {
        Ok(false)
    }

    fn clear(&self, _list: &ListMetadata) -> Result<(), ListError> {
        Ok(())
    }

    fn as_initializable(&self) -> Option<&dyn Initializable> {
        Some(self)
    }
}

#[derive(Default)]
pub struct MockList {
    key: String,
    metadata: Option<ListMetadata>,
    provider: Option<Arc<dyn PersistentListProvider>>,
    items: Mutex<Vec<ListItem>>,
    inits: Arc<AtomicUsize>,
    lowercase_key: bool,
    fail_init: bool,
}

impl MockList {
    pub fn new(inits: Arc<AtomicUsize>) -> Self {
        Self {
            inits,
            ..Default::default()
        }
    }

    pub fn lowercase() -> Self {
        Self {
            lowercase_key: true,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_init: true,
            ..Default::default()
        }
    }
}

impl Initializable for MockList {
    fn initialize(&self) -> Result<(), ListError> {
        if self.provider.is_none() {
            return Err(ListError::ProviderMissing(self.key.clone()));
        }
        self.inits.fetch_add(1, Ordering::SeqCst);
        if self.fail_init {
            return Err(ListError::InitializationFailed("bad list".to_string()));
        }
        Ok(())
    }
}

impl PersistentList for MockList {
    fn key(&self) -> &str {
        &self.key
    }

    fn metadata(&self) -> Option<&ListMetadata> {
        self.metadata.as_ref()
    }

    fn load(&mut self, metadata: &ListMetadata) -> Result<(), ListError> {
        self.key = if self.lowercase_key {
            metadata.key.to_lowercase()
        } else {
            metadata.key.clone()
        };
        self.metadata = Some(metadata.clone());
        Ok(())
    }

    fn set_provider(&mut self, provider: Arc<dyn PersistentListProvider>) {
        self.provider = Some(provider);
    }

    fn provider(&self) -> Option<&Arc<dyn PersistentListProvider>> {
        self.provider.as_ref()
    }

    fn add(&self, items: &[ListItem]) -> Result<(), ListError> {
        self.items.lock().extend_from_slice(items);
        Ok(())
    }

    fn remove(&self, item: &ListItem) -> Result<bool, ListError> {
        let mut items = self.items.lock();
        let before = items.len();
        items.retain(|i| i != item);
        Ok(items.len() != before)
    }

    fn items(&self) -> Result<Vec<ListItem>, ListError> {
        Ok(self.items.lock().clone())
    }

    fn clear(&self) -> Result<(), ListError> {
        self.items.lock().clear();
        Ok(())
    }

    fn as_initializable(&self) -> Option<&dyn Initializable> {
        Some(self)
    }
}

/// Counters observed by tests.
#[derive(Default, Clone)]
pub struct InitCounters {
    pub providers: Arc<AtomicUsize>,
    pub lists: Arc<AtomicUsize>,
}

/// Resolver with the mock provider and list types registered.
pub fn mock_resolver() -> (Arc<PluginResolver>, InitCounters) {
    let counters = InitCounters::default();
    let resolver = PluginResolver::new();

    let provider_inits = counters.providers.clone();
    resolver
        .register_provider_type(PROVIDER, move || {
            Ok(Arc::new(MockProvider::new(provider_inits.clone())) as Arc<dyn PersistentListProvider>)
        })
        .unwrap();
    resolver
        .register_provider_type(FAILING_PROVIDER, || {
            Ok(Arc::new(MockProvider::failing()) as Arc<dyn PersistentListProvider>)
        })
        .unwrap();

    let list_inits = counters.lists.clone();
    resolver
        .register_list_type(LIST, move || {
            Ok(Box::new(MockList::new(list_inits.clone())) as Box<dyn PersistentList>)
        })
        .unwrap();
    resolver
        .register_list_type(LOWERCASE_LIST, || {
            Ok(Box::new(MockList::lowercase()) as Box<dyn PersistentList>)
        })
        .unwrap();
    resolver
        .register_list_type(FAILING_LIST, || {
            Ok(Box::new(MockList::failing()) as Box<dyn PersistentList>)
        })
        .unwrap();

    (Arc::new(resolver), counters)
}

/// In-memory metadata store with switchable failures.
#[derive(Default)]
pub struct MockStore {
    records: Mutex<Vec<ListMetadata>>,
    next_id: AtomicUsize,
    pub fail_lists: AtomicBool,
    pub fail_add: AtomicBool,
    pub fail_remove: AtomicBool,
    pub add_calls: AtomicUsize,
    pub remove_calls: AtomicUsize,
    /// Store keys lowercased, the way a case-insensitive backend would.
    pub lowercase_keys: AtomicBool,
    lists_gate: Mutex<Option<Arc<Barrier>>>,
}

impl MockStore {
    pub fn with_records(records: Vec<ListMetadata>) -> Self {
        let store = Self::default();
        for record in records {
            store.add_list(record).unwrap();
        }
        store.add_calls.store(0, Ordering::SeqCst);
        store
    }

    /// Make `lists()` wait on `gate` twice: once on entry, once before
    /// returning.
    pub fn gate_lists(&self, gate: Arc<Barrier>) {
        *self.lists_gate.lock() = Some(gate);
    }

    pub fn keys(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.key.clone()).collect()
    }
}

impl MetadataStore for MockStore {
    fn id(&self) -> &str {
        "mock"
    }

    fn lists(&self) -> Result<Vec<ListMetadata>, PersistenceError> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(PersistenceError::ConnectionError("store offline".to_string()));
        }
        let gate = self.lists_gate.lock().clone();
        if let Some(gate) = gate {
            gate.wait();
            gate.wait();
        }
        Ok(self.records.lock().clone())
    }

    fn add_list(&self, metadata: ListMetadata) -> Result<ListMetadata, PersistenceError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(PersistenceError::StorageError("disk full".to_string()));
        }
        let mut metadata = metadata;
        if self.lowercase_keys.load(Ordering::SeqCst) {
            metadata.key = metadata.key.to_lowercase();
        }
        let mut records = self.records.lock();
        if records.iter().any(|r| r.key == metadata.key) {
            return Err(PersistenceError::Duplicate(metadata.key));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let stored = metadata.with_id(id);
        records.push(stored.clone());
        Ok(stored)
    }

    fn remove_list(&self, key: &str) -> Result<(), PersistenceError> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(PersistenceError::StorageError("read-only".to_string()));
        }
        self.records.lock().retain(|r| r.key != key);
        Ok(())
    }
}

/// Listener appending `"<name>:<operation>:<key>"` to a shared log.
pub struct RecordingListener {
    name: String,
    log: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingListener {
    pub fn new(name: &str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.to_string(),
            log,
            fail: false,
        }
    }

    pub fn failing(name: &str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            fail: true,
            ..Self::new(name, log)
        }
    }

    fn record(&self, operation: &str, event: &ListServiceEvent<'_>) -> Result<(), ListenerError> {
        self.log
            .lock()
            .push(format!("{}:{}:{}", self.name, operation, event.list().key()));
        if self.fail {
            return Err(ListenerError::new(format!("{} rejected the event", self.name)));
        }
        Ok(())
    }
}

impl ListServiceEventListener for RecordingListener {
    fn list_added(&self, event: &ListServiceEvent<'_>) -> Result<(), ListenerError> {
        self.record("added", event)
    }

    fn list_removed(&self, event: &ListServiceEvent<'_>) -> Result<(), ListenerError> {
        self.record("removed", event)
    }
}
