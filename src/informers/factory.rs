// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Shared per-type watch caches backed by reflector stores.

use crate::constants::INFORMER_EVENT_CAPACITY;
use crate::error::{Result, RookError};
use futures::stream::BoxStream;
use futures::StreamExt;
use kube::api::{Api, DynamicObject};
use kube::core::ApiResource;
use kube::runtime::reflector::store::Writer;
use kube::runtime::reflector::{ObjectRef, Store};
use kube::runtime::watcher::{self, watcher, Event};
use kube::runtime::WatchStreamExt;
use kube::{Client, ResourceExt};
use kube_runtime::watcher::Config as WatcherConfig;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Stream of watch events for a single resource type.
pub type EventStream = BoxStream<'static, std::result::Result<Event<DynamicObject>, watcher::Error>>;

/// Produces the watch event stream that feeds an informer.
pub trait EventSource: Send + Sync {
    fn watch(&self, resource: &ApiResource) -> EventStream;
}

/// Watches resources through the Kubernetes API server.
pub struct ApiEventSource {
    client: Client,
    namespace: Option<String>,
    config: WatcherConfig,
}

impl ApiEventSource {
    pub fn new(client: Client, namespace: Option<String>) -> Self {
        Self {
            client,
            namespace,
            config: WatcherConfig::default(),
        }
    }
}

impl EventSource for ApiEventSource {
    fn watch(&self, resource: &ApiResource) -> EventStream {
        let api: Api<DynamicObject> = match &self.namespace {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, resource),
            None => Api::all_with(self.client.clone(), resource),
        };
        watcher(api, self.config.clone()).default_backoff().boxed()
    }
}

/// Change notification published by an informer after its store is updated.
#[derive(Debug, Clone)]
pub enum InformerEvent {
    Added(Arc<DynamicObject>),
    Updated(Arc<DynamicObject>),
    Deleted(Arc<DynamicObject>),
}

impl InformerEvent {
    pub fn object(&self) -> &Arc<DynamicObject> {
        match self {
            InformerEvent::Added(o) | InformerEvent::Updated(o) | InformerEvent::Deleted(o) => o,
        }
    }
}

/// Handle to a running watch cache for one resource type.
///
/// Cloning is cheap; all clones share the same store and event channel.
#[derive(Clone)]
pub struct Informer {
    resource: ApiResource,
    store: Store<DynamicObject>,
    events: broadcast::Sender<InformerEvent>,
}

impl Informer {
    pub(crate) fn new(resource: ApiResource) -> (Self, Writer<DynamicObject>) {
        let writer = Writer::new(resource.clone());
        let (events, _) = broadcast::channel(INFORMER_EVENT_CAPACITY);
        let informer = Self {
            resource,
            store: writer.as_reader(),
            events,
        };
        (informer, writer)
    }

    pub fn resource(&self) -> &ApiResource {
        &self.resource
    }

    /// Read handle on the cache's index.
    pub fn store(&self) -> Store<DynamicObject> {
        self.store.clone()
    }

    /// Register for add/update/delete notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<InformerEvent> {
        self.events.subscribe()
    }

    /// Wait until the initial list has been loaded into the store.
    pub async fn wait_until_ready(&self) -> Result<()> {
        self.store
            .wait_until_ready()
            .await
            .map_err(|_| RookError::InformerStopped(self.resource.kind.clone()))
    }

    fn object_ref(&self, obj: &DynamicObject) -> ObjectRef<DynamicObject> {
        ObjectRef::from_obj_with(obj, self.resource.clone())
    }

    fn publish(&self, event: InformerEvent) {
        // No subscribers is not an error
        let _ = self.events.send(event);
    }
}

impl fmt::Debug for Informer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Informer")
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

/// Apply watch events to the informer's store and publish notifications.
pub(crate) async fn run_informer(
    informer: Informer,
    mut writer: Writer<DynamicObject>,
    mut stream: EventStream,
) {
    let kind = informer.resource.kind.clone();
    let mut relisted: HashSet<ObjectRef<DynamicObject>> = HashSet::new();
    let mut pending: Vec<InformerEvent> = Vec::new();

    while let Some(item) = stream.next().await {
        let event = match item {
            Ok(event) => event,
            Err(e) => {
                warn!("Watch error for {}: {}", kind, e);
                continue;
            }
        };

        match &event {
            Event::Apply(obj) => {
                let existed = informer.store.get(&informer.object_ref(obj)).is_some();
                writer.apply_watcher_event(&event);
                let obj = Arc::new(obj.clone());
                debug!("{} {} applied", kind, obj.name_any());
                informer.publish(if existed {
                    InformerEvent::Updated(obj)
                } else {
                    InformerEvent::Added(obj)
                });
            }
            Event::Delete(obj) => {
                writer.apply_watcher_event(&event);
                debug!("{} {} deleted", kind, obj.name_any());
                informer.publish(InformerEvent::Deleted(Arc::new(obj.clone())));
            }
            Event::Init => {
                relisted.clear();
                pending.clear();
                writer.apply_watcher_event(&event);
            }
            Event::InitApply(obj) => {
                let obj_ref = informer.object_ref(obj);
                let obj_arc = Arc::new(obj.clone());
                pending.push(if informer.store.get(&obj_ref).is_some() {
                    InformerEvent::Updated(obj_arc)
                } else {
                    InformerEvent::Added(obj_arc)
                });
                relisted.insert(obj_ref);
                writer.apply_watcher_event(&event);
            }
            Event::InitDone => {
                let stale: Vec<_> = informer
                    .store
                    .state()
                    .into_iter()
                    .filter(|obj| !relisted.contains(&informer.object_ref(obj)))
                    .collect();
                writer.apply_watcher_event(&event);
                info!("{} informer synced with {} objects", kind, relisted.len());
                for event in pending.drain(..) {
                    informer.publish(event);
                }
                for obj in stale {
                    informer.publish(InformerEvent::Deleted(obj));
                }
                relisted.clear();
            }
        }
    }

    debug!("Watch stream for {} ended", kind);
}

#[derive(Default)]
struct FactoryState {
    informers: HashMap<ApiResource, Informer>,
    unstarted: Vec<(Informer, Writer<DynamicObject>)>,
    started: Vec<Informer>,
}

/// Creates and owns one informer per resource type.
pub struct SharedInformerFactory {
    source: Arc<dyn EventSource>,
    state: Mutex<FactoryState>,
}

impl SharedInformerFactory {
    /// Factory watching through the API server, optionally limited to one namespace.
    pub fn new(client: Client, namespace: Option<String>) -> Self {
        Self::with_source(Arc::new(ApiEventSource::new(client, namespace)))
    }

    pub fn with_source(source: Arc<dyn EventSource>) -> Self {
        Self {
            source,
            state: Mutex::new(FactoryState::default()),
        }
    }

    /// Get the informer for a resource type, creating it on first use.
    pub fn informer_for(&self, resource: &ApiResource) -> Informer {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(informer) = state.informers.get(resource) {
            return informer.clone();
        }

        debug!("Creating informer for {}", resource.api_version);
        let (informer, writer) = Informer::new(resource.clone());
        state.informers.insert(resource.clone(), informer.clone());
        state.unstarted.push((informer.clone(), writer));
        informer
    }

    /// Spawn every informer that is not running yet. Returns how many were started.
    pub fn start(&self) -> usize {
        let unstarted = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let unstarted: Vec<_> = state.unstarted.drain(..).collect();
            state
                .started
                .extend(unstarted.iter().map(|(informer, _)| informer.clone()));
            unstarted
        };

        let count = unstarted.len();
        for (informer, writer) in unstarted {
            info!(
                "Starting informer for {} ({})",
                informer.resource.kind, informer.resource.api_version
            );
            let stream = self.source.watch(&informer.resource);
            tokio::spawn(run_informer(informer, writer, stream));
        }
        count
    }

    /// Wait until every started informer has loaded its initial list.
    pub async fn wait_for_cache_sync(&self) -> Result<()> {
        let started = {
            let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.started.clone()
        };
        futures::future::try_join_all(started.iter().map(|informer| informer.wait_until_ready())).await?;
        Ok(())
    }
}
