// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Read-only accessors over an informer's store.

use crate::error::{Result, RookError};
use crate::informers::GroupResource;
use kube::api::DynamicObject;
use kube::core::{ApiResource, Selector, SelectorExt};
use kube::runtime::reflector::{ObjectRef, Store};
use kube::ResourceExt;
use std::sync::Arc;

/// Lists and gets objects of one resource type from a shared store.
#[derive(Clone)]
pub struct GenericLister {
    store: Store<DynamicObject>,
    api_resource: ApiResource,
    resource: GroupResource,
}

impl GenericLister {
    pub fn new(store: Store<DynamicObject>, api_resource: ApiResource, resource: GroupResource) -> Self {
        Self {
            store,
            api_resource,
            resource,
        }
    }

    pub fn resource(&self) -> &GroupResource {
        &self.resource
    }

    /// All cached objects across namespaces.
    pub fn list(&self) -> Vec<Arc<DynamicObject>> {
        self.store.state()
    }

    /// Cached objects whose labels satisfy `selector`.
    pub fn list_matching(&self, selector: &Selector) -> Vec<Arc<DynamicObject>> {
        self.store
            .state()
            .into_iter()
            .filter(|obj| selector.matches(obj.labels()))
            .collect()
    }

    /// Get a cluster-scoped object by name.
    pub fn get(&self, name: &str) -> Result<Arc<DynamicObject>> {
        let key = ObjectRef::new_with(name, self.api_resource.clone());
        self.store.get(&key).ok_or_else(|| RookError::NotFound {
            resource: self.resource.clone(),
            name: name.to_string(),
        })
    }

    pub fn by_namespace(&self, namespace: &str) -> GenericNamespaceLister {
        GenericNamespaceLister {
            lister: self.clone(),
            namespace: namespace.to_string(),
        }
    }
}

/// A [`GenericLister`] restricted to one namespace.
#[derive(Clone)]
pub struct GenericNamespaceLister {
    lister: GenericLister,
    namespace: String,
}

impl GenericNamespaceLister {
    fn in_namespace(&self, obj: &DynamicObject) -> bool {
        obj.namespace().as_deref() == Some(self.namespace.as_str())
    }

    pub fn list(&self) -> Vec<Arc<DynamicObject>> {
        self.lister
            .store
            .state()
            .into_iter()
            .filter(|obj| self.in_namespace(obj))
            .collect()
    }

    pub fn list_matching(&self, selector: &Selector) -> Vec<Arc<DynamicObject>> {
        self.lister
            .store
            .state()
            .into_iter()
            .filter(|obj| self.in_namespace(obj) && selector.matches(obj.labels()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Result<Arc<DynamicObject>> {
        let key = ObjectRef::new_with(name, self.lister.api_resource.clone()).within(&self.namespace);
        self.lister.store.get(&key).ok_or_else(|| RookError::NotFound {
            resource: self.lister.resource.clone(),
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::informers::factory::{run_informer, Informer};
    use crate::informers::SUPPORTED_RESOURCES;
    use crate::test_utils::dynamic_object;
    use futures::StreamExt;
    use kube::core::Expression;
    use kube::runtime::watcher::Event;
    use std::collections::{BTreeMap, BTreeSet};

    async fn synced_lister(objects: Vec<DynamicObject>) -> GenericLister {
        let entry = SUPPORTED_RESOURCES
            .iter()
            .find(|e| e.resource == "cephobjectstores")
            .unwrap();
        let ar = entry.api_resource();
        let (informer, writer) = Informer::new(ar.clone());

        let mut events = vec![Event::Init];
        events.extend(objects.into_iter().map(Event::InitApply));
        events.push(Event::InitDone);
        let stream = futures::stream::iter(events.into_iter().map(Ok)).boxed();
        run_informer(informer.clone(), writer, stream).await;

        GenericLister::new(
            informer.store(),
            ar,
            entry.group_version_resource().group_resource(),
        )
    }

    fn store_object(namespace: &str, name: &str, tier: &str) -> DynamicObject {
        let ar = SUPPORTED_RESOURCES
            .iter()
            .find(|e| e.resource == "cephobjectstores")
            .unwrap()
            .api_resource();
        let mut obj = dynamic_object(&ar, namespace, name);
        obj.metadata.labels = Some(BTreeMap::from([("tier".to_string(), tier.to_string())]));
        obj
    }

    #[tokio::test]
    async fn test_list_returns_all_objects() {
        let lister = synced_lister(vec![
            store_object("rook-ceph", "store-a", "hot"),
            store_object("other", "store-b", "cold"),
        ])
        .await;

        assert_eq!(lister.list().len(), 2);
    }

    #[tokio::test]
    async fn test_list_matching_filters_on_labels() {
        let lister = synced_lister(vec![
            store_object("rook-ceph", "store-a", "hot"),
            store_object("rook-ceph", "store-b", "cold"),
        ])
        .await;

        let selector = Selector::from_iter([Expression::Equal("tier".into(), "cold".into())]);
        let matched = lister.list_matching(&selector);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name_any(), "store-b");

        let everything = Selector::from_iter(Vec::<Expression>::new());
        assert_eq!(lister.list_matching(&everything).len(), 2);
    }

    #[tokio::test]
    async fn test_list_matching_set_based_selector() {
        let lister = synced_lister(vec![
            store_object("rook-ceph", "store-a", "hot"),
            store_object("rook-ceph", "store-b", "cold"),
            store_object("other", "store-c", "archive"),
        ])
        .await;

        let tiers = BTreeSet::from(["hot".to_string(), "archive".to_string()]);
        let selector = Selector::from_iter([Expression::In("tier".into(), tiers.clone())]);
        let mut names: Vec<String> = lister.list_matching(&selector).iter().map(|o| o.name_any()).collect();
        names.sort();
        assert_eq!(names, vec!["store-a".to_string(), "store-c".to_string()]);

        let ns_matched = lister
            .by_namespace("rook-ceph")
            .list_matching(&Selector::from_iter([Expression::NotIn("tier".into(), tiers)]));
        assert_eq!(ns_matched.len(), 1);
        assert_eq!(ns_matched[0].name_any(), "store-b");
    }

    #[tokio::test]
    async fn test_namespace_lister_scopes_list_and_get() {
        let lister = synced_lister(vec![
            store_object("rook-ceph", "store-a", "hot"),
            store_object("other", "store-b", "cold"),
        ])
        .await;

        let ns = lister.by_namespace("rook-ceph");
        assert_eq!(ns.list().len(), 1);
        assert_eq!(ns.get("store-a").unwrap().name_any(), "store-a");
        assert!(ns.get("store-b").is_err());
    }

    #[tokio::test]
    async fn test_get_not_found_message() {
        let lister = synced_lister(vec![store_object("rook-ceph", "store-a", "hot")]).await;

        let err = lister.by_namespace("rook-ceph").get("missing").unwrap_err();
        assert_eq!(
            err.to_string(),
            "cephobjectstores.ceph.rook.io \"missing\" not found"
        );
        // Namespaced objects are not reachable through the cluster-scoped key
        assert!(lister.get("store-a").is_err());
    }
}
