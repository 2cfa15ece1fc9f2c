// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking the Kubernetes API and feeding informers.

use crate::informers::{EventSource, EventStream};
use futures::StreamExt;
use http::{Request, Response};
use kube::api::DynamicObject;
use kube::client::Body;
use kube::core::ApiResource;
use kube::runtime::watcher::Event;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let (status, body) = self
            .find_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json(&path)));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a 404 not found response
pub fn not_found_json(path: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("the server could not find the requested resource ({})", path),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// Discovery response listing a single API group with one version
pub fn api_group_list_json(group: &str, version: &str) -> String {
    let group_version = format!("{}/{}", group, version);
    serde_json::json!({
        "kind": "APIGroupList",
        "apiVersion": "v1",
        "groups": [{
            "name": group,
            "versions": [{ "groupVersion": group_version, "version": version }],
            "preferredVersion": { "groupVersion": group_version, "version": version }
        }]
    })
    .to_string()
}

/// Discovery response for the resources served by one group version
pub fn api_resource_list_json(group_version: &str, resources: &[(&str, &str)]) -> String {
    let resources: Vec<_> = resources
        .iter()
        .map(|(plural, kind)| {
            serde_json::json!({
                "name": plural,
                "singularName": kind.to_lowercase(),
                "namespaced": true,
                "kind": kind,
                "verbs": ["get", "list", "watch"]
            })
        })
        .collect();
    serde_json::json!({
        "kind": "APIResourceList",
        "apiVersion": "v1",
        "groupVersion": group_version,
        "resources": resources
    })
    .to_string()
}

/// A namespaced dynamic object of the given resource type
pub fn dynamic_object(resource: &ApiResource, namespace: &str, name: &str) -> DynamicObject {
    let mut obj = DynamicObject::new(name, resource).within(namespace);
    obj.metadata.uid = Some(format!("uid-{}-{}", namespace, name));
    obj
}

/// Event source replaying a fixed initial list per resource, then idling.
#[derive(Default)]
pub struct StaticEventSource {
    objects: HashMap<ApiResource, Vec<DynamicObject>>,
}

impl StaticEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_objects(mut self, resource: &ApiResource, objects: Vec<DynamicObject>) -> Self {
        self.objects.entry(resource.clone()).or_default().extend(objects);
        self
    }
}

impl EventSource for StaticEventSource {
    fn watch(&self, resource: &ApiResource) -> EventStream {
        let objects = self.objects.get(resource).cloned().unwrap_or_default();

        let mut events = vec![Event::Init];
        events.extend(objects.into_iter().map(Event::InitApply));
        events.push(Event::InitDone);

        futures::stream::iter(events.into_iter().map(Ok))
            .chain(futures::stream::pending())
            .boxed()
    }
}
