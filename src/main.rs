// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::{Client, Resource, ResourceExt};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use rook_operator::config::Config;
use rook_operator::constants::OPERATOR_NAME;
use rook_operator::informers::{
    GenericInformer, GroupVersionResource, InformerEvent, ResourceResolver, SharedInformerFactory,
};
use rook_operator::kubernetes::wait_for_crd;
use rook_operator::types::CephCluster;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,kube=warn")),
        )
        .init();

    info!("Starting {}", OPERATOR_NAME);

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: operator_namespace={}, watch_namespace={}, resources={}",
        config.operator_namespace,
        config.watch_namespace.as_deref().unwrap_or("<all>"),
        config.watched_resources.len()
    );

    // Create Kubernetes client
    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;
    info!("Connected to Kubernetes cluster");

    // The CephCluster CRD is installed together with every other Rook CRD
    info!("Waiting for CephCluster CRD to become available...");
    wait_for_crd::<CephCluster>(&client).await?;

    let factory = Arc::new(SharedInformerFactory::new(
        client,
        config.watch_namespace.clone(),
    ));
    let resolver = ResourceResolver::new(factory.clone());

    let mut informers = Vec::new();
    for resource in &config.watched_resources {
        match resolver.for_resource(resource) {
            Ok(informer) => {
                // Subscribe before start so the initial list is not missed
                let events = informer.informer().subscribe();
                tokio::spawn(log_events(resource.clone(), events));
                informers.push((resource.clone(), informer));
            }
            Err(e) => error!("Skipping {}: {}", resource, e),
        }
    }

    let started = factory.start();
    info!("Started {} informers, waiting for caches to sync...", started);
    factory.wait_for_cache_sync().await?;

    for (resource, informer) in &informers {
        info!(
            "{} synced with {} objects",
            resource,
            informer.lister().list().len()
        );
    }
    log_cluster_status(&informers);

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Received shutdown signal, stopping operator");
    Ok(())
}

/// Log the state of every CephCluster in the synced cache
fn log_cluster_status(informers: &[(GroupVersionResource, GenericInformer)]) {
    let clusters = GroupVersionResource::new(
        &CephCluster::group(&()),
        &CephCluster::version(&()),
        &CephCluster::plural(&()),
    );
    let Some((_, informer)) = informers.iter().find(|(resource, _)| *resource == clusters) else {
        return;
    };

    for obj in informer.lister().list() {
        let name = obj.name_any();
        match (*obj).clone().try_parse::<CephCluster>() {
            Ok(cluster) => info!(
                "CephCluster {}/{}: {}",
                cluster.namespace().unwrap_or_default(),
                name,
                cluster.status_summary()
            ),
            Err(e) => warn!("Failed to parse CephCluster {}: {}", name, e),
        }
    }
}

/// Log every change seen by an informer
async fn log_events(resource: GroupVersionResource, mut events: broadcast::Receiver<InformerEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => {
                let action = match &event {
                    InformerEvent::Added(_) => "added",
                    InformerEvent::Updated(_) => "updated",
                    InformerEvent::Deleted(_) => "deleted",
                };
                let obj = event.object();
                info!(
                    "{} {}/{} {}",
                    resource,
                    obj.namespace().unwrap_or_default(),
                    obj.name_any(),
                    action
                );
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("{}: event log lagged, skipped {} events", resource, skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}
