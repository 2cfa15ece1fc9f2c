// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::env as vars;
use crate::informers::{GroupVersionResource, SUPPORTED_RESOURCES};
use anyhow::{Context, Result};
use std::env;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace the operator runs in
    pub operator_namespace: String,
    /// Only watch this namespace; all namespaces when unset
    pub watch_namespace: Option<String>,
    /// Resource types to start informers for
    pub watched_resources: Vec<GroupVersionResource>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let operator_namespace = lookup(vars::OPERATOR_NAMESPACE)
            .filter(|ns| !ns.is_empty())
            .with_context(|| format!("{} environment variable not set", vars::OPERATOR_NAMESPACE))?;

        let watch_namespace = lookup(vars::WATCH_NAMESPACE).filter(|ns| !ns.is_empty());

        let watched_resources = match lookup(vars::WATCHED_RESOURCES) {
            Some(list) if !list.trim().is_empty() => list
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<GroupVersionResource>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .with_context(|| format!("Invalid {}", vars::WATCHED_RESOURCES))?,
            _ => SUPPORTED_RESOURCES
                .iter()
                .map(|entry| entry.group_version_resource())
                .collect(),
        };

        Ok(Config {
            operator_namespace,
            watch_namespace,
            watched_resources,
        })
    }
}
