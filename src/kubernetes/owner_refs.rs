// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Owner reference helpers for object metadata.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};

/// Returns the reference marked as managing controller, if any.
pub fn get_controller_of(meta: &ObjectMeta) -> Option<&OwnerReference> {
    meta.owner_references
        .as_deref()
        .unwrap_or_default()
        .iter()
        .find(|owner| owner.controller == Some(true))
}

/// True when the controller reference of `meta` has the given uid.
pub fn is_owned_by(meta: &ObjectMeta, owner_uid: &str) -> bool {
    matches!(get_controller_of(meta), Some(OwnerReference { uid, .. }) if uid == owner_uid)
}

fn api_group(api_version: &str) -> &str {
    match api_version.split_once('/') {
        Some((group, _)) => group,
        None => "",
    }
}

/// Same API group, kind and name. Versions may differ.
pub fn refers_to_same_object(a: &OwnerReference, b: &OwnerReference) -> bool {
    api_group(&a.api_version) == api_group(&b.api_version) && a.kind == b.kind && a.name == b.name
}

/// Add `owner` to `meta`, replacing an existing reference to the same object.
pub fn upsert_owner_ref(meta: &mut ObjectMeta, owner: OwnerReference) {
    let refs = meta.owner_references.get_or_insert_with(Vec::new);
    match refs.iter_mut().find(|r| refers_to_same_object(r, &owner)) {
        Some(existing) => *existing = owner,
        None => refs.push(owner),
    }
}

/// Append a precomputed reference; a reference with the same uid is replaced.
pub fn set_owner_ref(meta: &mut ObjectMeta, owner: &OwnerReference) {
    let refs = meta.owner_references.get_or_insert_with(Vec::new);
    match refs.iter_mut().find(|r| r.uid == owner.uid) {
        Some(existing) => *existing = owner.clone(),
        None => refs.push(owner.clone()),
    }
}
