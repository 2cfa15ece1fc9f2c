// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for CRD discovery, type registration, and owner references.

pub mod crd;
pub mod owner_refs;
pub mod scheme;

pub use crd::{crd_exists, wait_for_crd};
pub use owner_refs::{get_controller_of, is_owned_by, set_owner_ref, upsert_owner_ref};
pub use scheme::Scheme;
