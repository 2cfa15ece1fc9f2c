// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Prints the CRD manifests for the custom resources this operator owns.
//!
//! Usage: cargo run --bin crdgen > deploy/crds.yaml

use kube::CustomResourceExt;
use rook_operator::types::CephCluster;

fn main() -> anyhow::Result<()> {
    println!("---");
    print!("{}", serde_yaml::to_string(&CephCluster::crd())?);
    Ok(())
}
