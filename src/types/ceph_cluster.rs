// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Mon count used when the spec does not set one
pub const DEFAULT_MON_COUNT: u32 = 3;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "ceph.rook.io", version = "v1", kind = "CephCluster")]
#[kube(namespaced)]
#[kube(status = "CephClusterStatus")]
#[serde(rename_all = "camelCase")]
pub struct CephClusterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceph_version: Option<CephVersionSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir_host_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mon: Option<MonSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalSpec>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CephVersionSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_unsupported: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_multiple_per_node: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalSpec {
    pub enable: bool,
}

impl CephCluster {
    /// Check if this cluster is ready based on its status conditions
    pub fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.as_ref())
            .is_some_and(|conditions| {
                conditions
                    .iter()
                    .any(|c| c.condition_type == "Ready" && c.status == "True")
            })
    }

    /// Whether the operator connects to a Ceph cluster it does not manage
    pub fn is_external(&self) -> bool {
        self.spec.external.as_ref().is_some_and(|e| e.enable)
    }

    pub fn mon_count(&self) -> u32 {
        self.spec
            .mon
            .as_ref()
            .and_then(|m| m.count)
            .unwrap_or(DEFAULT_MON_COUNT)
    }

    /// Ceph health reported in status, e.g. HEALTH_OK
    pub fn ceph_health(&self) -> Option<&str> {
        self.status
            .as_ref()
            .and_then(|s| s.ceph.as_ref())
            .map(|c| c.health.as_str())
    }

    /// One-line state used when logging clusters
    pub fn status_summary(&self) -> String {
        format!(
            "ready={} health={} mons={} external={}",
            self.is_ready(),
            self.ceph_health().unwrap_or("UNKNOWN"),
            self.mon_count(),
            self.is_external()
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CephClusterStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceph: Option<CephStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CephStatus {
    pub health: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fsid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::api::ObjectMeta;

    fn make_cluster(name: &str, spec: CephClusterSpec, status: Option<CephClusterStatus>) -> CephCluster {
        CephCluster {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some("rook-ceph".to_string()),
                ..Default::default()
            },
            spec,
            status,
        }
    }

    fn condition(condition_type: &str, status: &str) -> Condition {
        Condition {
            condition_type: condition_type.to_string(),
            status: status.to_string(),
            reason: None,
            message: None,
        }
    }

    fn status_with(conditions: Option<Vec<Condition>>) -> CephClusterStatus {
        CephClusterStatus {
            phase: Some("Ready".to_string()),
            conditions,
            ..Default::default()
        }
    }

    #[test]
    fn test_is_ready_with_ready_condition() {
        let cluster = make_cluster(
            "my-cluster",
            CephClusterSpec::default(),
            Some(status_with(Some(vec![condition("Ready", "True")]))),
        );
        assert!(cluster.is_ready());
    }

    #[test]
    fn test_is_ready_with_not_ready_condition() {
        let cluster = make_cluster(
            "my-cluster",
            CephClusterSpec::default(),
            Some(status_with(Some(vec![condition("Ready", "False")]))),
        );
        assert!(!cluster.is_ready());
    }

    #[test]
    fn test_is_ready_with_multiple_conditions() {
        let cluster = make_cluster(
            "my-cluster",
            CephClusterSpec::default(),
            Some(status_with(Some(vec![
                condition("Progressing", "False"),
                condition("Ready", "True"),
            ]))),
        );
        assert!(cluster.is_ready());
    }

    #[test]
    fn test_is_ready_with_no_status() {
        let cluster = make_cluster("my-cluster", CephClusterSpec::default(), None);
        assert!(!cluster.is_ready());
        assert_eq!(cluster.ceph_health(), None);
    }

    #[test]
    fn test_mon_count_default_and_override() {
        let cluster = make_cluster("my-cluster", CephClusterSpec::default(), None);
        assert_eq!(cluster.mon_count(), DEFAULT_MON_COUNT);

        let cluster = make_cluster(
            "my-cluster",
            CephClusterSpec {
                mon: Some(MonSpec {
                    count: Some(5),
                    allow_multiple_per_node: None,
                }),
                ..Default::default()
            },
            None,
        );
        assert_eq!(cluster.mon_count(), 5);
    }

    #[test]
    fn test_status_summary() {
        let cluster = make_cluster("my-cluster", CephClusterSpec::default(), None);
        assert_eq!(
            cluster.status_summary(),
            "ready=false health=UNKNOWN mons=3 external=false"
        );

        let mut status = status_with(Some(vec![condition("Ready", "True")]));
        status.ceph = Some(CephStatus {
            health: "HEALTH_WARN".to_string(),
            ..Default::default()
        });
        let cluster = make_cluster(
            "my-cluster",
            CephClusterSpec {
                external: Some(ExternalSpec { enable: true }),
                ..Default::default()
            },
            Some(status),
        );
        assert_eq!(
            cluster.status_summary(),
            "ready=true health=HEALTH_WARN mons=3 external=true"
        );
    }

    #[test]
    fn test_deserialize_manifest() {
        let manifest = r#"
apiVersion: ceph.rook.io/v1
kind: CephCluster
metadata:
  name: rook-ceph
  namespace: rook-ceph
spec:
  cephVersion:
    image: quay.io/ceph/ceph:v18.2.2
  dataDirHostPath: /var/lib/rook
  mon:
    count: 3
    allowMultiplePerNode: false
  external:
    enable: true
status:
  phase: Ready
  ceph:
    health: HEALTH_OK
"#;
        let cluster: CephCluster = serde_yaml::from_str(manifest).unwrap();

        assert!(cluster.is_external());
        assert_eq!(cluster.mon_count(), 3);
        assert_eq!(cluster.ceph_health(), Some("HEALTH_OK"));
        assert_eq!(
            cluster.spec.data_dir_host_path.as_deref(),
            Some("/var/lib/rook")
        );
    }
}
