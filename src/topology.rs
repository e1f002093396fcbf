//! Deterministic host:port assignment for local (non-orchestrated) runs.

use crate::cluster::{ClusterDef, TaskType};
use std::collections::BTreeMap;
use tracing::warn;

/// Default bind host for local runs.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default master port.
pub const DEFAULT_MASTER_PORT: u16 = 10_000;
/// Default base port for the worker range.
pub const DEFAULT_WORKER_PORT: u16 = 11_000;
/// Default base port for the parameter-server range.
pub const DEFAULT_PS_PORT: u16 = 12_000;

/// Role → ordered replica addresses ("host:port").
///
/// Always carries exactly three keys; the worker and ps lists may be empty.
pub type TopologyDescriptor = BTreeMap<TaskType, Vec<String>>;

/// Host and base ports for local address synthesis.
///
/// The caller keeps the ranges apart: worker and ps blocks grow upward from
/// their base port, one port per replica, and nothing here checks them
/// against each other beyond a log warning.
#[derive(Debug, Clone)]
pub struct LocalPorts {
    pub host: String,
    pub master_port: u16,
    pub worker_port: u16,
    pub ps_port: u16,
}

impl Default for LocalPorts {
    fn default() -> Self {
        LocalPorts {
            host: DEFAULT_HOST.to_string(),
            master_port: DEFAULT_MASTER_PORT,
            worker_port: DEFAULT_WORKER_PORT,
            ps_port: DEFAULT_PS_PORT,
        }
    }
}

/// Assign one address to the master and consecutive addresses to every
/// worker and parameter-server replica, in role-declaration order.
pub fn local_topology(cluster: &ClusterDef, ports: &LocalPorts) -> TopologyDescriptor {
    warn_on_overlap(cluster, ports);

    let address = |port: u32| format!("{}:{}", ports.host, port);
    let role_addresses = |base: u16, replicas: u32| -> Vec<String> {
        (0..replicas).map(|i| address(base as u32 + i)).collect()
    };

    let mut topology = TopologyDescriptor::new();
    topology.insert(TaskType::Master, vec![address(ports.master_port as u32)]);
    topology.insert(
        TaskType::Worker,
        role_addresses(ports.worker_port, cluster.count(TaskType::Worker)),
    );
    topology.insert(
        TaskType::Ps,
        role_addresses(ports.ps_port, cluster.count(TaskType::Ps)),
    );
    topology
}

/// Non-overlap is the caller's contract; surface a violation in the log
/// without failing the synthesis.
fn warn_on_overlap(cluster: &ClusterDef, ports: &LocalPorts) {
    let ranges = [
        (TaskType::Master, ports.master_port as u32, 1),
        (
            TaskType::Worker,
            ports.worker_port as u32,
            cluster.count(TaskType::Worker),
        ),
        (TaskType::Ps, ports.ps_port as u32, cluster.count(TaskType::Ps)),
    ];

    for (i, &(task_a, base_a, len_a)) in ranges.iter().enumerate() {
        for &(task_b, base_b, len_b) in &ranges[i + 1..] {
            if len_a == 0 || len_b == 0 {
                continue;
            }
            if base_a < base_b + len_b && base_b < base_a + len_a {
                warn!(
                    first = %task_a,
                    second = %task_b,
                    "local port ranges overlap; supply base ports spaced wider than the replica counts"
                );
            }
        }
    }
}
