//! Task roles and the resolved cluster shape.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Role a task plays in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Master,
    Worker,
    /// Parameter server.
    Ps,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskType::Master => f.write_str("master"),
            TaskType::Worker => f.write_str("worker"),
            TaskType::Ps => f.write_str("ps"),
        }
    }
}

/// Role → replica count, plus whether the run spans more than the master.
///
/// Every cluster definition this crate produces contains exactly one master;
/// roles with zero replicas are simply absent from the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterDef {
    counts: BTreeMap<TaskType, u32>,
    distributed: bool,
}

impl ClusterDef {
    /// Seed value: one master, nothing else, not distributed.
    pub fn single_master() -> Self {
        let mut counts = BTreeMap::new();
        counts.insert(TaskType::Master, 1);
        ClusterDef {
            counts,
            distributed: false,
        }
    }

    /// Record a role's replica count. Zero replicas leave the cluster
    /// untouched; a non-master role with replicas marks it distributed.
    pub fn add_role(&mut self, task: TaskType, replicas: u32) {
        if replicas == 0 {
            return;
        }
        self.counts.insert(task, replicas);
        if task != TaskType::Master {
            self.distributed = true;
        }
    }

    /// Replica count for a role; zero when the role is absent.
    pub fn count(&self, task: TaskType) -> u32 {
        self.counts.get(&task).copied().unwrap_or(0)
    }

    pub fn is_distributed(&self) -> bool {
        self.distributed
    }

    /// Full role → count view, e.g. for a manifest generator deciding how
    /// many replica manifests to emit.
    pub fn counts(&self) -> &BTreeMap<TaskType, u32> {
        &self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seed_cluster_is_a_lone_master() {
        let cluster = ClusterDef::single_master();
        assert_eq!(cluster.count(TaskType::Master), 1);
        assert_eq!(cluster.count(TaskType::Worker), 0);
        assert_eq!(cluster.count(TaskType::Ps), 0);
        assert!(!cluster.is_distributed());
    }

    #[test]
    fn adding_a_worker_marks_the_cluster_distributed() {
        let mut cluster = ClusterDef::single_master();
        cluster.add_role(TaskType::Worker, 2);
        assert_eq!(cluster.count(TaskType::Worker), 2);
        assert!(cluster.is_distributed());
    }

    #[test]
    fn zero_replicas_are_not_recorded() {
        let mut cluster = ClusterDef::single_master();
        cluster.add_role(TaskType::Worker, 0);
        cluster.add_role(TaskType::Ps, 0);
        assert!(!cluster.is_distributed());
        assert_eq!(cluster.counts().len(), 1);
    }
}
