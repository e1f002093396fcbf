//! MXNet resolver: parameter-server architecture, workers + ps.

use crate::cluster::{ClusterDef, TaskType};
use crate::frameworks::{FrameworkResolver, role_resources};
use crate::spec::{MxnetConfig, Resources};

impl FrameworkResolver for MxnetConfig {
    fn cluster_def(&self, seed: ClusterDef) -> ClusterDef {
        let mut cluster = seed;
        cluster.add_role(TaskType::Worker, self.n_workers);
        cluster.add_role(TaskType::Ps, self.n_ps);
        cluster
    }

    fn total_resources(
        &self,
        master: Option<&Resources>,
        cluster: &ClusterDef,
    ) -> Option<Resources> {
        if !cluster.is_distributed() {
            return master.cloned();
        }

        let total = master.cloned();
        let total = role_resources(
            total,
            cluster.count(TaskType::Worker),
            &self.worker_resources,
            self.default_worker_resources.as_ref(),
        );
        role_resources(
            total,
            cluster.count(TaskType::Ps),
            &self.ps_resources,
            self.default_ps_resources.as_ref(),
        )
    }
}
