//! Horovod resolver: allreduce architecture, workers only.

use crate::cluster::{ClusterDef, TaskType};
use crate::frameworks::{FrameworkResolver, role_resources};
use crate::spec::{HorovodConfig, Resources};

impl FrameworkResolver for HorovodConfig {
    fn cluster_def(&self, seed: ClusterDef) -> ClusterDef {
        let mut cluster = seed;
        cluster.add_role(TaskType::Worker, self.n_workers);
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

        role_resources(
            master.cloned(),
            cluster.count(TaskType::Worker),
            &self.worker_resources,
            self.default_worker_resources.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn horovod_never_contributes_parameter_servers() {
        let config = HorovodConfig {
            n_workers: 4,
            ..HorovodConfig::default()
        };

        let cluster = config.cluster_def(ClusterDef::single_master());
        assert_eq!(cluster.count(TaskType::Master), 1);
        assert_eq!(cluster.count(TaskType::Worker), 4);
        assert_eq!(cluster.count(TaskType::Ps), 0);
        assert!(cluster.is_distributed());
    }

    #[test]
    fn totals_sum_master_and_workers() {
        let config = HorovodConfig {
            n_workers: 2,
            default_worker_resources: Some(Resources {
                gpu: Some(1),
                ..Resources::default()
            }),
            ..HorovodConfig::default()
        };
        let cluster = config.cluster_def(ClusterDef::single_master());

        let master = Resources {
            gpu: Some(1),
            ..Resources::default()
        };
        let total = config.total_resources(Some(&master), &cluster);
        assert_eq!(total.and_then(|t| t.gpu), Some(3));
    }
}
