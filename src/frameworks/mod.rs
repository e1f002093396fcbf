//! Framework resolvers: per-engine replica counts and resource aggregation.
//!
//! Each supported engine implements [`FrameworkResolver`] on its own config
//! type; dispatch is a match on the [`FrameworkConfig`] variant, never a
//! probe of optional fields.

mod horovod;
mod mxnet;
mod tensorflow;

use crate::cluster::ClusterDef;
use crate::spec::resources::accumulate;
use crate::spec::{FrameworkConfig, Resources};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Supported distributed-execution engines.
///
/// Derived from the active config variant, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Tensorflow,
    Horovod,
    Mxnet,
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framework::Tensorflow => f.write_str("tensorflow"),
            Framework::Horovod => f.write_str("horovod"),
            Framework::Mxnet => f.write_str("mxnet"),
        }
    }
}

/// Per-framework resolution rules.
///
/// Implementations never mutate their inputs; the returned cluster always
/// keeps the seeded master, and the distributed flag is set iff a non-master
/// role with replicas was added.
pub trait FrameworkResolver {
    /// Augment the seed cluster with this framework's replica counts.
    fn cluster_def(&self, seed: ClusterDef) -> ClusterDef;

    /// Aggregate resources across every task of the cluster. A
    /// non-distributed cluster aggregates to the master's resources alone.
    fn total_resources(
        &self,
        master: Option<&Resources>,
        cluster: &ClusterDef,
    ) -> Option<Resources>;
}

impl FrameworkConfig {
    /// Engine this configuration belongs to.
    pub fn framework(&self) -> Framework {
        match self {
            FrameworkConfig::Tensorflow(_) => Framework::Tensorflow,
            FrameworkConfig::Horovod(_) => Framework::Horovod,
            FrameworkConfig::Mxnet(_) => Framework::Mxnet,
        }
    }

    /// Resolver governing this configuration.
    pub fn resolver(&self) -> &dyn FrameworkResolver {
        match self {
            FrameworkConfig::Tensorflow(config) => config,
            FrameworkConfig::Horovod(config) => config,
            FrameworkConfig::Mxnet(config) => config,
        }
    }
}

/// Sum per-replica resources for one role: the per-index override when
/// declared, otherwise the role default.
fn role_resources(
    total: Option<Resources>,
    replicas: u32,
    overrides: &BTreeMap<u32, Resources>,
    default: Option<&Resources>,
) -> Option<Resources> {
    let mut total = total;
    for index in 0..replicas {
        total = accumulate(total, overrides.get(&index).or(default));
    }
    total
}
