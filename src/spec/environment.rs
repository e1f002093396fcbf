//! Run environment: framework configuration + master resources.

use crate::spec::Resources;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Validated ENVIRONMENT section.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Resources requested for the master task.
    pub resources: Option<Resources>,
    /// Framework governing the run, if any.
    pub framework: Option<FrameworkConfig>,
}

/// The active framework configuration.
///
/// At most one framework may govern a run; the variant encoding makes a
/// document carrying several configs unrepresentable past validation.
#[derive(Debug, Clone)]
pub enum FrameworkConfig {
    Tensorflow(TensorflowConfig),
    Horovod(HorovodConfig),
    Mxnet(MxnetConfig),
}

/// Parameter-server TensorFlow configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TensorflowConfig {
    #[serde(default)]
    pub n_workers: u32,

    #[serde(default)]
    pub n_ps: u32,

    /// Resources applied to workers without a per-index override.
    #[serde(default)]
    pub default_worker_resources: Option<Resources>,

    /// Resources applied to parameter servers without a per-index override.
    #[serde(default)]
    pub default_ps_resources: Option<Resources>,

    /// Per-replica overrides keyed by task index.
    #[serde(default)]
    pub worker_resources: BTreeMap<u32, Resources>,

    #[serde(default)]
    pub ps_resources: BTreeMap<u32, Resources>,
}

/// Horovod configuration. Allreduce-based: workers only, no parameter
/// servers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HorovodConfig {
    #[serde(default)]
    pub n_workers: u32,

    #[serde(default)]
    pub default_worker_resources: Option<Resources>,

    /// Per-replica overrides keyed by task index.
    #[serde(default)]
    pub worker_resources: BTreeMap<u32, Resources>,
}

/// MXNet configuration. Parameter-server architecture, same shape as
/// TensorFlow's.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MxnetConfig {
    #[serde(default)]
    pub n_workers: u32,

    #[serde(default)]
    pub n_ps: u32,

    #[serde(default)]
    pub default_worker_resources: Option<Resources>,

    #[serde(default)]
    pub default_ps_resources: Option<Resources>,

    /// Per-replica overrides keyed by task index.
    #[serde(default)]
    pub worker_resources: BTreeMap<u32, Resources>,

    #[serde(default)]
    pub ps_resources: BTreeMap<u32, Resources>,
}
