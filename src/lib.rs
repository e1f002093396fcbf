//! Experiment specification resolver.
//!
//! Turns an already-validated, declarative experiment document into the
//! concrete shape of a training run: which task roles exist, how many
//! replicas of each, what compute the whole run needs, and — for local runs
//! — which host:port every replica binds.
//!
//! Parsing raw text and rendering infrastructure manifests are collaborator
//! concerns: this crate consumes a structured document and produces
//! descriptors for those collaborators to act on.

pub mod cluster;
pub mod error;
pub mod frameworks;
pub mod spec;
pub mod topology;

pub use cluster::{ClusterDef, TaskType};
pub use error::{ConfigurationError, Result};
pub use frameworks::{Framework, FrameworkResolver};
pub use spec::{Environment, FrameworkConfig, RawSpec, Resources, Section, Specification};
pub use topology::{LocalPorts, TopologyDescriptor, local_topology};
