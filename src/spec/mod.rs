//! Spec layer: section registry, raw document shapes, validated entity.
//!
//! This module is intentionally separate from cluster resolution and
//! topology synthesis. It owns:
//! - the section registry (which top-level sections exist and are legal)
//! - the raw, collaborator-facing document shapes
//! - the validated [`Specification`] and its derived accessors

pub mod doc;
pub mod environment;
pub mod resources;
pub mod section;
pub mod specification;

pub use doc::{ProjectConfig, RawEnvironment, RawSpec};
pub use environment::{Environment, FrameworkConfig, HorovodConfig, MxnetConfig, TensorflowConfig};
pub use resources::Resources;
pub use section::Section;
pub use specification::Specification;
