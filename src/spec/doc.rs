//! Raw document shapes as handed over by the upstream validator.
//!
//! The upstream collaborator owns parsing and generic schema validation
//! (type coercion, required fields); this layer receives the resulting
//! structured document. Sections whose content the resolver never interprets
//! stay as raw [`serde_json::Value`]s — only their presence matters here.

use crate::error::{ConfigurationError, Result};
use crate::spec::{
    Environment, FrameworkConfig, HorovodConfig, MxnetConfig, Resources, Section, TensorflowConfig,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Structurally-validated document: one optional value per section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSpec {
    #[serde(default)]
    pub version: Option<Value>,

    #[serde(default)]
    pub project: Option<ProjectConfig>,

    #[serde(default)]
    pub settings: Option<Value>,

    #[serde(default)]
    pub environment: Option<RawEnvironment>,

    #[serde(default)]
    pub declarations: Option<Value>,

    #[serde(default, rename = "run")]
    pub run_exec: Option<Value>,

    #[serde(default)]
    pub model: Option<Value>,

    #[serde(default)]
    pub train: Option<Value>,

    #[serde(default)]
    pub eval: Option<Value>,

    #[serde(default)]
    pub matrix: Option<Value>,
}

/// PROJECT section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub name: Option<String>,
}

/// ENVIRONMENT as it appears on the wire: one optional key per framework.
///
/// [`RawEnvironment::validate`] collapses the keys into the tagged
/// [`FrameworkConfig`], rejecting documents that set more than one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEnvironment {
    #[serde(default)]
    pub resources: Option<Resources>,

    #[serde(default)]
    pub tensorflow: Option<TensorflowConfig>,

    #[serde(default)]
    pub horovod: Option<HorovodConfig>,

    #[serde(default)]
    pub mxnet: Option<MxnetConfig>,
}

impl RawSpec {
    /// Section-presence set for this document.
    pub fn headers(&self) -> BTreeSet<Section> {
        let present = [
            (self.version.is_some(), Section::Version),
            (self.project.is_some(), Section::Project),
            (self.settings.is_some(), Section::Settings),
            (self.environment.is_some(), Section::Environment),
            (self.declarations.is_some(), Section::Declarations),
            (self.run_exec.is_some(), Section::RunExec),
            (self.model.is_some(), Section::Model),
            (self.train.is_some(), Section::Train),
            (self.eval.is_some(), Section::Eval),
            (self.matrix.is_some(), Section::Matrix),
        ];

        present
            .into_iter()
            .filter_map(|(present, section)| present.then_some(section))
            .collect()
    }
}

impl RawEnvironment {
    /// Collapse the optional framework keys into the tagged config.
    pub fn validate(self) -> Result<Environment> {
        let mut configured: Vec<(&'static str, FrameworkConfig)> = Vec::new();

        if let Some(config) = self.tensorflow {
            configured.push(("tensorflow", FrameworkConfig::Tensorflow(config)));
        }
        if let Some(config) = self.horovod {
            configured.push(("horovod", FrameworkConfig::Horovod(config)));
        }
        if let Some(config) = self.mxnet {
            configured.push(("mxnet", FrameworkConfig::Mxnet(config)));
        }

        if configured.len() > 1 {
            return Err(ConfigurationError::AmbiguousFramework {
                first: configured[0].0,
                second: configured[1].0,
            });
        }

        Ok(Environment {
            resources: self.resources,
            framework: configured.pop().map(|(_, config)| config),
        })
    }
}
