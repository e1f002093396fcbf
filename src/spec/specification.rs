//! The central entity: a validated single-run experiment specification.

use crate::cluster::ClusterDef;
use crate::error::{ConfigurationError, Result};
use crate::frameworks::Framework;
use crate::spec::{Environment, ProjectConfig, RawSpec, Resources, Section};
use crate::topology::{self, LocalPorts, TopologyDescriptor};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tracing::debug;

/// Resolved, validated representation of one experiment's declarative
/// description.
///
/// Immutable once constructed. Every derivation is a pure function of the
/// construction-time snapshot, so the memoized slots are populated at most
/// once and never invalidated.
#[derive(Debug)]
pub struct Specification {
    experiment: String,
    headers: BTreeSet<Section>,
    project: Option<ProjectConfig>,
    environment: Option<Environment>,
    run_exec: Option<Value>,
    model: Option<Value>,
    train: Option<Value>,
    eval: Option<Value>,
    declarations: Option<Value>,

    cluster: OnceLock<ClusterDef>,
    total_resources: OnceLock<Option<Resources>>,
}

impl Specification {
    /// Validate a document into a specification.
    ///
    /// Fails when the section set is illegal for a single run (a `matrix`
    /// section belongs to the sweep variant) or when the environment
    /// declares more than one framework.
    pub fn read(values: RawSpec, experiment: impl Into<String>) -> Result<Self> {
        let headers = values.headers();
        if let Some(&section) = headers.iter().find(|s| !s.allowed_in_single_run()) {
            return Err(ConfigurationError::SectionNotAllowed { section });
        }

        let environment = values.environment.map(|env| env.validate()).transpose()?;

        Ok(Specification {
            experiment: experiment.into(),
            headers,
            project: values.project,
            environment,
            run_exec: values.run_exec,
            model: values.model,
            train: values.train,
            eval: values.eval,
            declarations: values.declarations,
            cluster: OnceLock::new(),
            total_resources: OnceLock::new(),
        })
    }

    /// Identifier of the experiment this specification describes.
    pub fn experiment(&self) -> &str {
        &self.experiment
    }

    /// Section-presence set of the underlying document.
    pub fn headers(&self) -> &BTreeSet<Section> {
        &self.headers
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref()?.name.as_deref()
    }

    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }

    pub fn run_exec(&self) -> Option<&Value> {
        self.run_exec.as_ref()
    }

    pub fn model(&self) -> Option<&Value> {
        self.model.as_ref()
    }

    pub fn train(&self) -> Option<&Value> {
        self.train.as_ref()
    }

    pub fn eval(&self) -> Option<&Value> {
        self.eval.as_ref()
    }

    pub fn declarations(&self) -> Option<&Value> {
        self.declarations.as_ref()
    }

    /// Whether the sections required to run the experiment exist: a direct
    /// execution step, or a model together with a train or eval step.
    pub fn is_runnable(&self) -> bool {
        self.headers.contains(&Section::RunExec)
            || (self.headers.contains(&Section::Model) && self.headers.contains(&Section::Train))
            || (self.headers.contains(&Section::Model) && self.headers.contains(&Section::Eval))
    }

    /// Engine governing the run, if the environment configures one.
    pub fn framework(&self) -> Option<Framework> {
        self.environment
            .as_ref()?
            .framework
            .as_ref()
            .map(|config| config.framework())
    }

    /// Resources requested for the master task.
    pub fn master_resources(&self) -> Option<&Resources> {
        self.environment.as_ref()?.resources.as_ref()
    }

    /// Role → replica count for the run.
    ///
    /// Without an environment (or without a framework config) this is the
    /// single-master fallback; otherwise the framework's resolver augments
    /// the master seed with its worker/ps counts.
    pub fn cluster_def(&self) -> &ClusterDef {
        self.cluster.get_or_init(|| {
            let seed = ClusterDef::single_master();
            match self.environment.as_ref().and_then(|env| env.framework.as_ref()) {
                Some(config) => {
                    debug!(framework = %config.framework(), "resolving cluster definition");
                    config.resolver().cluster_def(seed)
                }
                None => seed,
            }
        })
    }

    /// Aggregate resources across every task of the run.
    ///
    /// None without an environment. Without a framework the run is a single
    /// task, so the total is exactly the master's resources.
    pub fn total_resources(&self) -> Option<&Resources> {
        self.total_resources
            .get_or_init(|| {
                let environment = self.environment.as_ref()?;
                let cluster = self.cluster_def();

                match environment.framework.as_ref() {
                    Some(config) => config
                        .resolver()
                        .total_resources(environment.resources.as_ref(), cluster),
                    None => environment.resources.clone(),
                }
            })
            .as_ref()
    }

    /// Concrete host:port addresses per role for a local run.
    pub fn local_topology(&self, ports: &LocalPorts) -> TopologyDescriptor {
        topology::local_topology(self.cluster_def(), ports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::TaskType;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn read(doc: serde_json::Value) -> Specification {
        let raw: RawSpec = serde_json::from_value(doc).expect("document should deserialize");
        Specification::read(raw, "tests").expect("document should validate")
    }

    #[test]
    fn matrix_section_fails_construction() {
        let raw: RawSpec = serde_json::from_value(json!({
            "run": {"image": "busybox", "cmd": "true"},
            "matrix": {"lr": {"values": [0.1, 0.01]}},
        }))
        .unwrap();

        let err = Specification::read(raw, "tests").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::SectionNotAllowed {
                section: Section::Matrix
            }
        );
    }

    #[test]
    fn runnable_iff_run_exec_or_model_with_train_or_eval() {
        let runnable = [
            json!({"run": {"image": "busybox"}}),
            json!({"model": {}, "train": {}}),
            json!({"model": {}, "eval": {}}),
            json!({"model": {}, "train": {}, "eval": {}}),
        ];
        for doc in runnable {
            assert!(read(doc.clone()).is_runnable(), "expected runnable: {doc}");
        }

        let not_runnable = [
            json!({}),
            json!({"version": 1, "project": {"name": "p"}}),
            json!({"model": {}}),
            json!({"train": {}}),
            json!({"eval": {}}),
            json!({"train": {}, "eval": {}}),
        ];
        for doc in not_runnable {
            assert!(!read(doc.clone()).is_runnable(), "expected not runnable: {doc}");
        }
    }

    #[test]
    fn no_environment_resolves_to_the_single_master_fallback() {
        let spec = read(json!({"run": {"image": "busybox"}}));

        assert_eq!(spec.framework(), None);
        assert_eq!(spec.master_resources(), None);
        assert_eq!(spec.total_resources(), None);

        let cluster = spec.cluster_def();
        assert_eq!(cluster.count(TaskType::Master), 1);
        assert!(!cluster.is_distributed());
    }

    #[test]
    fn environment_without_framework_totals_to_master_resources() {
        let spec = read(json!({
            "run": {"image": "busybox"},
            "environment": {"resources": {"cpu": 2.0, "gpu": 1}},
        }));

        assert_eq!(spec.framework(), None);
        assert!(!spec.cluster_def().is_distributed());
        assert_eq!(spec.total_resources(), spec.master_resources());
        assert_eq!(spec.total_resources().and_then(|r| r.gpu), Some(1));
    }

    #[test]
    fn framework_is_derived_from_the_environment() {
        let spec = read(json!({
            "model": {},
            "train": {},
            "environment": {"mxnet": {"n_workers": 1, "n_ps": 1}},
        }));

        assert_eq!(spec.framework(), Some(Framework::Mxnet));
        assert!(spec.cluster_def().is_distributed());
    }

    #[test]
    fn derived_accessors_are_memoized() {
        let spec = read(json!({
            "model": {},
            "train": {},
            "environment": {
                "resources": {"cpu": 1.0},
                "tensorflow": {"n_workers": 2, "default_worker_resources": {"cpu": 1.0}},
            },
        }));

        assert!(std::ptr::eq(spec.cluster_def(), spec.cluster_def()));

        let first = spec.total_resources().expect("total should exist");
        let second = spec.total_resources().expect("total should exist");
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.cpu, Some(3.0));
    }

    #[test]
    fn section_accessors_expose_the_document_values() {
        let spec = read(json!({
            "project": {"name": "mnist"},
            "declarations": {"batch_size": 64},
            "run": {"image": "busybox", "cmd": "python run.py"},
        }));

        assert_eq!(spec.experiment(), "tests");
        assert_eq!(spec.project_name(), Some("mnist"));
        assert_eq!(spec.declarations().and_then(|d| d["batch_size"].as_u64()), Some(64));
        assert!(spec.run_exec().is_some());
        assert!(spec.model().is_none());
        assert_eq!(
            spec.headers().iter().copied().collect::<Vec<_>>(),
            vec![Section::Project, Section::Declarations, Section::RunExec]
        );
    }
}
