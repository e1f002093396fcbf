//! Section registry: the fixed set of recognized top-level sections.
//!
//! A document is a mapping from section key to section value; which sections
//! are present decides whether a specification is runnable and whether it is
//! a legal single-run specification at all.

use std::fmt;

/// A named top-level section of an experiment specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    /// Schema version of the document.
    Version,
    /// Project the experiment belongs to.
    Project,
    /// Logging / run-type settings.
    Settings,
    /// Run environment: framework config + master resources.
    Environment,
    /// Reusable variables and modules.
    Declarations,
    /// Direct execution step (user-supplied image/command).
    RunExec,
    /// Declarative model description.
    Model,
    /// Training step.
    Train,
    /// Evaluation step.
    Eval,
    /// Parameter-search matrix; legal only for the sweep variant.
    Matrix,
}

impl Section {
    /// Every section the document schema recognizes.
    pub const ALL: [Section; 10] = [
        Section::Version,
        Section::Project,
        Section::Settings,
        Section::Environment,
        Section::Declarations,
        Section::RunExec,
        Section::Model,
        Section::Train,
        Section::Eval,
        Section::Matrix,
    ];

    /// Whether this section may appear in a single-run specification.
    ///
    /// `Matrix` is reserved for the parameter-search variant, which is a
    /// distinct entity.
    pub fn allowed_in_single_run(self) -> bool {
        self != Section::Matrix
    }

    /// The section's key in the document.
    pub fn key(self) -> &'static str {
        match self {
            Section::Version => "version",
            Section::Project => "project",
            Section::Settings => "settings",
            Section::Environment => "environment",
            Section::Declarations => "declarations",
            Section::RunExec => "run",
            Section::Model => "model",
            Section::Train => "train",
            Section::Eval => "eval",
            Section::Matrix => "matrix",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
