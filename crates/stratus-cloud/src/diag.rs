//! Diagnostics for the embedding layer
//!
//! The plugin/schema layer that drives the reconciler reports failures
//! as (title, detail) pairs. [`Diagnostic`] is that rendering: a short
//! stable title per error class, with the underlying message as
//! detail.

use crate::error::CloudError;
use crate::model::{Instance, ResourceKind};
use serde::{Deserialize, Serialize};

/// A user-visible failure report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub title: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }
}

impl CloudError {
    /// Render this error as a diagnostic.
    pub fn diagnostic(&self) -> Diagnostic {
        let title = match self {
            CloudError::Lookup { kind, .. } | CloudError::NotFound { kind, .. } => match kind {
                ResourceKind::Zone => "zone not found",
                ResourceKind::Template => "template not found",
                ResourceKind::ServiceOffering => "service offering not found",
                ResourceKind::Instance => "instance not found",
            },
            CloudError::Provision(_) => "failed to create instance",
            CloudError::Transport(_) => "failed to read instance",
            CloudError::Update(_) => "failed to update instance",
            CloudError::Precondition(_) => "invalid request",
            CloudError::NotImplemented(_) => "not implemented",
        };

        Diagnostic::new(title, self.to_string())
    }
}

/// Result of one reconciliation call as the embedding layer sees it:
/// the observed state (when the call produced one) plus diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub observed: Option<Instance>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl From<crate::error::Result<Instance>> for Outcome {
    fn from(result: crate::error::Result<Instance>) -> Self {
        match result {
            Ok(observed) => Self {
                observed: Some(observed),
                diagnostics: Vec::new(),
            },
            Err(e) => Self {
                observed: None,
                diagnostics: vec![e.diagnostic()],
            },
        }
    }
}

impl From<crate::error::Result<()>> for Outcome {
    fn from(result: crate::error::Result<()>) -> Self {
        match result {
            Ok(()) => Self::default(),
            Err(e) => Self {
                observed: None,
                diagnostics: vec![e.diagnostic()],
            },
        }
    }
}
