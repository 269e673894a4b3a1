//! Folds parsed instructions into a single container description.
//!
//! FROM, WORKDIR, CMD and ENTRYPOINT are last-writer-wins; EXPOSE and ENV
//! accumulate. CMD only ever sets `args` and ENTRYPOINT only ever sets
//! `command`.

use std::collections::BTreeSet;

use crate::instruction::{Directive, ExposedPort, Instruction};
use crate::parser::Dockerfile;

/// Container environment in first-definition order with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: Vec<(String, String)>,
}

impl Environment {
    /// Insert or overwrite `key`. An overwritten key keeps its position.
    pub fn upsert(&mut self, key: String, value: String) {
        match self.vars.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.vars.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Everything a Dockerfile says about the runtime container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerDescription {
    pub image: String,
    pub working_dir: Option<String>,
    /// Deduplicated by (port, protocol), ordered by port number.
    pub ports: BTreeSet<ExposedPort>,
    pub env: Environment,
    /// From ENTRYPOINT.
    pub command: Option<Vec<String>>,
    /// From CMD.
    pub args: Option<Vec<String>>,
}

impl ContainerDescription {
    pub fn from_dockerfile(dockerfile: &Dockerfile) -> Self {
        normalize(dockerfile.instructions())
    }

    /// Applies one instruction.
    fn apply(mut self, instruction: &Instruction) -> Self {
        match &instruction.directive {
            Directive::From { image } => self.image = image.clone(),
            Directive::Workdir { path } => {
                self.working_dir = Some(resolve_workdir(self.working_dir.as_deref(), path));
            }
            Directive::Expose { ports } => self.ports.extend(ports.iter().copied()),
            Directive::Env { vars } => {
                for (key, value) in vars {
                    self.env.upsert(key.clone(), value.clone());
                }
            }
            Directive::Cmd { argv } => self.args = non_empty(argv),
            Directive::Entrypoint { argv } => self.command = non_empty(argv),
            Directive::Unmapped { keyword } => {
                tracing::debug!(
                    line = instruction.source_line,
                    instruction = keyword.as_str(),
                    "no Kubernetes mapping, skipping"
                );
            }
        }
        self
    }
}

/// Folds instructions in source order into one [`ContainerDescription`].
pub fn normalize(instructions: &[Instruction]) -> ContainerDescription {
    instructions
        .iter()
        .fold(ContainerDescription::default(), ContainerDescription::apply)
}

/// `CMD []` / `ENTRYPOINT []` clear the field.
fn non_empty(argv: &[String]) -> Option<Vec<String>> {
    if argv.is_empty() {
        None
    } else {
        Some(argv.to_vec())
    }
}

/// Relative WORKDIR paths build on the previous WORKDIR, or `/`.
fn resolve_workdir(previous: Option<&str>, path: &str) -> String {
    if path.starts_with('/') {
        return path.to_owned();
    }
    let base = previous.unwrap_or("/").trim_end_matches('/');
    format!("{base}/{path}")
}
