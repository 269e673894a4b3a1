//! Run-configuration checks shared by the synthesizer and the CLI.
//!
//! All checks are pure except [`validate_output_dir`], which only inspects
//! metadata and never creates anything.

use std::path::Path;

use crate::{Error, Result};

/// Kubernetes int32 upper bound for `spec.replicas`.
pub const MAX_REPLICAS: u32 = i32::MAX as u32;

/// Maximum length of a DNS-1123 label.
pub const MAX_LABEL_LEN: usize = 63;

/// Checks `value` against the DNS-1123 label rules and returns the first
/// rule it breaks.
pub fn dns_label_violation(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("must not be empty");
    }
    if value.len() > MAX_LABEL_LEN {
        return Some("must be at most 63 characters");
    }
    if !value
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return Some("must consist of lowercase alphanumerics and '-'");
    }
    if value.starts_with('-') || value.ends_with('-') {
        return Some("must start and end with an alphanumeric character");
    }
    None
}

pub fn is_dns_label(value: &str) -> bool {
    dns_label_violation(value).is_none()
}

pub fn validate_name(name: &str) -> Result<()> {
    match dns_label_violation(name) {
        Some(reason) => Err(Error::InvalidName {
            name: name.to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}

pub fn validate_namespace(namespace: &str) -> Result<()> {
    match dns_label_violation(namespace) {
        Some(reason) => Err(Error::InvalidNamespace {
            namespace: namespace.to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}

pub fn validate_replicas(replicas: u32) -> Result<()> {
    if (1..=MAX_REPLICAS).contains(&replicas) {
        Ok(())
    } else {
        Err(Error::InvalidReplicas(replicas))
    }
}

/// An output directory is acceptable if it does not exist yet (it will be
/// created at write time) or is an existing directory. Writability is only
/// required when `will_write` is set; dry runs never touch the directory.
pub fn validate_output_dir(path: &Path, will_write: bool) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidOutputDir {
            path: path.to_path_buf(),
            reason: "path is empty",
        });
    }
    match std::fs::metadata(path) {
        Ok(meta) if !meta.is_dir() => Err(Error::InvalidOutputDir {
            path: path.to_path_buf(),
            reason: "not a directory",
        }),
        Ok(meta) if will_write && meta.permissions().readonly() => Err(Error::InvalidOutputDir {
            path: path.to_path_buf(),
            reason: "directory is not writable",
        }),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(_) => Err(Error::InvalidOutputDir {
            path: path.to_path_buf(),
            reason: "cannot be inspected",
        }),
    }
}
