use serde::Serialize;

use crate::error::ManifestError;
use crate::resource::Manifests;

pub const DEPLOYMENT_FILE: &str = "deployment.yaml";
pub const SERVICE_FILE: &str = "service.yaml";

/// Separator placed between documents in a multi-document stream.
pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// One manifest rendered to text, with the file name it is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedManifest {
    pub file_name: &'static str,
    pub content: String,
}

/// Plain scalars that YAML 1.1 readers such as `kubectl` resolve to booleans.
const YAML11_BOOLEANS: &[&str] = &[
    "y", "Y", "yes", "Yes", "YES", "n", "N", "no", "No", "NO", "on", "On", "ON", "off", "Off",
    "OFF",
];

/// Renders a resource tree to YAML with two-space indentation. Keys follow
/// the struct's field order.
pub fn to_yaml<T: Serialize>(kind: &'static str, resource: &T) -> Result<String, ManifestError> {
    let yaml =
        serde_yaml::to_string(resource).map_err(|e| ManifestError::Render { kind, source: e })?;
    let mut yaml = quote_yaml11_scalars(&yaml);
    if !yaml.ends_with('\n') {
        yaml.push('\n');
    }
    Ok(yaml)
}

/// Single-quotes plain scalar values that a YAML 1.1 reader would not read
/// back as strings.
///
/// serde_yaml only quotes what YAML 1.2 would misread, so `yes` or `1_000`
/// come out bare. Lines inside block scalars are left alone.
fn quote_yaml11_scalars(yaml: &str) -> String {
    let mut out = String::with_capacity(yaml.len());
    let mut block_indent: Option<usize> = None;

    for line in yaml.lines() {
        let indent = line.len() - line.trim_start().len();
        if let Some(header) = block_indent {
            if indent > header || line.trim().is_empty() {
                out.push_str(line);
                out.push('\n');
                continue;
            }
            block_indent = None;
        }

        let (prefix, scalar) = split_scalar(line);
        if is_yaml11_ambiguous(scalar) {
            out.push_str(prefix);
            out.push('\'');
            out.push_str(scalar);
            out.push('\'');
        } else {
            out.push_str(line);
        }
        out.push('\n');

        if scalar.starts_with('|') || scalar.starts_with('>') {
            block_indent = Some(indent);
        }
    }
    out
}

/// Splits a line into everything up to its value and the value itself:
/// `  - name: yes` becomes `("  - name: ", "yes")`. Lines that are not a
/// sequence item or a mapping entry have no value.
fn split_scalar(line: &str) -> (&str, &str) {
    let indent = line.len() - line.trim_start().len();
    let mut start = indent;
    while line[start..].starts_with("- ") {
        start += 2;
    }
    if let Some(colon) = line[start..].find(": ") {
        start += colon + 2;
    }
    if start == indent {
        return (line, "");
    }
    line.split_at(start)
}

fn is_yaml11_ambiguous(scalar: &str) -> bool {
    YAML11_BOOLEANS.contains(&scalar) || is_underscored_number(scalar)
}

/// YAML 1.1 ignores `_` in numbers, so `1_000` reads as an integer.
fn is_underscored_number(scalar: &str) -> bool {
    if !scalar.contains('_') {
        return false;
    }
    let digits: String = scalar.chars().filter(|&c| c != '_').collect();
    let digits = digits.strip_prefix(['-', '+']).unwrap_or(&digits);
    let mut dots = 0;
    let mut any_digit = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => any_digit = true,
            '.' => dots += 1,
            _ => return false,
        }
    }
    any_digit && dots <= 1
}

impl Manifests {
    /// Deployment first, then the Service if there is one.
    pub fn render(&self) -> Result<Vec<RenderedManifest>, ManifestError> {
        let mut rendered = vec![RenderedManifest {
            file_name: DEPLOYMENT_FILE,
            content: to_yaml("Deployment", &self.deployment)?,
        }];
        if let Some(service) = &self.service {
            rendered.push(RenderedManifest {
                file_name: SERVICE_FILE,
                content: to_yaml("Service", service)?,
            });
        }
        Ok(rendered)
    }

    /// All manifests as one YAML stream, for dry runs.
    pub fn to_documents(&self) -> Result<String, ManifestError> {
        let documents: Vec<String> = self
            .render()?
            .into_iter()
            .map(|manifest| manifest.content)
            .collect();
        Ok(documents.join(DOCUMENT_SEPARATOR))
    }
}
