//! Dockerfile parser.
//!
//! Turns Dockerfile text into an ordered list of [`Instruction`]s. Supports
//! line continuations (`\`), comments, exec and shell forms for
//! CMD/ENTRYPOINT, and both ENV forms. Multi-stage builds and variable
//! references are rejected outright.

use std::path::Path;

use kubefy_core::{Error, Result, UnsupportedFeature};

use crate::instruction::{Directive, ExposedPort, Instruction, InstructionKind, Protocol};
use crate::words::{find_variable_reference, split_words, unquote};

/// Instructions Docker understands that have no Kubernetes counterpart here.
const KNOWN_UNMAPPED: &[&str] = &[
    "RUN",
    "COPY",
    "ADD",
    "LABEL",
    "USER",
    "VOLUME",
    "ARG",
    "STOPSIGNAL",
    "HEALTHCHECK",
    "SHELL",
    "ONBUILD",
    "MAINTAINER",
];

/// Shell used to wrap shell-form CMD and ENTRYPOINT.
pub const SHELL_PREFIX: [&str; 2] = ["/bin/sh", "-c"];

/// A parsed single-stage Dockerfile.
///
/// Only [`Dockerfile::parse`] constructs this type, so it always holds
/// exactly one FROM instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dockerfile {
    instructions: Vec<Instruction>,
}

impl Dockerfile {
    /// Parse a Dockerfile from its text content.
    pub fn parse(content: &str) -> Result<Self> {
        let mut instructions = Vec::new();
        let mut seen_from = false;

        for line in join_logical_lines(content) {
            let instruction = parse_instruction(&line)?;

            if instruction.kind() == InstructionKind::From {
                if seen_from {
                    return Err(Error::Unsupported {
                        line: instruction.source_line,
                        feature: UnsupportedFeature::MultiStageBuild,
                    });
                }
                seen_from = true;
            }

            tracing::debug!(
                line = instruction.source_line,
                kind = %instruction.kind(),
                "parsed instruction"
            );
            instructions.push(instruction);
        }

        if !seen_from {
            return Err(Error::MissingFrom);
        }

        Ok(Self { instructions })
    }

    /// Parse a Dockerfile from a file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::DockerfileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

/// One instruction's text after continuation joining.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogicalLine {
    line: usize,
    text: String,
}

/// Join lines ending with `\` into single logical lines, dropping blank
/// lines and comments (also inside a continuation).
fn join_logical_lines(content: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut current: Option<LogicalLine> = None;

    for (idx, raw) in content.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (body, continues) = match raw.trim_end().strip_suffix('\\') {
            Some(body) => (body, true),
            None => (raw, false),
        };

        let logical = current.get_or_insert_with(|| LogicalLine {
            line: idx + 1,
            text: String::new(),
        });
        logical.text.push_str(body);

        if !continues {
            lines.extend(current.take());
        }
    }

    // Trailing continuation at end of input
    lines.extend(current);
    lines
}

fn parse_instruction(line: &LogicalLine) -> Result<Instruction> {
    let n = line.line;
    let (keyword, rest) = split_first_word(line.text.trim());

    if !keyword.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(Error::parse(n, format!("malformed instruction {keyword:?}")));
    }

    if find_variable_reference(rest).is_some() {
        return Err(Error::Unsupported {
            line: n,
            feature: UnsupportedFeature::VariableSubstitution,
        });
    }

    let directive = match InstructionKind::from_keyword(keyword) {
        InstructionKind::From => parse_from(rest, n)?,
        InstructionKind::Workdir => parse_workdir(rest, n)?,
        InstructionKind::Expose => parse_expose(rest, n)?,
        InstructionKind::Env => parse_env(rest, n)?,
        InstructionKind::Cmd => Directive::Cmd {
            argv: parse_command(rest, "CMD", n)?,
        },
        InstructionKind::Entrypoint => Directive::Entrypoint {
            argv: parse_command(rest, "ENTRYPOINT", n)?,
        },
        InstructionKind::Unmapped => {
            let keyword = keyword.to_ascii_uppercase();
            if !KNOWN_UNMAPPED.contains(&keyword.as_str()) {
                tracing::warn!(
                    line = n,
                    instruction = keyword.as_str(),
                    "Unknown Dockerfile instruction, ignoring"
                );
            }
            Directive::Unmapped { keyword }
        }
    };

    Ok(Instruction {
        directive,
        raw_arguments: rest.to_owned(),
        source_line: n,
    })
}

/// Split at the first run of whitespace; the remainder is trimmed.
fn split_first_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (s, ""),
    }
}

fn parse_from(rest: &str, line: usize) -> Result<Directive> {
    // Skip flags such as --platform=linux/amd64
    let mut words = rest.split_whitespace().skip_while(|w| w.starts_with("--"));

    let image = words
        .next()
        .ok_or_else(|| Error::parse(line, "FROM requires an image"))?;

    match (words.next(), words.next(), words.next()) {
        (None, _, _) => {}
        (Some(kw), Some(_stage), None) if kw.eq_ignore_ascii_case("AS") => {}
        _ => {
            return Err(Error::parse(
                line,
                "FROM expects `<image> [AS <name>]`",
            ));
        }
    }

    Ok(Directive::From {
        image: image.to_owned(),
    })
}

fn parse_workdir(rest: &str, line: usize) -> Result<Directive> {
    let path = unquote(rest).map_err(|e| Error::parse(line, e.to_string()))?;
    if path.is_empty() {
        return Err(Error::parse(line, "WORKDIR requires a path"));
    }
    Ok(Directive::Workdir { path })
}

fn parse_expose(rest: &str, line: usize) -> Result<Directive> {
    let mut ports = Vec::new();
    for token in rest.split_whitespace() {
        ports.extend(parse_port_spec(token, line)?);
    }
    if ports.is_empty() {
        return Err(Error::parse(line, "EXPOSE requires at least one port"));
    }
    Ok(Directive::Expose { ports })
}

/// Parses `port`, `port/proto`, or `start-end[/proto]`.
fn parse_port_spec(token: &str, line: usize) -> Result<Vec<ExposedPort>> {
    let (ports, protocol) = match token.split_once('/') {
        Some((ports, proto)) => {
            let protocol = Protocol::parse(proto).ok_or_else(|| {
                Error::parse(line, format!("unsupported protocol {proto:?} in {token:?}"))
            })?;
            (ports, protocol)
        }
        None => (token, Protocol::Tcp),
    };

    let (start, end) = match ports.split_once('-') {
        Some((start, end)) => (parse_port(start, line)?, parse_port(end, line)?),
        None => {
            let port = parse_port(ports, line)?;
            (port, port)
        }
    };

    if start > end {
        return Err(Error::parse(
            line,
            format!("invalid port range {token:?}: start is greater than end"),
        ));
    }

    Ok((start..=end)
        .map(|port| ExposedPort { port, protocol })
        .collect())
}

fn parse_port(s: &str, line: usize) -> Result<u16> {
    match s.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(Error::parse(line, format!("invalid port {s:?}"))),
    }
}

fn parse_env(rest: &str, line: usize) -> Result<Directive> {
    let (first, remainder) = split_first_word(rest);
    if first.is_empty() {
        return Err(Error::parse(line, "ENV requires at least one variable"));
    }

    let mut vars = Vec::new();
    if first.contains('=') {
        // ENV KEY1=VAL1 KEY2="VAL 2"
        for word in split_words(rest).map_err(|e| Error::parse(line, e.to_string()))? {
            let (key, value) = word.split_once('=').ok_or_else(|| {
                Error::parse(line, format!("ENV expects KEY=VALUE pairs, found {word:?}"))
            })?;
            vars.push((env_key(key, line)?, value.to_owned()));
        }
    } else {
        // ENV KEY value with spaces
        if remainder.is_empty() {
            return Err(Error::parse(line, format!("ENV {first} is missing a value")));
        }
        let key = unquote(first).map_err(|e| Error::parse(line, e.to_string()))?;
        let value = unquote(remainder).map_err(|e| Error::parse(line, e.to_string()))?;
        vars.push((env_key(&key, line)?, value));
    }

    Ok(Directive::Env { vars })
}

fn env_key(key: &str, line: usize) -> Result<String> {
    if key.is_empty() || key.chars().any(char::is_whitespace) {
        return Err(Error::parse(line, format!("invalid ENV name {key:?}")));
    }
    Ok(key.to_owned())
}

/// Exec form decodes a JSON array; shell form is wrapped in `/bin/sh -c`.
fn parse_command(rest: &str, keyword: &str, line: usize) -> Result<Vec<String>> {
    if rest.is_empty() {
        return Err(Error::parse(line, format!("{keyword} requires arguments")));
    }

    if rest.starts_with('[') {
        return serde_json::from_str::<Vec<String>>(rest).map_err(|e| {
            Error::parse(
                line,
                format!("{keyword} exec form must be a JSON array of strings: {e}"),
            )
        });
    }

    Ok(SHELL_PREFIX
        .iter()
        .map(|s| (*s).to_owned())
        .chain(std::iter::once(rest.to_owned()))
        .collect())
}
