use std::fmt;

/// Transport protocol of an exposed port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
    Sctp,
}

impl Protocol {
    /// Parses the Dockerfile spelling (`tcp`, `udp`, `sctp`), case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tcp" => Some(Self::Tcp),
            "udp" => Some(Self::Udp),
            "sctp" => Some(Self::Sctp),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
            Self::Sctp => "sctp",
        }
    }

    /// Spelling used by the Kubernetes API (`TCP`, `UDP`, `SCTP`).
    pub fn kubernetes_name(self) -> &'static str {
        match self {
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
            Self::Sctp => "SCTP",
        }
    }
}

/// One `port/protocol` pair from an EXPOSE instruction.
///
/// Ordering is by port number first, then protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExposedPort {
    pub port: u16,
    pub protocol: Protocol,
}

impl ExposedPort {
    pub fn tcp(port: u16) -> Self {
        Self {
            port,
            protocol: Protocol::Tcp,
        }
    }
}

impl fmt::Display for ExposedPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port, self.protocol.as_str())
    }
}

/// Instruction keywords kubefy recognizes. Everything else is `Unmapped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    From,
    Workdir,
    Expose,
    Env,
    Cmd,
    Entrypoint,
    Unmapped,
}

impl InstructionKind {
    /// Case-insensitive keyword lookup.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_uppercase().as_str() {
            "FROM" => Self::From,
            "WORKDIR" => Self::Workdir,
            "EXPOSE" => Self::Expose,
            "ENV" => Self::Env,
            "CMD" => Self::Cmd,
            "ENTRYPOINT" => Self::Entrypoint,
            _ => Self::Unmapped,
        }
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::From => "FROM",
            Self::Workdir => "WORKDIR",
            Self::Expose => "EXPOSE",
            Self::Env => "ENV",
            Self::Cmd => "CMD",
            Self::Entrypoint => "ENTRYPOINT",
            Self::Unmapped => "unmapped",
        };
        f.write_str(name)
    }
}

/// Decoded arguments of a single instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `FROM [--platform=..] <image> [AS <name>]`
    From { image: String },
    /// `WORKDIR <path>`
    Workdir { path: String },
    /// `EXPOSE <port>[/<proto>] ...`
    Expose { ports: Vec<ExposedPort> },
    /// `ENV <key>=<value> ...` or `ENV <key> <value>`
    Env { vars: Vec<(String, String)> },
    /// `CMD ["exec", "form"]` or `CMD command` (wrapped in `/bin/sh -c`)
    Cmd { argv: Vec<String> },
    /// `ENTRYPOINT ["exec", "form"]` or `ENTRYPOINT command`
    Entrypoint { argv: Vec<String> },
    /// Any other instruction, kept for fidelity only.
    Unmapped { keyword: String },
}

/// A parsed Dockerfile instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub directive: Directive,
    /// Argument text after the keyword, with continuations joined.
    pub raw_arguments: String,
    /// 1-based line where the instruction starts.
    pub source_line: usize,
}

impl Instruction {
    pub fn kind(&self) -> InstructionKind {
        match self.directive {
            Directive::From { .. } => InstructionKind::From,
            Directive::Workdir { .. } => InstructionKind::Workdir,
            Directive::Expose { .. } => InstructionKind::Expose,
            Directive::Env { .. } => InstructionKind::Env,
            Directive::Cmd { .. } => InstructionKind::Cmd,
            Directive::Entrypoint { .. } => InstructionKind::Entrypoint,
            Directive::Unmapped { .. } => InstructionKind::Unmapped,
        }
    }
}
