use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Broad class of a failure, used to pick the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    UnsupportedFeature,
    Validation,
    Io,
}

impl ErrorCategory {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Parse | Self::UnsupportedFeature => 1,
            Self::Validation => 2,
            Self::Io => 3,
        }
    }
}

/// Dockerfile features kubefy deliberately rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedFeature {
    MultiStageBuild,
    VariableSubstitution,
}

impl std::fmt::Display for UnsupportedFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MultiStageBuild => f.write_str("multi-stage builds"),
            Self::VariableSubstitution => f.write_str("variable substitution"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── Dockerfile parsing ──
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Dockerfile has no FROM instruction")]
    MissingFrom,

    #[error("line {line}: {feature} are not supported")]
    Unsupported {
        line: usize,
        feature: UnsupportedFeature,
    },

    // ── Run configuration ──
    #[error("--name is required (or set [deployment].name in kubefy.toml)")]
    MissingName,

    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("invalid namespace {namespace:?}: {reason}")]
    InvalidNamespace {
        namespace: String,
        reason: &'static str,
    },

    #[error("invalid replica count {0}: must be between 1 and 2147483647")]
    InvalidReplicas(u32),

    #[error("invalid service type {0:?}: expected ClusterIP, NodePort, or LoadBalancer")]
    InvalidServiceType(String),

    #[error("invalid output directory {path}: {reason}")]
    InvalidOutputDir { path: PathBuf, reason: &'static str },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── Filesystem ──
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read Dockerfile at {path}")]
    DockerfileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// Shorthand for a parse error at `line`.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse { .. } | Self::MissingFrom => ErrorCategory::Parse,
            Self::Unsupported { .. } => ErrorCategory::UnsupportedFeature,
            Self::MissingName
            | Self::InvalidName { .. }
            | Self::InvalidNamespace { .. }
            | Self::InvalidReplicas(_)
            | Self::InvalidServiceType(_)
            | Self::InvalidOutputDir { .. }
            | Self::ConfigParse { .. } => ErrorCategory::Validation,
            Self::ConfigLoad { .. } | Self::DockerfileRead { .. } => ErrorCategory::Io,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }
}
