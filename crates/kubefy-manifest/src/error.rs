use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to render {kind} manifest")]
    Render {
        kind: &'static str,
        source: serde_yaml::Error,
    },
    #[error("failed to create output directory {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to stage {path}")]
    Stage {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Filesystem failures exit with 3; rendering failures are internal (1).
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Render { .. } => 1,
            Self::CreateDir { .. } | Self::Stage { .. } | Self::Write { .. } => 3,
        }
    }
}
