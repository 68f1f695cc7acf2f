//! Fatal startup errors and their process exit codes.
//!
//! Every error here occurs before the render loop starts. `main` prints the
//! error to stderr and exits with [`Error::exit_code`]; a clean run exits 0.

use std::path::PathBuf;
use thiserror::Error;

/// The shader stage that failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown switch {0}")]
    UnknownSwitch(String),

    #[error("Switch {0} is missing its argument")]
    MissingValue(String),

    #[error("Unexpected argument {0}")]
    UnexpectedArgument(String),

    #[error("could not load {kind} vertex shader {path}")]
    ShaderFileRead {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} shader did not compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("could not link the shader pipeline: {log}")]
    ShaderLink { log: String },

    #[error("failed to load texture {path}: {reason}")]
    TextureDecode { path: PathBuf, reason: String },

    #[error("could not open window: {0}")]
    WindowInit(String),
}

impl Error {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnknownSwitch(_) | Error::MissingValue(_) => 7,
            Error::UnexpectedArgument(_) => 17,
            Error::ShaderFileRead { .. } => 11,
            Error::ShaderCompile { .. } | Error::ShaderLink { .. } => 2,
            Error::TextureDecode { .. } => 3,
            Error::WindowInit(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_match_the_cli_contract() {
        assert_eq!(Error::UnknownSwitch("-foo".into()).exit_code(), 7);
        assert_eq!(Error::MissingValue("-w".into()).exit_code(), 7);
        assert_eq!(Error::UnexpectedArgument("stray".into()).exit_code(), 17);
        assert_eq!(
            Error::ShaderFileRead {
                kind: "sail",
                path: "does_not_exist.wgsl".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }
            .exit_code(),
            11
        );
        assert_eq!(
            Error::ShaderCompile {
                stage: ShaderStage::Vertex,
                log: String::new(),
            }
            .exit_code(),
            2
        );
        assert_eq!(Error::ShaderLink { log: String::new() }.exit_code(), 2);
        assert_eq!(
            Error::TextureDecode {
                path: "brick.jpg".into(),
                reason: "missing".into(),
            }
            .exit_code(),
            3
        );
        assert_eq!(Error::WindowInit("no adapter".into()).exit_code(), 1);
    }

    #[test]
    fn messages_name_the_offender() {
        let err = Error::UnknownSwitch("-foo".into());
        assert!(err.to_string().contains("-foo"));
        let err = Error::TextureDecode {
            path: "brick.jpg".into(),
            reason: "decode failed".into(),
        };
        assert!(err.to_string().contains("brick.jpg"));
    }
}
