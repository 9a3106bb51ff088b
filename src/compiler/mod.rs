//! The source-compiler collaborator.
//!
//! The build pipeline hands a generated source file plus its runtime library
//! to a compiler toolchain and expects loadable class artifacts back. The
//! toolchain is external; everything above the [`SourceCompiler`] trait is
//! testable without one installed.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("failed to launch compiler `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{diagnostics}")]
    Diagnostics { diagnostics: String },
}

/// Turns one source file into class artifacts in `target_dir`, with
/// `classpath` on the resolution path.
///
/// Any diagnostic output is a failure, warnings included. A model source
/// that compiles with complaints is not trusted to score requests.
pub trait SourceCompiler: Send + Sync {
    fn compile(
        &self,
        source: &Path,
        classpath: &Path,
        target_dir: &Path,
    ) -> Result<(), CompilerError>;
}

/// Shells out to the JVM toolchain compiler. The generated model sources and
/// the runtime library are JVM artifacts; the bundle format expects `.class`
/// files, so the real `javac` stays in the loop.
pub struct JavacCompiler {
    executable: PathBuf,
}

impl JavacCompiler {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

impl Default for JavacCompiler {
    fn default() -> Self {
        Self::new("javac")
    }
}

impl SourceCompiler for JavacCompiler {
    fn compile(
        &self,
        source: &Path,
        classpath: &Path,
        target_dir: &Path,
    ) -> Result<(), CompilerError> {
        info!(
            "Compiling {} with classpath {}",
            source.display(),
            classpath.display()
        );

        let output = Command::new(&self.executable)
            .arg("-classpath")
            .arg(classpath)
            .arg("-d")
            .arg(target_dir)
            .arg(source)
            .output()
            .map_err(|source| CompilerError::Launch {
                command: self.executable.display().to_string(),
                source,
            })?;

        let mut diagnostics = String::new();
        diagnostics.push_str(&String::from_utf8_lossy(&output.stderr));
        diagnostics.push_str(&String::from_utf8_lossy(&output.stdout));
        let diagnostics = diagnostics.trim().to_string();

        if !output.status.success() || !diagnostics.is_empty() {
            return Err(CompilerError::Diagnostics {
                diagnostics: if diagnostics.is_empty() {
                    format!("compiler exited with {}", output.status)
                } else {
                    diagnostics
                },
            });
        }
        Ok(())
    }
}
