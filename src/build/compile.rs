//! Compiles the fetched model source against the runtime library.

use std::path::{Path, PathBuf};

use crate::compiler::SourceCompiler;

use super::fetch::FetchedResources;
use super::BuildError;

/// Output of the compile step: the directory holding the class artifacts.
#[derive(Debug, Clone)]
pub struct CompiledClasses {
    pub dir: PathBuf,
}

/// Delegates to the compiler collaborator. Any diagnostic, warnings
/// included, fails the build with the collaborator's concatenated output.
pub fn compile_model(
    compiler: &dyn SourceCompiler,
    resources: &FetchedResources,
    target_dir: &Path,
) -> Result<CompiledClasses, BuildError> {
    compiler
        .compile(&resources.source, &resources.runtime_lib, target_dir)
        .map_err(|err| BuildError::Compilation {
            diagnostics: err.to_string(),
        })?;
    Ok(CompiledClasses {
        dir: target_dir.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::CompilerError;
    use std::path::Path;
    use tempfile::TempDir;

    struct OkCompiler;

    impl SourceCompiler for OkCompiler {
        fn compile(&self, _: &Path, _: &Path, _: &Path) -> Result<(), CompilerError> {
            Ok(())
        }
    }

    struct ComplainingCompiler;

    impl SourceCompiler for ComplainingCompiler {
        fn compile(&self, _: &Path, _: &Path, _: &Path) -> Result<(), CompilerError> {
            Err(CompilerError::Diagnostics {
                diagnostics: "warning: deprecated API\nerror: cannot find symbol".to_string(),
            })
        }
    }

    fn resources(temp: &TempDir) -> FetchedResources {
        FetchedResources {
            source: temp.path().join("iris_model.java"),
            runtime_lib: temp.path().join("genmodel.jar"),
        }
    }

    #[test]
    fn success_hands_back_the_target_directory() {
        let temp = TempDir::new().unwrap();
        let classes = compile_model(&OkCompiler, &resources(&temp), temp.path()).unwrap();
        assert_eq!(classes.dir, temp.path());
    }

    #[test]
    fn diagnostics_become_a_compilation_failure() {
        let temp = TempDir::new().unwrap();
        let err = compile_model(&ComplainingCompiler, &resources(&temp), temp.path()).unwrap_err();
        match err {
            BuildError::Compilation { diagnostics } => {
                assert!(diagnostics.contains("deprecated API"));
                assert!(diagnostics.contains("cannot find symbol"));
            }
            other => panic!("expected Compilation, got {other}"),
        }
    }
}
