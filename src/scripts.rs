//! Installation script generation
//!
//! Turns a resolution result into environment-setup files:
//! - `requirements.txt` with pinned versions and requirement chains
//! - `install.sh` / `install.bat` to create a venv and install into it
//! - `activate.sh` as a small activation convenience
//!
//! Nothing here installs anything; the scripts are for the user to run.

use crate::domain::{ResolutionResult, ResolvedPackage};
use crate::error::ScriptError;
use std::fs;
use std::path::{Path, PathBuf};

/// Generates installation files from a resolution result
pub struct ScriptGenerator {
    output_dir: PathBuf,
    venv_name: String,
    python_version: String,
    requirements_only: bool,
}

impl ScriptGenerator {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        venv_name: impl Into<String>,
        python_version: impl Into<String>,
        requirements_only: bool,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            venv_name: venv_name.into(),
            python_version: python_version.into(),
            requirements_only,
        }
    }

    /// Writes the generated files and returns their paths
    ///
    /// Does nothing when the result holds no resolved packages. The
    /// output directory is created if needed; shell scripts get the
    /// executable bit on Unix.
    pub fn generate(&self, result: &ResolutionResult) -> Result<Vec<PathBuf>, ScriptError> {
        if result.resolved.is_empty() {
            return Ok(Vec::new());
        }

        fs::create_dir_all(&self.output_dir).map_err(|source| ScriptError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut written = Vec::new();
        written.push(self.write_file("requirements.txt", &self.requirements(result), false)?);

        if !self.requirements_only {
            written.push(self.write_file("install.sh", &self.install_sh(), true)?);
            written.push(self.write_file("activate.sh", &self.activate_sh(), true)?);
            written.push(self.write_file("install.bat", &self.install_bat(), false)?);
        }

        Ok(written)
    }

    /// Pinned requirements, direct packages first, requirement chains as
    /// `# via` comments
    fn requirements(&self, result: &ResolutionResult) -> String {
        let mut lines = vec![
            format!(
                "# Generated by pipsolve {} for Python {}",
                env!("CARGO_PKG_VERSION"),
                self.python_version
            ),
            String::new(),
        ];

        let (direct, transitive): (Vec<&ResolvedPackage>, Vec<&ResolvedPackage>) =
            result.packages().partition(|p| p.is_direct);

        for package in &direct {
            lines.push(format!("{}=={}", package.name, package.version));
        }
        if !transitive.is_empty() {
            lines.push(String::new());
            lines.push("# Transitive dependencies".to_string());
            for package in &transitive {
                if package.required_by.is_empty() {
                    lines.push(format!("{}=={}", package.name, package.version));
                } else {
                    lines.push(format!(
                        "{}=={}  # via {}",
                        package.name,
                        package.version,
                        package.required_by.join(", ")
                    ));
                }
            }
        }

        lines.push(String::new());
        lines.join("\n")
    }

    fn install_sh(&self) -> String {
        format!(
            r#"#!/usr/bin/env bash
# Generated by pipsolve {version}
set -euo pipefail

PYTHON="${{PYTHON:-python{python}}}"
if ! command -v "$PYTHON" >/dev/null 2>&1; then
    PYTHON=python3
fi

echo "Creating virtual environment '{venv}'..."
"$PYTHON" -m venv "{venv}"

. "{venv}/bin/activate"
pip install --upgrade pip
pip install -r requirements.txt

echo "Done. Activate with: source {venv}/bin/activate"
"#,
            version = env!("CARGO_PKG_VERSION"),
            python = self.python_version,
            venv = self.venv_name,
        )
    }

    fn activate_sh(&self) -> String {
        format!(
            r#"#!/usr/bin/env bash
# Generated by pipsolve {version}
# Source this file: source activate.sh
. "{venv}/bin/activate"
"#,
            version = env!("CARGO_PKG_VERSION"),
            venv = self.venv_name,
        )
    }

    fn install_bat(&self) -> String {
        format!(
            "@echo off\r\n\
             rem Generated by pipsolve {version}\r\n\
             echo Creating virtual environment '{venv}'...\r\n\
             python -m venv {venv}\r\n\
             call {venv}\\Scripts\\activate.bat\r\n\
             pip install --upgrade pip\r\n\
             pip install -r requirements.txt\r\n\
             echo Done. Activate with: {venv}\\Scripts\\activate.bat\r\n",
            version = env!("CARGO_PKG_VERSION"),
            venv = self.venv_name,
        )
    }

    fn write_file(
        &self,
        name: &str,
        content: &str,
        executable: bool,
    ) -> Result<PathBuf, ScriptError> {
        let path = self.output_dir.join(name);
        fs::write(&path, content).map_err(|source| ScriptError::WriteFile {
            path: path.clone(),
            source,
        })?;
        if executable {
            make_executable(&path).map_err(|source| ScriptError::WriteFile {
                path: path.clone(),
                source,
            })?;
        }
        Ok(path)
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
