//! Find a Python interpreter and query the properties its wheel tags depend on.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Couldn't find a Python interpreter in PATH. Is Python installed?")]
    NoPythonInstalled,
    #[error("Couldn't find `{0}` in PATH. Is this Python version installed?")]
    RequestedPythonNotFound(String),
    #[error("Failed to run `{}` to query interpreter info", .interpreter.display())]
    PythonSubcommandLaunch {
        interpreter: PathBuf,
        #[source]
        err: io::Error,
    },
    #[error("{message}:\n--- stdout:\n{stdout}\n--- stderr:\n{stderr}\n---")]
    PythonSubcommandOutput {
        message: String,
        stdout: String,
        stderr: String,
    },
}

/// Pick a sensible default for the python a user wants when they didn't specify a version.
pub fn find_default_python() -> Result<PathBuf, Error> {
    let python = which::which("python3")
        .or_else(|_| which::which("python"))
        .map_err(|_| Error::NoPythonInstalled)?;
    Ok(fs_err::canonicalize(python)?)
}

/// Find a user requested python version/interpreter.
///
/// Supported formats:
/// * `--python 3.11` searches for an installed Python 3.11 as `python3.11` in `PATH`.
/// * `--python python3.11` or `--python pypy3` looks for a binary in `PATH`.
/// * `--python /home/ferris/.local/bin/python3.11` uses this exact Python.
pub fn find_requested_python(request: &str) -> Result<PathBuf, Error> {
    let versions = request
        .splitn(3, '.')
        .map(str::parse::<u8>)
        .collect::<Result<Vec<_>, _>>();
    let python = if versions.is_ok() {
        // `--python 3.11` or `--python 3.11.2`
        let formatted = format!("python{request}");
        debug!("Looking for {formatted} in PATH");
        which::which(&formatted).map_err(|_| Error::RequestedPythonNotFound(request.to_string()))?
    } else if !request.contains(std::path::MAIN_SEPARATOR) {
        // `--python python3.11`
        which::which(request).map_err(|_| Error::RequestedPythonNotFound(request.to_string()))?
    } else {
        // `--python /home/ferris/.local/bin/python3.11`
        PathBuf::from(request)
    };
    Ok(fs_err::canonicalize(python)?)
}

/// A Python executable and the properties a wheel tag is derived from.
#[derive(Debug, Clone)]
pub struct Interpreter {
    implementation_name: String,
    python_version: (u8, u8),
    implementation_version: (u8, u8),
    sys_executable: PathBuf,
}

impl Interpreter {
    /// Detect the interpreter info for the given Python executable.
    pub fn query(executable: &Path) -> Result<Self, Error> {
        let info = InterpreterQueryResult::query(executable)?;
        Ok(Self {
            implementation_name: info.implementation_name,
            python_version: info.python_version,
            implementation_version: info.implementation_version,
            sys_executable: info.sys_executable,
        })
    }

    /// Construct an interpreter from its parts, without running a Python executable.
    pub fn artificial(
        implementation_name: String,
        python_version: (u8, u8),
        implementation_version: (u8, u8),
        sys_executable: PathBuf,
    ) -> Self {
        Self {
            implementation_name,
            python_version,
            implementation_version,
            sys_executable,
        }
    }

    /// Returns the implementation name reported by the interpreter (e.g., `cpython`).
    pub fn implementation_name(&self) -> &str {
        &self.implementation_name
    }

    /// Returns the Python language version as a `(major, minor)` tuple.
    pub fn python_version(&self) -> (u8, u8) {
        self.python_version
    }

    /// Returns the implementation version as a `(major, minor)` tuple.
    ///
    /// For CPython this matches the language version; for PyPy it is the
    /// PyPy release (e.g., `(7, 3)`).
    pub fn implementation_version(&self) -> (u8, u8) {
        self.implementation_version
    }

    /// Returns the `sys.executable` path the interpreter reported.
    pub fn sys_executable(&self) -> &Path {
        &self.sys_executable
    }
}

#[derive(Debug, Deserialize)]
struct InterpreterQueryResult {
    implementation_name: String,
    python_version: (u8, u8),
    implementation_version: (u8, u8),
    sys_executable: PathBuf,
}

impl InterpreterQueryResult {
    /// Return the resolved [`InterpreterQueryResult`] for the given Python executable.
    fn query(interpreter: &Path) -> Result<Self, Error> {
        debug!("Querying interpreter info from {}", interpreter.display());
        let output = Command::new(interpreter)
            .args(["-c", include_str!("get_interpreter_info.py")])
            .output()
            .map_err(|err| Error::PythonSubcommandLaunch {
                interpreter: interpreter.to_path_buf(),
                err,
            })?;

        // stderr isn't technically a criterion for success, but i don't know of any cases where there
        // should be stderr output and if there is, we want to know
        if !output.status.success() || !output.stderr.is_empty() {
            return Err(Error::PythonSubcommandOutput {
                message: format!(
                    "Querying python at {} failed with status {}",
                    interpreter.display(),
                    output.status,
                ),
                stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let data = serde_json::from_slice::<Self>(&output.stdout).map_err(|err| {
            Error::PythonSubcommandOutput {
                message: format!(
                    "Querying python at {} did not return the expected data: {}",
                    interpreter.display(),
                    err,
                ),
                stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
        })?;

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{find_requested_python, Interpreter, InterpreterQueryResult};

    #[test]
    fn parse_query_output() {
        let data = r#"{
            "implementation_name": "cpython",
            "implementation_version": [3, 11],
            "python_version": [3, 11],
            "sys_executable": "/usr/bin/python3.11"
        }"#;
        let info: InterpreterQueryResult = serde_json::from_str(data).unwrap();
        assert_eq!(info.implementation_name, "cpython");
        assert_eq!(info.python_version, (3, 11));
        assert_eq!(info.implementation_version, (3, 11));
        assert_eq!(info.sys_executable, Path::new("/usr/bin/python3.11"));
    }

    #[test]
    fn parse_pypy_query_output() {
        let data = r#"{
            "implementation_name": "pypy",
            "implementation_version": [7, 3],
            "python_version": [3, 10],
            "sys_executable": "/opt/pypy3.10/bin/pypy3"
        }"#;
        let info: InterpreterQueryResult = serde_json::from_str(data).unwrap();
        assert_eq!(info.implementation_name, "pypy");
        assert_eq!(info.python_version, (3, 10));
        assert_eq!(info.implementation_version, (7, 3));
    }

    #[test]
    fn artificial_interpreter() {
        let interpreter = Interpreter::artificial(
            "cpython".to_string(),
            (3, 12),
            (3, 12),
            PathBuf::from("/usr/bin/python3.12"),
        );
        assert_eq!(interpreter.implementation_name(), "cpython");
        assert_eq!(interpreter.python_version(), (3, 12));
        assert_eq!(interpreter.implementation_version(), (3, 12));
        assert_eq!(
            interpreter.sys_executable(),
            Path::new("/usr/bin/python3.12")
        );
    }

    #[test]
    fn no_such_python_version() {
        assert_eq!(
            find_requested_python("3.1000").unwrap_err().to_string(),
            "Couldn't find `3.1000` in PATH. Is this Python version installed?"
        );
    }

    #[test]
    fn no_such_python_binary() {
        assert_eq!(
            find_requested_python("python3.1000").unwrap_err().to_string(),
            "Couldn't find `python3.1000` in PATH. Is this Python version installed?"
        );
    }
}
