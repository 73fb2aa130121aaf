//! Virtual environment creation and activation.
//!
//! Activating a virtualenv from a shell means sourcing a script that sets
//! `VIRTUAL_ENV`, prepends the environment's executable directory to `PATH`
//! and unsets `PYTHONHOME`. A parent process cannot source a script into
//! itself, so [`VirtualEnv::activate`] computes the same variables into an
//! [`ActivatedEnvironment`] that is applied to every later child process.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{LauncherError, Result};
use crate::shell::{CommandSpec, ProcessRunner};

use super::interpreter::Interpreter;

/// Where a virtualenv keeps its executables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VenvLayout {
    /// Directory holding executables and activation scripts.
    pub bin_dir: &'static str,
    /// Interpreter file name inside `bin_dir`.
    pub python: &'static str,
    /// Activation entry point inside `bin_dir`.
    pub activate: &'static str,
}

impl VenvLayout {
    /// Layout created by `venv` on Windows.
    pub const WINDOWS: Self = Self {
        bin_dir: "Scripts",
        python: "python.exe",
        activate: "activate.bat",
    };

    /// Layout created by `venv` everywhere else.
    pub const POSIX: Self = Self {
        bin_dir: "bin",
        python: "python",
        activate: "activate",
    };

    /// Layout for the platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::WINDOWS
        } else {
            Self::POSIX
        }
    }
}

/// A virtual environment directory, which may not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEnv {
    root: PathBuf,
    layout: VenvLayout,
}

impl VirtualEnv {
    /// Environment at `project_root/venv_dir` with the platform layout.
    pub fn new(project_root: &Path, venv_dir: &str) -> Self {
        Self::with_layout(project_root, venv_dir, VenvLayout::current())
    }

    /// Environment with an explicit layout.
    pub fn with_layout(project_root: &Path, venv_dir: &str, layout: VenvLayout) -> Self {
        Self {
            root: project_root.join(venv_dir),
            layout,
        }
    }

    /// Environment directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the environment directory exists.
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Directory holding the environment's executables.
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join(self.layout.bin_dir)
    }

    /// The environment's own interpreter.
    pub fn python_path(&self) -> PathBuf {
        self.bin_dir().join(self.layout.python)
    }

    /// The activation entry point.
    pub fn activate_script(&self) -> PathBuf {
        self.bin_dir().join(self.layout.activate)
    }

    /// Run `<interpreter> -m venv <dir>` from `project_root`.
    pub fn create<R: ProcessRunner + ?Sized>(
        &self,
        runner: &mut R,
        interpreter: &Interpreter,
        project_root: &Path,
    ) -> Result<()> {
        let spec = CommandSpec::new(&interpreter.program)
            .args(["-m", "venv"])
            .arg(self.root.as_os_str())
            .current_dir(project_root);

        let result = runner
            .run(&spec)
            .map_err(|e| LauncherError::EnvironmentCreateFailed {
                path: self.root.clone(),
                message: e.to_string(),
            })?;

        if !result.success {
            return Err(LauncherError::EnvironmentCreateFailed {
                path: self.root.clone(),
                message: result.failure_reason(),
            });
        }

        tracing::debug!("Created virtual environment at {}", self.root.display());
        Ok(())
    }

    /// Compute the activated environment.
    ///
    /// Fails when the activation entry point or the environment interpreter
    /// is missing, which is what a half-deleted or foreign directory looks
    /// like.
    pub fn activate(&self) -> Result<ActivatedEnvironment> {
        self.activate_with_path(std::env::var_os("PATH"))
    }

    /// [`activate`](Self::activate) against an explicit inherited `PATH`.
    pub fn activate_with_path(&self, inherited_path: Option<OsString>) -> Result<ActivatedEnvironment> {
        let activation_failed = |message: String| LauncherError::ActivationFailed {
            path: self.root.clone(),
            message,
        };

        if !self.exists() {
            return Err(activation_failed("directory does not exist".to_string()));
        }

        let script = self.activate_script();
        if !script.is_file() {
            return Err(activation_failed(format!(
                "activation script {} is missing",
                script.display()
            )));
        }

        let python = self.python_path();
        if !python.is_file() {
            return Err(activation_failed(format!(
                "interpreter {} is missing",
                python.display()
            )));
        }

        let mut entries = vec![self.bin_dir()];
        if let Some(path) = inherited_path {
            entries.extend(std::env::split_paths(&path));
        }
        let path = std::env::join_paths(entries)
            .map_err(|e| activation_failed(format!("cannot build PATH: {}", e)))?;

        let mut env = HashMap::new();
        env.insert("VIRTUAL_ENV".to_string(), self.root.clone().into_os_string());
        env.insert("PATH".to_string(), path);

        tracing::debug!("Activated virtual environment at {}", self.root.display());
        Ok(ActivatedEnvironment {
            root: self.root.clone(),
            python,
            env,
        })
    }
}

/// Environment variables and interpreter of an activated virtualenv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivatedEnvironment {
    /// Environment directory (the `VIRTUAL_ENV` value).
    pub root: PathBuf,

    /// Interpreter inside the environment.
    pub python: PathBuf,

    /// Variables set on every child process.
    pub env: HashMap<String, OsString>,
}

impl ActivatedEnvironment {
    /// Variables removed from every child process.
    pub const REMOVED_VARS: &'static [&'static str] = &["PYTHONHOME"];

    /// A spec running the environment's interpreter with this environment
    /// applied.
    pub fn python_command(&self) -> CommandSpec {
        let mut spec = CommandSpec::new(&self.python);
        spec.env.extend(self.env.clone());
        spec.env_remove
            .extend(Self::REMOVED_VARS.iter().map(|v| v.to_string()));
        spec
    }

    /// A spec running `python -m pip <args>` inside the environment.
    pub fn pip_command<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.python_command().args(["-m", "pip"]).args(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{MockResponse, MockRunner};
    use std::fs;
    use tempfile::TempDir;

    fn interpreter() -> Interpreter {
        Interpreter {
            program: "python3".to_string(),
            version: Some("3.12.1".to_string()),
        }
    }

    fn scaffold(venv: &VirtualEnv) {
        fs::create_dir_all(venv.bin_dir()).unwrap();
        fs::write(venv.activate_script(), "").unwrap();
        fs::write(venv.python_path(), "").unwrap();
    }

    #[test]
    fn layouts_differ_by_platform() {
        let root = Path::new("/srv/bot");
        let win = VirtualEnv::with_layout(root, "venv", VenvLayout::WINDOWS);
        let posix = VirtualEnv::with_layout(root, "venv", VenvLayout::POSIX);

        assert!(win.activate_script().ends_with("Scripts/activate.bat"));
        assert!(win.python_path().ends_with("Scripts/python.exe"));
        assert!(posix.activate_script().ends_with("bin/activate"));
        assert!(posix.python_path().ends_with("bin/python"));
    }

    #[test]
    fn exists_checks_directory() {
        let temp = TempDir::new().unwrap();
        let venv = VirtualEnv::new(temp.path(), "venv");
        assert!(!venv.exists());

        fs::create_dir(temp.path().join("venv")).unwrap();
        assert!(venv.exists());
    }

    #[test]
    fn regular_file_is_not_an_environment() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("venv"), "").unwrap();
        assert!(!VirtualEnv::new(temp.path(), "venv").exists());
    }

    #[test]
    fn create_runs_venv_module_once() {
        let temp = TempDir::new().unwrap();
        let venv = VirtualEnv::new(temp.path(), "venv");
        let mut runner = MockRunner::new();

        venv.create(&mut runner, &interpreter(), temp.path()).unwrap();

        assert_eq!(runner.count_matching("-m venv"), 1);
        let spec = runner.find("-m venv").unwrap();
        assert_eq!(spec.cwd.as_deref(), Some(temp.path()));
    }

    #[test]
    fn create_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let venv = VirtualEnv::new(temp.path(), "venv");
        let mut runner = MockRunner::new();
        runner.respond("-m venv", MockResponse::fail(1, "ensurepip is not available"));

        let err = venv
            .create(&mut runner, &interpreter(), temp.path())
            .unwrap_err();
        assert!(matches!(err, LauncherError::EnvironmentCreateFailed { .. }));
        assert!(err.to_string().contains("ensurepip"));
    }

    #[test]
    fn activate_requires_script_and_interpreter() {
        let temp = TempDir::new().unwrap();
        let venv = VirtualEnv::new(temp.path(), "venv");

        let err = venv.activate().unwrap_err();
        assert!(matches!(err, LauncherError::ActivationFailed { .. }));

        fs::create_dir_all(venv.bin_dir()).unwrap();
        fs::write(venv.activate_script(), "").unwrap();
        let err = venv.activate().unwrap_err();
        assert!(err.to_string().contains("interpreter"));

        fs::write(venv.python_path(), "").unwrap();
        assert!(venv.activate().is_ok());
    }

    #[test]
    fn activate_prepends_bin_dir_to_path() {
        let temp = TempDir::new().unwrap();
        let venv = VirtualEnv::new(temp.path(), "venv");
        scaffold(&venv);

        let inherited = std::env::join_paths([PathBuf::from("/usr/bin")]).unwrap();
        let activated = venv.activate_with_path(Some(inherited)).unwrap();

        let path = activated.env.get("PATH").unwrap();
        let entries: Vec<PathBuf> = std::env::split_paths(path).collect();
        assert_eq!(entries[0], venv.bin_dir());
        assert_eq!(entries[1], PathBuf::from("/usr/bin"));
        assert_eq!(
            activated.env.get("VIRTUAL_ENV"),
            Some(&venv.root().as_os_str().to_os_string())
        );
    }

    #[test]
    fn python_command_uses_environment() {
        let temp = TempDir::new().unwrap();
        let venv = VirtualEnv::new(temp.path(), "venv");
        scaffold(&venv);
        let activated = venv.activate_with_path(None).unwrap();

        let spec = activated.pip_command(["list"]);
        assert_eq!(spec.program, venv.python_path());
        assert!(spec.display().ends_with("-m pip list"));
        assert!(spec.env.contains_key("VIRTUAL_ENV"));
        assert_eq!(spec.env_remove, vec!["PYTHONHOME".to_string()]);
    }
}
