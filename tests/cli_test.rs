//! Integration tests for the CLI.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const OVERRIDE_VARS: &[&str] = &[
    "RENTBOT_INTERPRETER",
    "RENTBOT_VENV_DIR",
    "RENTBOT_MANIFEST",
    "RENTBOT_MARKER_PACKAGE",
    "RENTBOT_ENTRY_POINT",
    "RENTBOT_PANEL_URL",
];

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("launcher.yml"), config).unwrap();
    fs::write(temp.path().join("requirements.txt"), "Flask==3.0.3\n").unwrap();
    fs::write(temp.path().join("run.py"), "print('hello')\n").unwrap();
    temp
}

fn launcher(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("rentbot-launcher"));
    cmd.current_dir(temp.path()).arg("--no-pause");
    for var in OVERRIDE_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("rentbot-launcher"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage: rentbot-launcher"))
        .stdout(predicate::str::contains("status"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("rentbot-launcher"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_conflicting_install_flags() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("rentbot-launcher"));
    cmd.args(["run", "--skip-install", "--reinstall"]);
    cmd.assert().failure().code(2);
    Ok(())
}

#[test]
fn config_prints_resolved_yaml() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("venv_dir: .venv\n");
    launcher(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("# "))
        .stdout(predicate::str::contains("venv_dir: .venv"))
        .stdout(predicate::str::contains("marker_package: Flask"));
    Ok(())
}

#[test]
fn config_env_override_wins() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("marker_package: Flask\n");
    launcher(&temp)
        .args(["config", "--json"])
        .env("RENTBOT_MARKER_PACKAGE", "pyTelegramBotAPI")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""marker_package": "pyTelegramBotAPI""#,
        ));
    Ok(())
}

#[test]
fn config_with_unknown_field_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("venv: venv\n");
    launcher(&temp)
        .arg("config")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("launcher.yml"));
    Ok(())
}

#[test]
fn completions_generate_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("rentbot-launcher"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("rentbot-launcher"));
    Ok(())
}

#[test]
fn run_without_interpreter_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("required_env: []\n");
    launcher(&temp)
        .env("RENTBOT_INTERPRETER", "rentbot-no-such-python-4c2e")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("rentbot-no-such-python-4c2e"))
        .stderr(predicate::str::contains("python.org"));

    assert!(!temp.path().join("venv").exists());
    Ok(())
}

#[test]
fn status_without_interpreter_is_not_ready() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("required_env: []\n");
    launcher(&temp)
        .args(["status", "--json"])
        .env("RENTBOT_INTERPRETER", "rentbot-no-such-python-4c2e")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(r#""name": "interpreter""#))
        .stdout(predicate::str::contains(r#""state": "missing""#));
    Ok(())
}

/// End-to-end runs against a shell script standing in for Python.
#[cfg(unix)]
mod fake_python {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Handles `--version`, `-m venv`, `-m pip list/install` and running a
    /// script. Each action is appended to `$FAKEPY_LOG`.
    const FAKE_PYTHON: &str = r#"#!/bin/sh
here="$(cd "$(dirname "$0")" && pwd)"
case "$1" in
  --version)
    echo "Python 3.12.1"
    ;;
  -m)
    case "$2" in
      venv)
        echo venv >> "$FAKEPY_LOG"
        mkdir -p "$3/bin"
        touch "$3/bin/activate"
        cp "$0" "$3/bin/python"
        chmod +x "$3/bin/python"
        ;;
      pip)
        if [ "$3" = "list" ]; then
          if [ -f "$here/../installed" ]; then
            echo '[{"name": "flask", "version": "3.0.3"}]'
          else
            echo '[]'
          fi
        else
          echo install >> "$FAKEPY_LOG"
          touch "$here/../installed"
        fi
        ;;
    esac
    ;;
  *)
    echo "app VIRTUAL_ENV=$VIRTUAL_ENV" >> "$FAKEPY_LOG"
    ;;
esac
"#;

    struct Fixture {
        project: TempDir,
        python: PathBuf,
        log: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let project = setup_project("required_env: []\n");
            let python = project.path().join("fake-python");
            fs::write(&python, FAKE_PYTHON).unwrap();
            fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).unwrap();
            let log = project.path().join("fakepy.log");
            Self {
                project,
                python,
                log,
            }
        }

        fn run(&self) -> assert_cmd::assert::Assert {
            launcher(&self.project)
                .env("RENTBOT_INTERPRETER", &self.python)
                .env("FAKEPY_LOG", &self.log)
                .assert()
        }

        fn log_lines(&self) -> Vec<String> {
            fs::read_to_string(&self.log)
                .unwrap_or_default()
                .lines()
                .map(str::to_string)
                .collect()
        }

        fn root(&self) -> &Path {
            self.project.path()
        }
    }

    #[test]
    fn first_run_creates_installs_and_launches() {
        let fx = Fixture::new();

        fx.run()
            .success()
            .stdout(predicate::str::contains("Python found: Python 3.12.1"))
            .stdout(predicate::str::contains("Virtual environment created"))
            .stdout(predicate::str::contains("Dependencies installed"))
            .stdout(predicate::str::contains("http://localhost:5000"))
            .stdout(predicate::str::contains("Application stopped"));

        let lines = fx.log_lines();
        assert_eq!(lines.len(), 3, "{:?}", lines);
        assert_eq!(lines[0], "venv");
        assert_eq!(lines[1], "install");
        assert!(lines[2].starts_with("app VIRTUAL_ENV="));
        assert!(lines[2].ends_with("venv"));
        assert!(fx.root().join("venv/bin/python").exists());
    }

    #[test]
    fn second_run_skips_creation_and_install() {
        let fx = Fixture::new();
        fx.run().success();

        fx.run()
            .success()
            .stdout(predicate::str::contains("Virtual environment found"))
            .stdout(predicate::str::contains("Dependencies already installed (Flask 3.0.3)"))
            .stdout(predicate::str::contains("Application stopped"));

        let lines = fx.log_lines();
        assert_eq!(lines.iter().filter(|l| *l == "venv").count(), 1);
        assert_eq!(lines.iter().filter(|l| *l == "install").count(), 1);
        assert_eq!(lines.iter().filter(|l| l.starts_with("app")).count(), 2);
    }

    #[test]
    fn broken_environment_fails_activation() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.root().join("venv")).unwrap();

        fx.run()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Failed to activate"));

        assert!(!fx.log_lines().iter().any(|l| l.starts_with("app")));
    }

    #[test]
    fn verbose_run_shows_command_lines() {
        let fx = Fixture::new();
        let python = fx.python.display().to_string();

        fx.run()
            .success()
            .stdout(predicate::str::contains("$ ").not());

        launcher(&fx.project)
            .arg("--verbose")
            .env("RENTBOT_INTERPRETER", &fx.python)
            .env("FAKEPY_LOG", &fx.log)
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("$ {} --version", python)))
            .stdout(predicate::str::contains("-m pip list --format=json"))
            .stdout(predicate::str::contains("run.py"));
    }

    #[test]
    fn non_executable_interpreter_reports_cause() {
        let fx = Fixture::new();
        fs::set_permissions(&fx.python, fs::Permissions::from_mode(0o644)).unwrap();

        fx.run()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Permission denied"));

        assert!(!fx.root().join("venv").exists());
    }

    #[test]
    fn status_report_stays_on_stdout() {
        let fx = Fixture::new();

        launcher(&fx.project)
            .arg("status")
            .env("RENTBOT_INTERPRETER", &fx.python)
            .env("FAKEPY_LOG", &fx.log)
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::contains("[ok] interpreter:"))
            .stdout(predicate::str::contains("[FAIL] environment:"))
            .stderr(predicate::str::contains("environment:").not());
    }

    #[test]
    fn status_after_run_is_ready() {
        let fx = Fixture::new();
        fx.run().success();

        launcher(&fx.project)
            .arg("status")
            .env("RENTBOT_INTERPRETER", &fx.python)
            .env("FAKEPY_LOG", &fx.log)
            .assert()
            .success()
            .stdout(predicate::str::contains("Ready to launch."));
    }
}
