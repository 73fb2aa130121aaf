//! Python interpreter, virtual environment and package handling.
//!
//! - [`interpreter`] - Locating the bootstrap interpreter
//! - [`venv`] - Creating and activating the virtual environment
//! - [`packages`] - Probing for the marker package and installing the manifest

pub mod interpreter;
pub mod packages;
pub mod venv;

pub use interpreter::{detect_interpreter, parse_version, Interpreter};
pub use packages::{
    find_package, install_manifest, list_installed, normalize_name, parse_pip_list,
    probe_marker, InstalledPackage, MarkerStatus,
};
pub use venv::{ActivatedEnvironment, VenvLayout, VirtualEnv};
