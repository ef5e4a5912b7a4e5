//! Package manager detection
//!
//! Lockfiles decide first. Only when both or neither lockfile exists are the
//! executables probed on the system path; an ambiguous probe yields `None`.

use serde::Serialize;
use std::fmt;
use std::process::{Command, Stdio};

use proj_fs::NormalizedPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
}

impl PackageManager {
    /// The lockfile owned by this package manager.
    pub fn lockfile(self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Yarn => "yarn.lock",
        }
    }

    /// Name of the executable probed on the system path.
    pub fn executable(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

/// Checks whether an executable can be run.
pub trait ExecutableProbe {
    fn is_available(&self, program: &str) -> bool;
}

/// Probes by running `<program> --version`.
///
/// Any failure to spawn or a non-zero exit counts as "not found".
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl SystemProbe {
    fn run(program: &str) -> bool {
        Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl ExecutableProbe for SystemProbe {
    fn is_available(&self, program: &str) -> bool {
        // npm and yarn ship as .cmd shims on Windows
        let found = Self::run(program) || (cfg!(windows) && Self::run(&format!("{program}.cmd")));
        tracing::debug!(program, found, "Probed executable");
        found
    }
}

/// Decide which package manager governs the project at `root`.
pub fn detect(root: &NormalizedPath, probe: &dyn ExecutableProbe) -> Option<PackageManager> {
    let npm_lock = root.join(PackageManager::Npm.lockfile()).is_file();
    let yarn_lock = root.join(PackageManager::Yarn.lockfile()).is_file();

    match (npm_lock, yarn_lock) {
        (true, false) => return Some(PackageManager::Npm),
        (false, true) => return Some(PackageManager::Yarn),
        _ => {}
    }

    tracing::debug!(npm_lock, yarn_lock, "Lockfiles inconclusive — probing executables");
    let npm = probe.is_available(PackageManager::Npm.executable());
    let yarn = probe.is_available(PackageManager::Yarn.executable());
    match (npm, yarn) {
        (true, false) => Some(PackageManager::Npm),
        (false, true) => Some(PackageManager::Yarn),
        _ => None,
    }
}
