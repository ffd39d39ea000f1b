//! Launching the external transport engine
//!
//! The physics lives entirely in the engine binary; this module only starts
//! it in the directory holding `model.xml` and reports how it went.

use crate::model::MODEL_FILE;
use fissile_core::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Lines of stderr kept in an engine error message
const STDERR_TAIL_LINES: usize = 20;

/// Outcome of a successful engine run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub workdir: PathBuf,
    pub elapsed: Duration,
    /// Captured standard output (the engine prints its k-effective summary here)
    pub stdout: String,
}

/// Something that can execute an exported model
pub trait TransportEngine {
    /// Run the model found in `workdir`
    fn run(&self, workdir: &Path) -> Result<RunReport>;

    fn name(&self) -> &str;
}

/// The OpenMC executable
#[derive(Debug, Clone)]
pub struct OpenMcExecutable {
    program: PathBuf,
    threads: Option<usize>,
    extra_args: Vec<String>,
}

impl Default for OpenMcExecutable {
    fn default() -> Self {
        Self {
            program: PathBuf::from("openmc"),
            threads: None,
            extra_args: Vec::new(),
        }
    }
}

impl OpenMcExecutable {
    /// `openmc` resolved through `PATH`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// OpenMP thread count (`-s`)
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads.max(1));
        self
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Command-line arguments passed to the program
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(threads) = self.threads {
            args.push("-s".to_string());
            args.push(threads.to_string());
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

impl TransportEngine for OpenMcExecutable {
    #[instrument(skip(self), fields(program = %self.program.display()))]
    fn run(&self, workdir: &Path) -> Result<RunReport> {
        if !workdir.join(MODEL_FILE).is_file() {
            return Err(Error::Engine(format!(
                "{} not found in {}",
                MODEL_FILE,
                workdir.display()
            )));
        }

        let start = Instant::now();
        let output = Command::new(&self.program)
            .args(self.args())
            .current_dir(workdir)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::Engine(format!(
                    "engine executable {} not found",
                    self.program.display()
                )),
                _ => Error::Io(e),
            })?;
        let elapsed = start.elapsed();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail = stderr_tail(&stderr, STDERR_TAIL_LINES);
            warn!(status = %output.status, "engine run failed");
            return Err(Error::Engine(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                tail
            )));
        }

        info!(elapsed_ms = elapsed.as_millis() as u64, "engine run finished");
        Ok(RunReport {
            workdir: workdir.to_path_buf(),
            elapsed,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    fn name(&self) -> &str {
        "openmc"
    }
}

fn stderr_tail(stderr: &str, lines: usize) -> String {
    let all: Vec<&str> = stderr.lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}
