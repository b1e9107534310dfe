//! Running external commands.
//!
//! Every workload, build, and version-control call goes through a [`CommandRunner`]. The production runner shells
//! out with [`std::process::Command`]; tests substitute a recording fake.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::errors::HarnessError;

/// A command to run: program, arguments, working directory and optional stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub stdin: Option<String>,
}

impl CommandLine {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_string_lossy().into_owned(),
            args: Vec::new(),
            cwd: None,
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<Path>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Where a command's stdout and stderr go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Collect into [`CommandOutput::stdout`].
    Capture,
    /// Append to a trace file, creating it if needed.
    Append(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status; `-1` when the process was killed by a signal.
    pub status: i32,
    /// Combined stdout and stderr; empty when the output went to a file.
    pub stdout: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Blocking command execution.
pub trait CommandRunner {
    /// Run `command` to completion.
    ///
    /// A non-zero exit is a normal [`CommandOutput`]; only failing to launch the program is an error.
    fn run(&self, command: &CommandLine, sink: &OutputSink) -> Result<CommandOutput, HarnessError>;

    /// Run `command` and measure its wall-clock time.
    fn time(&self, command: &CommandLine, sink: &OutputSink) -> Result<(CommandOutput, Duration), HarnessError> {
        let start = Instant::now();
        let output = self.run(command, sink)?;
        Ok((output, start.elapsed()))
    }
}

/// Runs commands as child processes.
#[derive(Debug, Clone, Default)]
pub struct ShellCommandRunner {
    verbose: bool,
}

impl ShellCommandRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Write `command` to `out` when verbose.
    pub fn echo(&self, command: &CommandLine, out: &mut impl Write) -> io::Result<()> {
        if self.verbose {
            writeln!(out, "{command}")?;
        }
        Ok(())
    }
}

impl CommandRunner for ShellCommandRunner {
    #[tracing::instrument(skip_all, fields(program = %command.program))]
    fn run(&self, command: &CommandLine, sink: &OutputSink) -> Result<CommandOutput, HarnessError> {
        // Losing the echo never stops the command.
        let _ = self.echo(command, &mut io::stdout().lock());
        let spawn_error = |source| HarnessError::Spawn {
            command: command.to_string(),
            source,
        };

        let mut process = Command::new(&command.program);
        process.args(&command.args);
        if let Some(dir) = &command.cwd {
            process.current_dir(dir);
        }
        process.stdin(if command.stdin.is_some() { Stdio::piped() } else { Stdio::null() });

        match sink {
            OutputSink::Capture => {
                process.stdout(Stdio::piped()).stderr(Stdio::piped());
            }
            OutputSink::Append(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| HarnessError::io(path, e))?;
                let err_file = file.try_clone().map_err(|e| HarnessError::io(path, e))?;
                process.stdout(Stdio::from(file)).stderr(Stdio::from(err_file));
            }
        }

        let mut child = process.spawn().map_err(spawn_error)?;
        if let (Some(input), Some(mut pipe)) = (&command.stdin, child.stdin.take()) {
            // A child that exits without reading its stdin is fine.
            let _ = pipe.write_all(input.as_bytes());
        }
        let output = child.wait_with_output().map_err(spawn_error)?;

        let mut stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        stdout.push_str(&String::from_utf8_lossy(&output.stderr));
        let status = output.status.code().unwrap_or(-1);
        tracing::debug!(status, "command finished");
        Ok(CommandOutput { status, stdout })
    }
}
