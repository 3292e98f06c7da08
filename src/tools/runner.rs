use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::utils::shell::{quote_for_display, split_command_line};

/// An external program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Hand the terminal's stdin to the child (editors may ask for it).
    pub inherit_stdin: bool,
}

impl ProcessCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            inherit_stdin: false,
        }
    }

    /// Build from a configured command line, appending `extra` arguments.
    pub fn from_command_line<I, S>(line: &str, extra: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (program, mut args) = split_command_line(line)?;
        args.extend(extra.into_iter().map(Into::into));
        Some(Self {
            program,
            args,
            inherit_stdin: false,
        })
    }

    pub fn with_inherited_stdin(mut self) -> Self {
        self.inherit_stdin = true;
        self
    }

    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(quote_for_display(&self.program));
        for arg in &self.args {
            parts.push(quote_for_display(arg));
        }
        parts.join(" ")
    }
}

/// Exit status and captured streams of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn describe_status(&self) -> String {
        match self.code {
            Some(code) => format!("exited with code {code}"),
            None => "was terminated by a signal".to_string(),
        }
    }
}

/// Runs external commands to completion.
pub trait CommandRunner {
    fn execute(&mut self, command: &ProcessCommand, dir: Option<&Path>) -> io::Result<CommandOutput>;
}

/// Spawns real processes, blocking until each exits.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn execute(&mut self, command: &ProcessCommand, dir: Option<&Path>) -> io::Result<CommandOutput> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(if command.inherit_stdin {
                Stdio::inherit()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }

        debug!(
            "running `{}` in {}",
            command.render(),
            dir.map(|d| d.display().to_string())
                .unwrap_or_else(|| ".".to_string())
        );
        let output = cmd.output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_command_line_appends_extra_args() {
        let cmd = ProcessCommand::from_command_line("code -n", ["."]).expect("command");
        assert_eq!(cmd.program, "code");
        assert_eq!(cmd.args, vec!["-n".to_string(), ".".to_string()]);
        assert!(!cmd.inherit_stdin);
    }

    #[test]
    fn from_command_line_rejects_blank() {
        assert!(ProcessCommand::from_command_line("   ", ["."]).is_none());
    }

    #[test]
    fn render_quotes_arguments_with_spaces() {
        let cmd = ProcessCommand::new("git", ["commit", "-m", "initial commit"]);
        assert_eq!(cmd.render(), "git commit -m \"initial commit\"");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_streams_and_status() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cmd = ProcessCommand::new("sh", ["-c", "pwd -P; echo oops >&2; exit 3"]);

        let output = SystemRunner
            .execute(&cmd, Some(tmp.path()))
            .expect("spawn sh");

        assert!(!output.success);
        assert_eq!(output.code, Some(3));
        assert_eq!(output.describe_status(), "exited with code 3");
        assert_eq!(String::from_utf8_lossy(&output.stderr), "oops\n");
        let reported = String::from_utf8_lossy(&output.stdout);
        let expected = tmp.path().canonicalize().expect("canonical tempdir");
        assert_eq!(reported.trim_end(), expected.display().to_string());
    }

    #[test]
    fn system_runner_reports_missing_program() {
        let cmd = ProcessCommand::new("goinit-definitely-not-installed", Vec::<String>::new());
        let err = SystemRunner.execute(&cmd, None).expect_err("must fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
