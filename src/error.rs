use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, InitError>;

/// One ordered step of project initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateDirectory,
    InitManifest,
    WriteStub,
    InitRepository,
    CopyIgnoreFile,
    StageFiles,
    Commit,
    LaunchEditor,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::CreateDirectory => "create project directory",
            Step::InitManifest => "initialize module manifest",
            Step::WriteStub => "write stub source file",
            Step::InitRepository => "initialize git repository",
            Step::CopyIgnoreFile => "copy .gitignore template",
            Step::StageFiles => "stage files",
            Step::Commit => "create initial commit",
            Step::LaunchEditor => "launch editor",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum InitError {
    /// Workspace root or current directory could not be resolved.
    #[error("{message}")]
    Environment { message: String },

    /// No destinations, or a selection that is not a valid index.
    #[error("{message}")]
    UserInput { message: String },

    /// An initialization step failed; later steps were not run.
    #[error("step `{step}` failed: {message}{}", format_stderr(.stderr))]
    StepExecution {
        step: Step,
        message: String,
        stderr: String,
    },
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

impl InitError {
    pub fn environment(message: impl Into<String>) -> Self {
        Self::Environment {
            message: message.into(),
        }
    }

    pub fn user_input(message: impl Into<String>) -> Self {
        Self::UserInput {
            message: message.into(),
        }
    }

    pub fn step(step: Step, message: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::StepExecution {
            step,
            message: message.into(),
            stderr: stderr.into(),
        }
    }

    /// Short label used as the `error (<stage>)` prefix on the console.
    pub fn stage(&self) -> &'static str {
        match self {
            InitError::Environment { .. } => "environment",
            InitError::UserInput { .. } => "selection",
            InitError::StepExecution { .. } => "init",
        }
    }

    pub fn failed_step(&self) -> Option<Step> {
        match self {
            InitError::StepExecution { step, .. } => Some(*step),
            _ => None,
        }
    }
}
