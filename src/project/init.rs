use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{InitError, Result, Step};
use crate::tools::runner::{CommandRunner, ProcessCommand};
use crate::utils::report::OutputBuffers;

pub const DEFAULT_PROJECT_NAME: &str = "project";
pub const STUB_FILE_NAME: &str = "main.go";
pub const STUB_CONTENT: &str = "package main\n\nfunc main() {}\n";
pub const IGNORE_FILE_NAME: &str = ".gitignore";
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitOptions {
    /// Run `git init`, copy the ignore template, stage and commit.
    pub git: bool,
    pub editor: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            git: true,
            editor: true,
        }
    }
}

pub fn effective_name(name: Option<&str>) -> &str {
    name.unwrap_or(DEFAULT_PROJECT_NAME)
}

/// Creates a project directory and walks it through the initialization steps.
///
/// Each external step's captured output is printed to `out` once it succeeds.
/// The first failing step aborts the rest; whatever was created before it is
/// left on disk.
pub struct ProjectInitializer<'a, R, W> {
    runner: &'a mut R,
    config: &'a Config,
    options: InitOptions,
    out: W,
    buffers: OutputBuffers,
}

impl<'a, R: CommandRunner, W: Write> ProjectInitializer<'a, R, W> {
    pub fn new(runner: &'a mut R, config: &'a Config, options: InitOptions, out: W) -> Self {
        Self {
            runner,
            config,
            options,
            out,
            buffers: OutputBuffers::default(),
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Returns the path of the new project directory.
    pub fn initialize(&mut self, destination: &Path, name: Option<&str>) -> Result<PathBuf> {
        let name = effective_name(name);
        info!("creating project `{name}` in {}", destination.display());

        self.run_step(
            Step::CreateDirectory,
            ProcessCommand::new("mkdir", [name]),
            destination,
        )?;
        let project_dir = destination.join(name);

        let manifest =
            ProcessCommand::from_command_line(&self.config.manifest_command, Vec::<String>::new())
                .ok_or_else(|| InitError::step(Step::InitManifest, "manifest command is empty", ""))?;
        self.run_step(Step::InitManifest, manifest, &project_dir)?;

        self.write_stub(&project_dir)?;

        if self.options.git {
            self.run_step(
                Step::InitRepository,
                ProcessCommand::new("git", ["init"]),
                &project_dir,
            )?;
            let template = self.config.ignore_template.to_string_lossy().into_owned();
            self.run_step(
                Step::CopyIgnoreFile,
                ProcessCommand::new("cp", [template.as_str(), IGNORE_FILE_NAME]),
                &project_dir,
            )?;
            self.run_step(
                Step::StageFiles,
                ProcessCommand::new("git", ["add", "."]),
                &project_dir,
            )?;
            self.run_step(
                Step::Commit,
                ProcessCommand::new("git", ["commit", "-m", INITIAL_COMMIT_MESSAGE]),
                &project_dir,
            )?;
        } else {
            debug!("skipping git steps");
        }

        if self.options.editor && self.config.editor_enabled() {
            let editor = ProcessCommand::from_command_line(&self.config.editor, ["."])
                .ok_or_else(|| InitError::step(Step::LaunchEditor, "editor command is empty", ""))?
                .with_inherited_stdin();
            self.run_step(Step::LaunchEditor, editor, &project_dir)?;
        } else {
            debug!("skipping editor launch");
        }

        info!("project ready at {}", project_dir.display());
        Ok(project_dir)
    }

    fn write_stub(&self, project_dir: &Path) -> Result<()> {
        let path = project_dir.join(STUB_FILE_NAME);
        info!("{}: {}", Step::WriteStub, path.display());
        fs::write(&path, STUB_CONTENT).map_err(|e| {
            error!("{} failed: {e}", Step::WriteStub);
            InitError::step(Step::WriteStub, format!("writing {}: {e}", path.display()), "")
        })
    }

    fn run_step(&mut self, step: Step, command: ProcessCommand, dir: &Path) -> Result<()> {
        let rendered = command.render();
        info!("{step}: {rendered}");

        let mut output = self.runner.execute(&command, Some(dir)).map_err(|e| {
            error!("{step} failed: could not run `{rendered}`: {e}");
            InitError::step(step, format!("running `{rendered}`: {e}"), "")
        })?;
        self.buffers.capture(&mut output);

        if !output.success {
            let stderr = self.buffers.stderr_text();
            self.buffers.clear();
            let message = format!("`{rendered}` {}", output.describe_status());
            error!("{step} failed: {message}: {}", stderr.trim());
            return Err(InitError::step(step, message, stderr));
        }

        self.buffers
            .report(&mut self.out)
            .map_err(|e| InitError::step(step, format!("printing command output: {e}"), ""))
    }
}
