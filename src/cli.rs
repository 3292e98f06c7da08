use std::io;

use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::{Shell, generate};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::Config;
use crate::error::{InitError, Result};
use crate::project::init::{InitOptions, ProjectInitializer};
use crate::tools::runner::SystemRunner;
use crate::workspace::{locator, selector};

/// Root CLI for goinit
#[derive(Parser, Debug)]
#[command(name = "goinit")]
#[command(about = "Create a Go module inside your GOPATH workspace")]
pub struct Cli {
    /// Name of the project directory to create
    pub name: Option<String>,
    /// Skip git init, .gitignore copy and the initial commit
    #[arg(long)]
    pub no_git: bool,
    /// Do not open the editor afterwards
    #[arg(long)]
    pub no_editor: bool,
    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn init_options(&self) -> InitOptions {
        InitOptions {
            git: !self.no_git,
            editor: !self.no_editor,
        }
    }
}

/// Dispatch after parse
pub fn run() {
    let cli = Cli::parse();
    if let Some(shell) = cli.completions {
        write_completions(shell, &mut io::stdout());
        return;
    }
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = execute(&cli) {
        eprintln!("error ({}): {e}", e.stage());
        if let Some(step) = e.failed_step() {
            eprintln!("note: files created before `{step}` were left in place");
        }
        std::process::exit(1);
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let config = Config::load().map_err(|e| InitError::environment(format!("{e:#}")))?;
    let mut runner = SystemRunner;

    let home = dirs::home_dir();
    let root = locator::discover_workspace_root(&config, &mut runner, home.as_deref())?;
    let location = locator::locate(&root)?;

    let destination = if location.is_current_valid {
        location.current
    } else {
        let stdin = io::stdin();
        selector::select(&location.candidates, &mut stdin.lock(), &mut io::stdout())?
    };

    ProjectInitializer::new(&mut runner, &config, cli.init_options(), io::stdout())
        .initialize(&destination, cli.name.as_deref())?;
    Ok(())
}

fn write_completions(shell: Shell, out: &mut impl io::Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "goinit", out);
}

/// `None` defers to `RUST_LOG`, falling back to warnings.
fn log_level(verbose: u8, quiet: bool) -> Option<&'static str> {
    if quiet {
        return Some("error");
    }
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Step output goes to stdout, so logs stay on stderr and default to warnings.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = match log_level(verbose, quiet) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}
