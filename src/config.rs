use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

const CONFIG_CANDIDATES: &[(&str, ConfigFormat)] = &[
    ("goinit.yml", ConfigFormat::Yaml),
    ("goinit.yaml", ConfigFormat::Yaml),
    ("goinit.toml", ConfigFormat::Toml),
];

pub const ENV_CONFIG_DIR: &str = "GOINIT_CONFIG_DIR";
pub const ENV_WORKSPACE_ROOT: &str = "GOINIT_WORKSPACE_ROOT";
pub const ENV_IGNORE_TEMPLATE: &str = "GOINIT_IGNORE_TEMPLATE";
pub const ENV_EDITOR: &str = "GOINIT_EDITOR";
pub const ENV_MANIFEST_COMMAND: &str = "GOINIT_MANIFEST_COMMAND";

pub const DEFAULT_EDITOR: &str = "code";
pub const DEFAULT_MANIFEST_COMMAND: &str = "go mod init";

#[derive(Debug, Clone)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

/// Settings as written in a `goinit.{yml,yaml,toml}` file. Every key is optional.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub workspace_root: Option<String>,
    #[serde(default)]
    pub ignore_template: Option<String>,
    #[serde(default)]
    pub editor: Option<String>,
    #[serde(default)]
    pub manifest_command: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoadedFileConfig {
    pub path: PathBuf,
    pub data: FileConfig,
}

/// Effective configuration after defaults, config file and environment are layered.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base of the `src/*/*` tree; discovered through `go env GOPATH` when unset.
    pub workspace_root: Option<PathBuf>,
    pub ignore_template: PathBuf,
    /// Empty means "do not launch an editor".
    pub editor: String,
    pub manifest_command: String,
}

impl Config {
    pub fn defaults(home: Option<&Path>) -> Self {
        let ignore_template = match home {
            Some(home) => home.join(".gitignore"),
            None => PathBuf::from(".gitignore"),
        };
        Self {
            workspace_root: None,
            ignore_template,
            editor: DEFAULT_EDITOR.to_string(),
            manifest_command: DEFAULT_MANIFEST_COMMAND.to_string(),
        }
    }

    /// Load from the user's config directory and process environment.
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir();
        let config_dir = std::env::var_os(ENV_CONFIG_DIR)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join("goinit")));

        let file = match config_dir {
            Some(dir) => load_file_config_from_dir(&dir)?,
            None => None,
        };
        if let Some(file) = &file {
            debug!("loaded configuration from {}", file.path.display());
        }

        Ok(Self::resolve(
            file.map(|f| f.data),
            |key| std::env::var(key).ok(),
            home.as_deref(),
        ))
    }

    /// Layer `file` and then environment values (via `env`) on top of the defaults.
    pub fn resolve(
        file: Option<FileConfig>,
        env: impl Fn(&str) -> Option<String>,
        home: Option<&Path>,
    ) -> Self {
        let mut cfg = Self::defaults(home);

        if let Some(file) = file {
            if let Some(root) = non_empty(file.workspace_root) {
                cfg.workspace_root = Some(expand_home(&root, home));
            }
            if let Some(template) = non_empty(file.ignore_template) {
                cfg.ignore_template = expand_home(&template, home);
            }
            if let Some(editor) = file.editor {
                cfg.editor = editor.trim().to_string();
            }
            if let Some(command) = non_empty(file.manifest_command) {
                cfg.manifest_command = command;
            }
        }

        if let Some(root) = non_empty(env(ENV_WORKSPACE_ROOT)) {
            cfg.workspace_root = Some(expand_home(&root, home));
        }
        if let Some(template) = non_empty(env(ENV_IGNORE_TEMPLATE)) {
            cfg.ignore_template = expand_home(&template, home);
        }
        if let Some(editor) = env(ENV_EDITOR) {
            cfg.editor = editor.trim().to_string();
        }
        if let Some(command) = non_empty(env(ENV_MANIFEST_COMMAND)) {
            cfg.manifest_command = command;
        }

        cfg
    }

    pub fn editor_enabled(&self) -> bool {
        !self.editor.trim().is_empty()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Expand a leading `~` or `~/` against `home`; other paths pass through.
pub fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    match (raw, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (raw, Some(home)) if raw.starts_with("~/") => home.join(&raw[2..]),
        (raw, _) => PathBuf::from(raw),
    }
}

pub fn load_file_config_from_dir(base_dir: &Path) -> Result<Option<LoadedFileConfig>> {
    for (file, format) in CONFIG_CANDIDATES {
        let path = base_dir.join(file);
        if !path.exists() {
            continue;
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading config at {}", path.display()))?;
        let data = match format {
            ConfigFormat::Yaml => parse_yaml_str(&content)
                .with_context(|| format!("parsing YAML config at {}", path.display()))?,
            ConfigFormat::Toml => parse_toml_str(&content)
                .with_context(|| format!("parsing TOML config at {}", path.display()))?,
        };
        return Ok(Some(LoadedFileConfig { path, data }));
    }
    Ok(None)
}

pub(crate) fn parse_yaml_str(content: &str) -> Result<FileConfig> {
    // An empty YAML document deserializes as unit, not as an empty map.
    if content.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

pub(crate) fn parse_toml_str(content: &str) -> Result<FileConfig> {
    Ok(toml::from_str(content)?)
}
