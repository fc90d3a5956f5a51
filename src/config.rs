use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::de::Deserializer;
use serde::Deserialize;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_NAME: &str = "vcfex";
const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub export_dir: PathBuf,
    pub batch_size: usize,
    pub keys: Keys,
    pub ui: UiConfig,
    pub commands: Commands,
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors: UiColors,
}

#[derive(Debug, Clone)]
pub struct UiColors {
    pub border: RgbColor,
    pub selection_bg: RgbColor,
    pub selection_fg: RgbColor,
    pub status_fg: RgbColor,
    pub status_bg: RgbColor,
}

#[derive(Debug, Clone, Copy)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone)]
pub struct Commands {
    pub share: Option<CommandExec>,
}

#[derive(Debug, Clone)]
pub struct CommandExec {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Keys {
    pub quit: String,
    pub next: String,
    pub prev: String,
    pub toggle: String,
    pub toggle_all: String,
    pub export: String,
    pub export_batches: String,
}

impl Default for Keys {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            next: "j".to_string(),
            prev: "k".to_string(),
            toggle: "Space".to_string(),
            toggle_all: "a".to_string(),
            export: "e".to_string(),
            export_batches: "b".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ConfigFile {
    export_dir: Option<PathBuf>,
    batch_size: usize,
    #[serde(default)]
    keys: Keys,
    #[serde(default)]
    ui: UiFile,
    #[serde(default)]
    commands: CommandsFile,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            export_dir: None,
            batch_size: DEFAULT_BATCH_SIZE,
            keys: Keys::default(),
            ui: UiFile::default(),
            commands: CommandsFile::default(),
        }
    }
}

fn config_root() -> Result<PathBuf> {
    let base = BaseDirs::new().context("unable to determine base directories")?;
    Ok(base.config_dir().join(APP_NAME))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_root()?.join(CONFIG_FILE_NAME))
}

fn default_export_dir() -> Result<PathBuf> {
    let base = BaseDirs::new().context("unable to determine base directories")?;
    Ok(base.data_dir().join(APP_NAME).join("exports"))
}

/// Load the configuration, or defaults when no file exists. `override_path`
/// comes from `--config` and takes precedence over the platform location.
pub fn load(override_path: Option<&Path>) -> Result<Config> {
    let path = match override_path {
        Some(path) => path.to_path_buf(),
        None => config_path()?,
    };

    if !path.exists() {
        return from_file(ConfigFile::default());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read configuration file at {}", path.display()))?;

    let value: toml::Value = toml::from_str(&raw)
        .with_context(|| format!("failed to parse {} as TOML", path.display()))?;

    warn_unknown_keys(&value);

    let cfg_file: ConfigFile = value
        .try_into()
        .with_context(|| format!("failed to deserialize config from {}", path.display()))?;

    from_file(cfg_file)
}

fn from_file(file: ConfigFile) -> Result<Config> {
    let export_dir = match file.export_dir {
        Some(dir) => dir,
        None => default_export_dir()?,
    };

    let batch_size = if file.batch_size == 0 {
        DEFAULT_BATCH_SIZE
    } else {
        file.batch_size
    };

    Ok(Config {
        export_dir,
        batch_size,
        keys: file.keys,
        ui: file.ui.into(),
        commands: file.commands.into(),
    })
}

fn warn_unknown_keys(value: &toml::Value) {
    let Some(table) = value.as_table() else {
        return;
    };

    let known = HashSet::from([
        "export_dir".to_string(),
        "batch_size".to_string(),
        "keys".to_string(),
        "ui".to_string(),
        "commands".to_string(),
    ]);

    for key in table.keys() {
        if !known.contains(key) {
            eprintln!("warning: unknown configuration key `{}`", key);
        }
    }

    if let Some(keys_val) = table.get("keys") {
        if let Some(keys_table) = keys_val.as_table() {
            let key_known = HashSet::from([
                "quit".to_string(),
                "next".to_string(),
                "prev".to_string(),
                "toggle".to_string(),
                "toggle_all".to_string(),
                "export".to_string(),
                "export_batches".to_string(),
            ]);
            for key in keys_table.keys() {
                if !key_known.contains(key) {
                    eprintln!("warning: unknown keys.* entry `{}`", key);
                }
            }
        }
    }

    if let Some(ui_val) = table.get("ui") {
        warn_unknown_ui_keys(ui_val);
    }

    if let Some(commands_val) = table.get("commands") {
        warn_unknown_commands_keys(commands_val);
    }
}

fn warn_unknown_ui_keys(value: &toml::Value) {
    let Some(table) = value.as_table() else {
        return;
    };

    let known = HashSet::from(["colors".to_string()]);
    for key in table.keys() {
        if !known.contains(key) {
            eprintln!("warning: unknown ui.* entry `{}`", key);
        }
    }

    if let Some(colors_val) = table.get("colors") {
        warn_unknown_ui_colors(colors_val);
    }
}

fn warn_unknown_ui_colors(value: &toml::Value) {
    let Some(table) = value.as_table() else {
        return;
    };
    let known = HashSet::from([
        "border".to_string(),
        "selection_bg".to_string(),
        "selection_fg".to_string(),
        "status_fg".to_string(),
        "status_bg".to_string(),
    ]);
    for key in table.keys() {
        if !known.contains(key) {
            eprintln!("warning: unknown ui.colors entry `{}`", key);
        }
    }
}

fn warn_unknown_commands_keys(value: &toml::Value) {
    let Some(table) = value.as_table() else {
        return;
    };
    let known = HashSet::from(["share".to_string()]);
    for key in table.keys() {
        if !known.contains(key) {
            eprintln!("warning: unknown commands entry `{}`", key);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiFile {
    colors: UiColorsFile,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct UiColorsFile {
    border: RgbColor,
    selection_bg: RgbColor,
    selection_fg: RgbColor,
    status_fg: RgbColor,
    status_bg: RgbColor,
}

impl Default for UiColorsFile {
    fn default() -> Self {
        Self {
            border: RgbColor::new(255, 165, 0),
            selection_bg: RgbColor::new(255, 165, 0),
            selection_fg: RgbColor::new(0, 0, 0),
            status_fg: RgbColor::new(255, 165, 0),
            status_bg: RgbColor::new(0, 0, 0),
        }
    }
}

impl From<UiFile> for UiConfig {
    fn from(file: UiFile) -> Self {
        Self {
            colors: UiColors {
                border: file.colors.border,
                selection_bg: file.colors.selection_bg,
                selection_fg: file.colors.selection_fg,
                status_fg: file.colors.status_fg,
                status_bg: file.colors.status_bg,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CommandsFile {
    share: Option<CommandDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CommandDef {
    Simple(String),
    List(Vec<String>),
}

impl From<CommandsFile> for Commands {
    fn from(file: CommandsFile) -> Self {
        Self {
            share: file.share.and_then(CommandExec::from_def),
        }
    }
}

impl CommandExec {
    fn from_def(def: CommandDef) -> Option<Self> {
        match def {
            CommandDef::Simple(cmd) => {
                let trimmed = cmd.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Self {
                        program: trimmed.to_string(),
                        args: Vec::new(),
                    })
                }
            }
            CommandDef::List(mut parts) => {
                if parts.is_empty() {
                    return None;
                }
                let program = parts.remove(0);
                Some(Self {
                    program,
                    args: parts,
                })
            }
        }
    }
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl<'de> serde::Deserialize<'de> for RgbColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Array([u8; 3]),
            Map { r: u8, g: u8, b: u8 },
        }

        let helper = Helper::deserialize(deserializer)?;
        let (r, g, b) = match helper {
            Helper::Array(values) => (values[0], values[1], values[2]),
            Helper::Map { r, g, b } => (r, g, b),
        };
        Ok(RgbColor { r, g, b })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Config {
        let value: toml::Value = toml::from_str(raw).unwrap();
        let file: ConfigFile = value.try_into().unwrap();
        from_file(file).unwrap()
    }

    #[test]
    fn test_full_config_round_trip() {
        let config = parse(
            r#"
            export_dir = "/tmp/exports"
            batch_size = 25

            [keys]
            quit = "x"

            [ui.colors]
            border = [1, 2, 3]
            selection_fg = { r = 4, g = 5, b = 6 }

            [commands]
            share = ["termux-share", "-a", "send"]
            "#,
        );

        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.batch_size, 25);
        assert_eq!(config.keys.quit, "x");
        assert_eq!(config.keys.next, "j");
        assert_eq!(config.ui.colors.border.g, 2);
        assert_eq!(config.ui.colors.selection_fg.b, 6);

        let share = config.commands.share.unwrap();
        assert_eq!(share.program, "termux-share");
        assert_eq!(share.args, vec!["-a", "send"]);
    }

    #[test]
    fn test_zero_batch_size_falls_back_to_default() {
        let config = parse("export_dir = \"/tmp/e\"\nbatch_size = 0\n");
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_share_command_as_plain_string() {
        let config = parse("export_dir = \"/tmp/e\"\n[commands]\nshare = \"xdg-open\"\n");
        let share = config.commands.share.unwrap();
        assert_eq!(share.program, "xdg-open");
        assert!(share.args.is_empty());
    }

    #[test]
    fn test_blank_share_command_is_none() {
        let config = parse("export_dir = \"/tmp/e\"\n[commands]\nshare = \"  \"\n");
        assert!(config.commands.share.is_none());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse("export_dir = \"/tmp/e\"\n");
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.keys.toggle, "Space");
        assert!(config.commands.share.is_none());
        assert_eq!(config.ui.colors.border.r, 255);
    }
}
