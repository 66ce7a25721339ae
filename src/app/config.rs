use crate::app::cli::{Cli, Commands};
use crate::app::models::{DriverConfig, RunConfig, BASELINE_DIR};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const MAX_VERBOSITY: u8 = 4;

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    root: Option<PathBuf>,
    outdir: Option<PathBuf>,
    driver: Option<PathBuf>,
    driver_args: Option<Vec<String>>,
}

fn load_presets_file() -> Result<HashMap<String, PresetConfig>> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let config_path = home
        .join(".config")
        .join("baseline_archive")
        .join("presets.toml");

    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    parse_presets(&content)
}

fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>> {
    let parsed: PresetsFile = toml::from_str(content).context("Failed to parse presets.toml")?;
    Ok(parsed.presets)
}

/// Joins `path` onto `base` and resolves it on disk when it already exists.
fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = base.join(path);
    fs::canonicalize(&joined).unwrap_or(joined)
}

/// Bare program names are left for a `PATH` lookup; anything with a directory
/// part is anchored at `base` like the other paths.
fn resolve_program(base: &Path, program: PathBuf) -> PathBuf {
    if program.is_relative() && program.components().count() > 1 {
        base.join(program)
    } else {
        program
    }
}

pub fn resolve_config(
    cli: &Cli,
    current_dir: &Path,
    project_name: Option<&str>,
) -> Result<RunConfig> {
    let presets = load_presets_file()?;
    resolve_with_presets(cli, current_dir, project_name, &presets)
}

fn resolve_with_presets(
    cli: &Cli,
    current_dir: &Path,
    project_name: Option<&str>,
    presets: &HashMap<String, PresetConfig>,
) -> Result<RunConfig> {
    // Determine preset to use: CLI flag > Auto-detect > None
    let preset = match cli.preset.as_deref() {
        Some(name) => match presets.get(name) {
            Some(preset) => preset.clone(),
            None => bail!("Unknown preset '{}'", name),
        },
        None => project_name
            .and_then(|k| presets.get(k))
            .cloned()
            .unwrap_or_default(),
    };

    let root = cli
        .root
        .clone()
        .or(preset.root)
        .unwrap_or_else(|| PathBuf::from("."));
    let root_directory = absolutize(current_dir, &root);

    let output_directory = match cli.outdir.clone().or(preset.outdir) {
        Some(outdir) => absolutize(current_dir, &outdir),
        None => root_directory.clone(),
    };

    let driver = match &cli.command {
        Commands::Rebase(rebase) => match rebase.driver.clone() {
            Some(program) => Some(DriverConfig {
                program: resolve_program(current_dir, program),
                args: rebase.driver_args.clone(),
            }),
            None => preset.driver.map(|program| DriverConfig {
                program: resolve_program(current_dir, program),
                args: preset.driver_args.unwrap_or_default(),
            }),
        },
        Commands::Archive(_) => None,
    };

    Ok(RunConfig {
        root_directory,
        output_directory,
        verbosity: cli.verbose.min(MAX_VERBOSITY),
        baseline_subdir_name: BASELINE_DIR.to_string(),
        driver,
    })
}
