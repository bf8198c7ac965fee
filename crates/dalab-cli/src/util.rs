use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use dalab_analysis::config::{load_config, AnalysisConfig};

/// Check that `path` names an existing `.csv` file.
pub fn validate_csv_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    if ext.as_deref() != Some("csv") {
        anyhow::bail!("File must have a .csv extension: {}", path.display());
    }

    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    Ok(())
}

/// Load the config file if one was given, otherwise use the defaults, then
/// apply the `--output-dir` override.
pub fn resolve_config(
    config_path: Option<&PathBuf>,
    output_dir: Option<&PathBuf>,
) -> Result<AnalysisConfig> {
    let mut config = match config_path {
        Some(path) => {
            log::info!("[dalab] Using config: {:?}", path);
            load_config(path)?
        }
        None => {
            log::debug!("[dalab] No config provided; using defaults.");
            AnalysisConfig::default()
        }
    };

    if let Some(dir) = output_dir {
        config.output_dir = dir.clone();
    }
    Ok(config)
}

/// Create `dir` (and parents) if needed.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))
}
