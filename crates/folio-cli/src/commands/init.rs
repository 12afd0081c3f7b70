use std::path::{Path, PathBuf};

use anyhow::Result;

use folio_core::{AppConfig, Portfolio};

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Written,
    Kept,
}

pub fn run(config: &AppConfig, config_path: &Path, force: bool) -> Result<()> {
    let content_path = config
        .content_path()
        .unwrap_or_else(AppConfig::default_content_path);

    for (path, outcome) in write_files(config, config_path, &content_path, force)? {
        match outcome {
            Outcome::Written => println!("Wrote {}", path.display()),
            Outcome::Kept => println!("Kept existing {} (use --force to overwrite)", path.display()),
        }
    }

    println!("\nEdit the portfolio file, then run:");
    println!("  folio");
    Ok(())
}

/// Write the config and the sample portfolio, leaving existing files alone
/// unless `force` is set
fn write_files(
    config: &AppConfig,
    config_path: &Path,
    content_path: &Path,
    force: bool,
) -> Result<Vec<(PathBuf, Outcome)>> {
    let mut results = Vec::with_capacity(2);

    let content_outcome = if content_path.exists() && !force {
        Outcome::Kept
    } else {
        if let Some(parent) = content_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(content_path, Portfolio::sample_toml())?;
        tracing::info!("Wrote sample portfolio to {}", content_path.display());
        Outcome::Written
    };

    let config_outcome = if config_path.exists() && !force {
        Outcome::Kept
    } else {
        let mut config = config.clone();
        config.general.content_path = Some(content_path.to_path_buf());
        config.save_to(config_path)?;
        tracing::info!("Wrote config to {}", config_path.display());
        Outcome::Written
    };

    results.push((config_path.to_path_buf(), config_outcome));
    results.push((content_path.to_path_buf(), content_outcome));
    Ok(results)
}
