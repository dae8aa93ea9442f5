//! Render command implementation

use std::path::Path;

use anyhow::{Context, Result};
use linkerconfig_core::ConfigWriter;
use linkerconfig_namespace::load_namespaces;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info};

use crate::cli::RenderArgs;

pub async fn execute(args: RenderArgs) -> Result<()> {
    let json = read_input(&args.input).await?;

    let namespaces = load_namespaces(&json)
        .with_context(|| format!("Invalid namespace description in {}", args.input.display()))?;

    let mut writer = ConfigWriter::new();
    for ns in namespaces {
        debug!(namespace = ns.name(), "Rendering namespace");
        ns.seal().write_config(&mut writer);
    }

    let config = writer.to_config_string();

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, config.as_bytes())
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                lines = writer.lines().len(),
                output = %path.display(),
                "Configuration written"
            );
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(config.as_bytes())
                .await
                .context("Failed to write configuration to stdout")?;
            stdout.flush().await?;
        }
    }

    Ok(())
}

async fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut json = String::new();
        tokio::io::stdin()
            .read_to_string(&mut json)
            .await
            .context("Failed to read namespace descriptions from stdin")?;
        return Ok(json);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}
