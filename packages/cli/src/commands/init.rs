use anyhow::Result;
use clap::Args;
use colored::Colorize;
use coursekit_editor::{EditorConfig, DEFAULT_CONFIG_NAME};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Autosave quiet period in milliseconds
    #[arg(short, long, default_value_t = 1000)]
    pub debounce_ms: u64,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = EditorConfig {
        autosave_debounce_ms: args.debounce_ms,
        ..EditorConfig::default()
    };

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    tracing::debug!(path = %config_path.display(), "wrote config");
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    Ok(())
}
