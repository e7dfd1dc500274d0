use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use coursekit_editor::{update_course_field, Course, JsonFileSink, PersistenceSink};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Course file to create
    pub file: PathBuf,

    /// Course title
    #[arg(short, long, default_value = "Untitled Course")]
    pub title: String,

    /// Course price
    #[arg(short, long, default_value_t = 0.0)]
    pub price: f64,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

pub fn new_course(args: NewArgs, _cwd: &str) -> Result<()> {
    if args.file.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            args.file.display()
        ));
    }

    let id = args
        .file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "course".to_string());

    let course = Course::new(id, args.title.clone());
    let course = update_course_field(&course, "price", &serde_json::json!(args.price))?;

    JsonFileSink::new(&args.file).persist(&course)?;
    println!(
        "  {} Created {} ({})",
        "✓".green(),
        args.file.display(),
        args.title.bright_white()
    );

    Ok(())
}
