use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use coursekit_editor::{validate as validate_course, JsonFileSink};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Course JSON file
    pub file: PathBuf,
}

pub fn validate(args: ValidateArgs, _cwd: &str) -> Result<()> {
    let course = JsonFileSink::load(&args.file)?;

    println!("🔍 {} {}", "Validating".green().bold(), course.title);
    println!("   File: {}", args.file.display());
    println!();

    match validate_course(&course) {
        Ok(course) => {
            println!("✨ {} Ready to publish", "Done".green().bold());
            println!(
                "   {} modules, {} units, {} lessons",
                course.modules.len(),
                course.unit_count(),
                course.lesson_count()
            );
            Ok(())
        }
        Err(failure) => {
            println!("   {} {}", "✗".red(), failure);
            Err(anyhow!("course is not publishable"))
        }
    }
}
