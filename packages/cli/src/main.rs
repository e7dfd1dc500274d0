mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    init, new_course, outline, validate, InitArgs, NewArgs, OutlineArgs, ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// Coursekit CLI - work with course outlines on disk
#[derive(Parser, Debug)]
#[command(name = "coursekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default coursekit.config.json
    Init(InitArgs),

    /// Create an empty course file
    New(NewArgs),

    /// Check that a course is ready to publish
    Validate(ValidateArgs),

    /// Print the module/unit/lesson outline of a course
    Outline(OutlineArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} cannot read current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new_course(args, &cwd),
        Command::Validate(args) => validate(args, &cwd),
        Command::Outline(args) => outline(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
