use anyhow::Result;
use clap::Args;
use colored::Colorize;
use coursekit_editor::{Course, JsonFileSink};
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct OutlineArgs {
    /// Course JSON file
    pub file: PathBuf,

    /// Also list lesson attachments
    #[arg(short, long)]
    pub attachments: bool,
}

pub fn outline(args: OutlineArgs, _cwd: &str) -> Result<()> {
    let course = JsonFileSink::load(&args.file)?;
    print!("{}", render_outline(&course, args.attachments));
    Ok(())
}

fn render_outline(course: &Course, attachments: bool) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", course.title.bold());

    for (mi, module) in course.modules.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} {}",
            mi + 1,
            module.title,
            format!("({})", module.duration).dimmed()
        );

        for (ui, unit) in module.units.iter().enumerate() {
            let _ = writeln!(out, "   {}.{} {}", mi + 1, ui + 1, unit.title);

            for lesson in &unit.lessons {
                let _ = writeln!(
                    out,
                    "      - [{}] {} {}",
                    lesson.lesson_type,
                    lesson.title,
                    format!("({})", lesson.duration).dimmed()
                );

                if attachments {
                    for attachment in &lesson.attachments {
                        let _ = writeln!(
                            out,
                            "          📎 {} ({})",
                            attachment.name, attachment.mime_type
                        );
                    }
                }
            }
        }
    }

    let _ = writeln!(
        out,
        "\n{} modules, {} units, {} lessons",
        course.modules.len(),
        course.unit_count(),
        course.lesson_count()
    );
    out
}
