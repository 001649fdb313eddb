//! docxtract CLI - Word document content extraction tool
//!
//! Reads a .docx file and writes its content as a JSON array of blocks to
//! stdout (or a file). Exits non-zero on any failure.

use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use docxtract::render::JsonFormat;

/// Extract Word document content to a JSON array of blocks
#[derive(Parser)]
#[command(
    name = "docxtract",
    version,
    about = "Extract Word document content to JSON",
    long_about = "docxtract - Word document content extraction tool.\n\n\
                  Converts a DOCX file into a JSON array of paragraph and table blocks,\n\
                  preserving style names, run-level formatting, and body order."
)]
struct Cli {
    /// Input .docx file
    input: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Parsing document...");

    let doc = docxtract::extract_file(&cli.input)?;
    pb.set_message("Rendering to JSON...");

    let format = if cli.pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };
    let json = docxtract::render::to_json(&doc, format)?;

    pb.finish_and_clear();
    write_output(cli.output.as_ref(), &json)?;

    if let Some(path) = cli.output {
        println!(
            "{} Extracted {} blocks to {}",
            "✓".green().bold(),
            doc.len(),
            path.display()
        );
    }

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
