//! lexclean CLI - legislation document cleaning tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use lexclean::compliance::analysis_messages;
use lexclean::{
    clean_file_with_options, extract_text, load_docx, CleanOptions, CleanStats, Cleaner,
    JsonFormat,
};

#[derive(Parser)]
#[command(name = "lexclean")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Clean legislation DOCX exports and prepare compliance prompts", long_about = None)]
#[command(
    after_help = "If INPUT is named like a subcommand (e.g. a file called `clean`), put `--` before the paths:\n  lexclean -- clean cleaned.docx"
)]
struct Cli {
    /// Input DOCX file
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output DOCX file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove artifact paragraphs and normalize whitespace
    Clean {
        /// Input DOCX file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output DOCX file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Extra artifact pattern (regex, may be repeated)
        #[arg(short, long = "pattern", value_name = "REGEX")]
        patterns: Vec<String>,

        /// Use a default style sheet instead of the source's
        #[arg(long)]
        no_styles: bool,
    },

    /// Extract plain text from a DOCX, PDF or text file
    Text {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Dump the paragraph model of a DOCX as JSON
    Json {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information and what cleaning would remove
    Info {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Build the compliance analysis messages for an LLM as JSON
    Prompt {
        /// Reference policy or legislation (DOCX, PDF or text)
        #[arg(value_name = "REFERENCE")]
        reference: PathBuf,

        /// Document to review (DOCX, PDF or text)
        #[arg(value_name = "DOCUMENT")]
        document: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Clean {
            input,
            output,
            patterns,
            no_styles,
        }) => cmd_clean(&input, &output, patterns, !no_styles),
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref()),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Prompt {
            reference,
            document,
            output,
        }) => cmd_prompt(&reference, &document, output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match default_paths(cli.input, cli.output) {
            Ok(Some((input, output))) => cmd_clean(&input, &output, Vec::new(), true),
            Ok(None) => {
                println!("{}", "Usage: lexclean <INPUT> <OUTPUT>".yellow());
                println!("       lexclean --help for more information");
                Ok(())
            }
            Err(e) => e.exit(),
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Resolve the top-level positional paths. Both or neither must be given.
fn default_paths(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<Option<(PathBuf, PathBuf)>, clap::Error> {
    match (input, output) {
        (Some(input), Some(output)) => Ok(Some((input, output))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(Cli::command().error(
            ErrorKind::MissingRequiredArgument,
            "the following required arguments were not provided:\n  <OUTPUT>",
        )),
        (None, Some(_)) => Err(Cli::command().error(
            ErrorKind::MissingRequiredArgument,
            "the following required arguments were not provided:\n  <INPUT>",
        )),
    }
}

fn cmd_clean(
    input: &Path,
    output: &Path,
    patterns: Vec<String>,
    keep_styles: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = CleanOptions::new()
        .with_artifact_patterns(patterns)
        .with_styles(keep_styles);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Cleaning {}...", input.display()));

    let result = clean_file_with_options(input, output, options);
    pb.finish_and_clear();
    let stats = result?;

    println!(
        "{} {}",
        "Successfully cleaned document and saved to".green(),
        output.display()
    );
    print_stats(&stats);

    Ok(())
}

fn print_stats(stats: &CleanStats) {
    println!("  {} {} paragraphs read", "├─".dimmed(), stats.input_paragraphs);
    println!("  {} {} artifacts removed", "├─".dimmed(), stats.artifacts);
    println!("  {} {} emptied by normalization", "├─".dimmed(), stats.emptied);
    println!("  {} {} paragraphs kept", "└─".dimmed(), stats.kept);
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_text(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = extract_text(input)?;
    write_or_print(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_docx(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = lexclean::render::to_json(&doc, format)?;
    write_or_print(output, &json)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_docx(input)?;
    let stats = Cleaner::default().clean_with_stats(&doc).stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Paragraphs".bold(), doc.paragraph_count());
    println!("{}: {}", "Runs".bold(), doc.run_count());
    println!(
        "{}: {}",
        "Style sheet".bold(),
        if doc.styles.is_some() { "Yes" } else { "No" }
    );

    let text = doc.plain_text();
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());

    println!();
    println!("{}", "Cleaning Preview".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Artifacts".bold(), stats.artifacts);
    println!("{}: {}", "Emptied".bold(), stats.emptied);
    println!("{}: {}", "Kept".bold(), stats.kept);

    Ok(())
}

fn cmd_prompt(
    reference: &Path,
    document: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let reference_text = extract_text(reference)?;
    let document_text = extract_text(document)?;

    let messages = analysis_messages(&reference_text, &document_text);
    let json = serde_json::to_string_pretty(&messages)?;
    write_or_print(output, &json)
}

fn cmd_version() {
    println!("{} {}", "lexclean".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Legislation document cleaning tool");
    println!();
    println!("License: MIT");
}
