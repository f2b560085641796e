//! udf2pdf CLI - UDF to PDF conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::debug;

use udf2pdf::{render, ConvertOptions};

#[derive(Parser)]
#[command(name = "udf2pdf")]
#[command(version)]
#[command(about = "Convert UDF document archives to paginated PDF", long_about = None)]
struct Cli {
    /// Input UDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF file (defaults to the input path with a .pdf extension)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a UDF archive to PDF
    Convert {
        /// Input UDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file (defaults to the input path with a .pdf extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Extract the payload text without laying it out
    Text {
        /// Input UDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show document information as JSON
    Info {
        /// Input UDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => convert(&input, output),
        Some(Commands::Text { input, output }) => text(&input, output),
        Some(Commands::Info { input }) => info(&input),
        None => match cli.input {
            Some(input) => convert(&input, cli.output),
            None => {
                eprintln!("{} no input file given (try --help)", "error:".red().bold());
                std::process::exit(2);
            }
        },
    };

    if let Err(err) = result {
        eprintln!("{} {}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

fn convert(input: &Path, output: Option<PathBuf>) -> udf2pdf::Result<()> {
    let output = output.unwrap_or_else(|| default_output(input));
    debug!("converting '{}' -> '{}'", input.display(), output.display());

    let options = ConvertOptions::default();
    let doc = udf2pdf::convert_file_with_options(input, &options)?;
    render::write_pdf(&doc, &options.geometry, &options.metrics, &output)?;

    println!(
        "{} {} ({} pages) -> {}",
        "converted".green().bold(),
        input.display(),
        doc.page_count(),
        output.display()
    );
    Ok(())
}

fn text(input: &Path, output: Option<PathBuf>) -> udf2pdf::Result<()> {
    let payload = udf2pdf::extract_text(input)?;
    match output {
        Some(path) => fs::write(path, payload)?,
        None => println!("{payload}"),
    }
    Ok(())
}

fn info(input: &Path) -> udf2pdf::Result<()> {
    let doc = udf2pdf::convert_file(input)?;
    println!("{}", metadata_json(&doc)?);
    Ok(())
}

fn metadata_json(doc: &udf2pdf::Document) -> udf2pdf::Result<String> {
    serde_json::to_string_pretty(&doc.metadata)
        .map_err(|err| udf2pdf::Error::Io(std::io::Error::other(err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_json_renders_without_error() {
        let mut doc = udf2pdf::Document::new();
        doc.metadata = udf2pdf::Metadata::with_title("dava dosyası");
        doc.metadata.page_count = 3;

        let json = metadata_json(&doc).unwrap();
        assert!(json.contains("dava dosyası"));
        assert!(json.contains("\"page_count\": 3"));
    }

    #[test]
    fn test_default_output_swaps_extension() {
        assert_eq!(
            default_output(Path::new("case/file.udf")),
            PathBuf::from("case/file.pdf")
        );
        assert_eq!(default_output(Path::new("bare")), PathBuf::from("bare.pdf"));
    }
}
