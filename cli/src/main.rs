//! pdfindex CLI - turn PDF layout analysis into search-index JSON

mod analyzer;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use pdfindex::assemble::to_json;
use pdfindex::{
    AnalysisResult, DocumentAnalyzer, ExtractedData, ExtractionStats, IndexingConfig,
    JsonFileAnalyzer, JsonFormat, PdfIndex,
};

use analyzer::AzureLayoutAnalyzer;

#[derive(Parser)]
#[command(name = "pdfindex")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Turn PDF layout analysis into search-index JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a document and emit the indexing envelope
    Index {
        /// Document URL passed to the layout analysis service
        #[arg(value_name = "SOURCE", required_unless_present = "analysis")]
        source: Option<String>,

        /// Replay a saved analysis result instead of calling the service
        #[arg(long, value_name = "FILE", conflicts_with = "source")]
        analysis: Option<PathBuf>,

        /// Config file with `embeddings` and `index` blocks
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also write the raw analysis result here
        #[arg(long, value_name = "FILE")]
        save_analysis: Option<PathBuf>,

        /// Output pretty-printed JSON
        #[arg(long)]
        pretty: bool,

        /// Run the extractors one after another
        #[arg(long)]
        sequential: bool,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Emit one string per line
    Text {
        /// Saved analysis result
        #[arg(value_name = "ANALYSIS")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Emit page geometry and line spans
    Structure {
        /// Saved analysis result
        #[arg(value_name = "ANALYSIS")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Emit tables with cells and cell regions
    Tables {
        /// Saved analysis result
        #[arg(value_name = "ANALYSIS")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show extraction statistics for a saved analysis result
    Info {
        /// Saved analysis result
        #[arg(value_name = "ANALYSIS")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct ServiceArgs {
    /// Layout analysis resource endpoint
    #[arg(long, env = "PDFINDEX_ENDPOINT")]
    endpoint: Option<String>,

    /// Layout analysis resource key
    #[arg(long, env = "PDFINDEX_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Milliseconds between status polls
    #[arg(long, default_value = "1000")]
    poll_interval_ms: u64,

    /// Polls before giving up
    #[arg(long, default_value = "120")]
    max_polls: u32,
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Index {
            source,
            analysis,
            config,
            output,
            save_analysis,
            pretty,
            sequential,
            service,
        } => cmd_index(IndexArgs {
            source,
            analysis,
            config,
            output,
            save_analysis,
            pretty,
            sequential,
            service,
        }),
        Commands::Text {
            input,
            output,
            compact,
        } => cmd_facet(&input, output.as_deref(), |data| {
            to_json(&data.text, format(compact))
        }),
        Commands::Structure {
            input,
            output,
            compact,
        } => cmd_facet(&input, output.as_deref(), |data| {
            to_json(&data.structure, format(compact))
        }),
        Commands::Tables {
            input,
            output,
            compact,
        } => cmd_facet(&input, output.as_deref(), |data| {
            to_json(&data.tables, format(compact))
        }),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

struct IndexArgs {
    source: Option<String>,
    analysis: Option<PathBuf>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    save_analysis: Option<PathBuf>,
    pretty: bool,
    sequential: bool,
    service: ServiceArgs,
}

fn cmd_index(args: IndexArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => IndexingConfig::from_file(path)?,
        None => {
            log::warn!("No config file given; embeddings and index blocks will be empty");
            IndexingConfig::default()
        }
    };

    let result = match (&args.analysis, &args.source) {
        (Some(path), _) => JsonFileAnalyzer::new().analyze(&path.to_string_lossy())?,
        (None, Some(source)) => {
            let endpoint = args
                .service
                .endpoint
                .as_deref()
                .ok_or("Missing --endpoint (or PDFINDEX_ENDPOINT)")?;
            let key = args
                .service
                .key
                .as_deref()
                .ok_or("Missing --key (or PDFINDEX_KEY)")?;

            let analyzer = AzureLayoutAnalyzer::new(endpoint, key)?
                .with_poll_interval(Duration::from_millis(args.service.poll_interval_ms))
                .with_max_polls(args.service.max_polls);
            analyzer.analyze(source)?
        }
        (None, None) => return Err("Either SOURCE or --analysis is required".into()),
    };

    if let Some(path) = &args.save_analysis {
        fs::write(path, to_json(&result, JsonFormat::Pretty)?)?;
        log::info!("Saved analysis to {}", path.display());
    }

    let mut index = PdfIndex::new().with_config(config);
    if args.sequential {
        index = index.sequential();
    }
    if args.pretty {
        index = index.pretty();
    }

    let output = index.index_analysis(&result)?;
    write_output(args.output.as_deref(), &output.document_data)
}

fn cmd_facet<F>(
    input: &Path,
    output: Option<&Path>,
    render: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&ExtractedData) -> pdfindex::Result<String>,
{
    let result = load_analysis(input)?;
    let envelope = PdfIndex::new().assemble(&result)?;
    let json = render(&envelope.extracted_data)?;
    write_output(output, &json)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let result = load_analysis(input)?;
    let envelope = PdfIndex::new().assemble(&result)?;
    let stats = ExtractionStats::collect(&envelope.extracted_data);

    println!("{}", "Analysis Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());

    if let Some(first) = envelope.extracted_data.structure.first() {
        println!(
            "{}: {} x {} {}",
            "Page size".bold(),
            first.width,
            first.height,
            first.unit
        );
    }

    println!();
    println!("{}", "Extraction Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    print_stats(&stats);

    Ok(())
}

fn print_stats(stats: &ExtractionStats) {
    let rows = [
        ("Pages", stats.page_count),
        ("Lines", stats.line_count),
        ("Spans", stats.span_count),
        ("Words", stats.word_count),
        ("Characters", stats.char_count),
        ("Tables", stats.table_count),
        ("Cells", stats.cell_count),
        ("Regions", stats.region_count),
    ];
    for (label, value) in rows {
        println!("{}: {}", label.bold(), value);
    }
}

fn load_analysis(input: &Path) -> Result<AnalysisResult, Box<dyn std::error::Error>> {
    Ok(JsonFileAnalyzer::new().analyze(&input.to_string_lossy())?)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_version() {
    println!("{} {}", "pdfindex".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF layout analysis to search-index JSON");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/pdfindex".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_index_requires_source_or_analysis() {
        assert!(Cli::try_parse_from(["pdfindex", "index"]).is_err());
        assert!(Cli::try_parse_from(["pdfindex", "index", "https://example.com/a.pdf"]).is_ok());
        assert!(Cli::try_parse_from(["pdfindex", "index", "--analysis", "saved.json"]).is_ok());
    }

    #[test]
    fn test_index_source_conflicts_with_analysis() {
        let parsed = Cli::try_parse_from([
            "pdfindex",
            "index",
            "https://example.com/a.pdf",
            "--analysis",
            "saved.json",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_facet_format() {
        assert_eq!(format(true), JsonFormat::Compact);
        assert_eq!(format(false), JsonFormat::Pretty);
    }

    #[test]
    fn test_facet_commands_render_saved_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("layout.json");
        let output = dir.path().join("text.json");
        fs::write(
            &input,
            r#"{"pages": [{"pageNumber": 1, "width": 8.5, "height": 11, "unit": "inch",
                "lines": [{"content": "Invoice #123", "spans": [{"offset": 0, "length": 12}]}]}],
               "tables": []}"#,
        )
        .unwrap();

        cmd_facet(&input, Some(&output), |data| {
            to_json(&data.text, JsonFormat::Compact)
        })
        .unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), r#"["Invoice #123"]"#);
    }
}
