//! ctmail CLI - Normalize clinical trials workbooks
//!
//! # Commands
//!
//! ```bash
//! ctmail serve                     # Start HTTP server (port 3000, or $PORT)
//! ctmail parse trials.xlsx         # Print {config, studies, stats} JSON
//! ctmail sheets trials.xlsx        # Show which sheets will be read
//! ```

use clap::{Parser, Subcommand};
use ctmail::{api::DEFAULT_PORT, normalize_file, select_sheets, Workbook};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ctmail")]
#[command(about = "Turn clinical trials workbooks into email-ready data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a workbook and output JSON
    Parse {
        /// Input workbook (.xlsx, .xls, .xlsb, .ods)
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// List the sheets of a workbook and the ones the normalizer reads
    Sheets {
        /// Input workbook
        input: PathBuf,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (default: $PORT, then 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input,
            output,
            compact,
        } => cmd_parse(&input, output.as_deref(), compact),

        Commands::Sheets { input } => cmd_sheets(&input),

        Commands::Serve { port } => cmd_serve(port).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_parse(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Normalizing: {}", input.display());

    let report = normalize_file(input)?;

    eprintln!("   Studies: {}", report.stats.total_studies);
    eprintln!("   New:     {}", report.stats.new_studies);
    eprintln!("   Updated: {}", report.stats.updated_studies);
    eprintln!("   Brands:  {}", report.stats.brand_count);

    let json = if compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    write_output(&json, output)?;

    Ok(())
}

fn cmd_sheets(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let workbook = Workbook::open(input)?;
    let selection = select_sheets(&workbook);

    println!("📋 Sheets in {}:", input.display());
    for name in &selection.sheet_names {
        let marker = if selection.data_sheet.as_deref() == Some(name.as_str()) {
            "  ← data"
        } else {
            ""
        };
        println!("   • {}{}", name, marker);
    }
    println!();
    println!("   Config sheet:         {}", yes_no(selection.has_config));
    println!("   Drug_Brand_Map sheet: {}", yes_no(selection.has_brand_map));

    Ok(())
}

fn yes_no(present: bool) -> &'static str {
    if present {
        "found"
    } else {
        "missing (defaults apply)"
    }
}

async fn cmd_serve(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let port = match port {
        Some(p) => p,
        None => resolve_env_port()?,
    };
    ctmail::server::start_server(port).await
}

fn resolve_env_port() -> Result<u16, Box<dyn std::error::Error>> {
    match std::env::var("PORT") {
        Ok(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT '{}': {}", value, e).into()),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
