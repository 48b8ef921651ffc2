//! cpp2java - Main Entry Point
//!
//! ## Conversion Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  STAGE 0: DISCOVERY                                          │
//! │    → File arguments are taken as is                          │
//! │    → Directories are walked for .cpp / .cc / .cxx            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  STAGE 1: LINE CONVERSION (per file, fresh state)            │
//! │    → Access-modifier tracker                                 │
//! │    → Declaration rules   (registry writes)                   │
//! │    → Control-flow rules  (registry reads and writes)         │
//! │    → Expression cascade  (registry reads)                    │
//! ├──────────────────────────────────────────────────────────────┤
//! │  STAGE 2: OUTPUT                                             │
//! │    → <input>.java next to the input, under -o, or stdout     │
//! │    → Diagnostics on stderr as path: message in line N: text  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cpp2java::{convert_file, convert_path, discover_sources, ConverterConfig, FileReport};

#[derive(Parser, Debug)]
#[command(name = "cpp2java")]
#[command(about = "Convert C++ snippets to Java, line by line")]
#[command(version)]
struct Cli {
    /// C++ source files or directories
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Write .java files into this directory instead of next to the input
    #[arg(short, long, value_name = "DIR", conflicts_with = "stdout")]
    output_dir: Option<PathBuf>,

    /// Print converted code to stdout instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Indentation width of synthesized lines
    #[arg(long, value_name = "N", default_value_t = 2)]
    indent: usize,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_diagnostics(report: &FileReport) {
    for line in report.diagnostic_lines() {
        eprintln!("{}", line);
    }
}

fn run(cli: &Cli) -> Result<usize> {
    let config = ConverterConfig::with_indent_width(cli.indent);
    let mut diagnostics = 0;

    for input in &cli.inputs {
        let sources = discover_sources(input)
            .with_context(|| format!("Failed to collect sources from {}", input.display()))?;

        for source in sources {
            let report = if cli.stdout {
                let report = convert_path(&source, &config)
                    .with_context(|| format!("Failed to convert {}", source.display()))?;
                print!("{}", report.conversion.to_text());
                report
            } else {
                convert_file(&source, &config, cli.output_dir.as_deref())
                    .with_context(|| format!("Failed to convert {}", source.display()))?
            };

            print_diagnostics(&report);
            diagnostics += report.diagnostics().len();
        }
    }

    Ok(diagnostics)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(0) => {}
        Ok(count) => tracing::warn!(count, "conversion finished with diagnostics"),
        Err(err) => {
            eprintln!("error: {:#}", err);
            exit(1);
        }
    }
}
