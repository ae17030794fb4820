//! # Labelsmith CLI
//!
//! Command-line interface for generating labels from an orders spreadsheet.
//!
//! ## Usage
//!
//! ```bash
//! # Generate labels.zip with the default logo (./logo.jpg)
//! labelsmith generate --orders orders.xlsx
//!
//! # Use a different logo and save a preview of the first label
//! labelsmith generate --orders orders.xlsx --logo shop.png --preview first.png
//!
//! # Start the web interface
//! labelsmith serve --listen 0.0.0.0:8080
//! ```
//!
//! Set `RUST_LOG=debug` to log every generated label.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use labelsmith::{
    LabelError, LabelSettings, Logo,
    archive::ARCHIVE_FILE_NAME,
    batch,
    logo::DEFAULT_LOGO_PATH,
    render,
    server::{self, ServerConfig},
    sheet,
};

/// Labelsmith - Batch label generator
#[derive(Parser, Debug)]
#[command(name = "labelsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a zip of label documents from a spreadsheet
    Generate {
        /// Orders workbook (xlsx, xls, xlsb, ods)
        #[arg(long, value_name = "FILE")]
        orders: PathBuf,

        /// Logo to use instead of the default one
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,

        /// Default logo
        #[arg(long, value_name = "FILE", default_value = DEFAULT_LOGO_PATH)]
        default_logo: PathBuf,

        /// Where to write the archive
        #[arg(long, value_name = "FILE", default_value = ARCHIVE_FILE_NAME)]
        output: PathBuf,

        /// Also save the first label as PNG
        #[arg(long, value_name = "FILE")]
        preview: Option<PathBuf>,

        #[command(flatten)]
        label: LabelArgs,
    },

    /// Serve the web interface
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Logo used when no custom logo is uploaded
        #[arg(long, value_name = "FILE", default_value = DEFAULT_LOGO_PATH)]
        default_logo: PathBuf,

        #[command(flatten)]
        label: LabelArgs,
    },
}

/// Label layout overrides shared by both commands.
#[derive(Args, Debug)]
struct LabelArgs {
    /// Preferred TrueType/OpenType font (falls back to a built-in bitmap font)
    #[arg(long, value_name = "FILE", default_value = "arial.ttf")]
    font: PathBuf,

    /// Font size in pixels
    #[arg(long, default_value = "40")]
    font_size: f32,

    /// Picture width in each document, in inches
    #[arg(long, default_value = "3.6")]
    width_inches: f32,

    /// The first spreadsheet row is an order, not column headers
    #[arg(long)]
    no_header: bool,
}

impl LabelArgs {
    fn settings(&self) -> LabelSettings {
        LabelSettings {
            font_path: self.font.clone(),
            font_size: self.font_size,
            document_width_inches: self.width_inches,
            header_row: !self.no_header,
            ..Default::default()
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LabelError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            orders,
            logo,
            default_logo,
            output,
            preview,
            label,
        } => {
            let template = match logo {
                Some(path) => Logo::from_file(&path)?,
                None => Logo::load_default(&default_logo)?,
            };
            let spreadsheet = sheet::read_workbook_file(&orders)?;

            println!("Generating labels from {}...", orders.display());
            let run = batch::run(&spreadsheet, &template, &label.settings())?;

            std::fs::write(&output, &run.archive)?;
            println!("Saved {} labels to {}", run.label_count, output.display());

            if let Some(preview_path) = preview {
                match &run.preview {
                    Some(img) => {
                        std::fs::write(&preview_path, render::to_png(img)?)?;
                        println!("Saved preview to {}", preview_path.display());
                    }
                    None => println!("No rows, no preview written"),
                }
            }
        }
        Commands::Serve {
            listen,
            default_logo,
            label,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                default_logo_path: default_logo,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config, label.settings()))?;
        }
    }

    Ok(())
}
