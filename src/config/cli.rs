use crate::core::export::OutputFormat;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "garage-catalog")]
#[command(about = "Browse a warehouse vehicle catalog from a JSON document")]
pub struct CliConfig {
    /// Catalog location: http(s) URL or local file path
    #[arg(long)]
    pub src: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Sort token applied to the selected tab, e.g. price-dsc
    #[arg(long)]
    pub sort: Option<String>,

    /// Warehouse tab the sort applies to (all tabs when omitted)
    #[arg(long)]
    pub tab: Option<usize>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the rendered catalog to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Skip malformed vehicles instead of rejecting the document
    #[arg(long)]
    pub lenient: bool,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Show the details card of one vehicle in the selected tab
    #[arg(long)]
    pub details: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}
