use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rucsearch", about = "SUNAT taxpayer registry lookup")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up taxpayers by DNI, RUC or name
    Search {
        /// The query string
        query: String,
    },
    /// Fetch the detail record for one RUC
    Detail {
        /// 11-digit RUC
        ruc: String,
    },
    /// Expose the pipeline over HTTP
    Serve {
        /// Listen address, overrides the config file
        #[arg(short, long)]
        address: Option<String>,
    },
}
