use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::utils::version;

/// Where the theme preference is kept between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StoreKind {
    /// Forget the preference when the process exits
    #[default]
    Memory,
    /// JSON file in the data directory
    File,
}

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Page description (JSON5); the built-in sample page is used when omitted"
    )]
    pub markup: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Scripted events (JSON5 list) replayed after the page loads"
    )]
    pub events: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "URL",
        help = "Origin the contact form posts to (overrides configuration)"
    )]
    pub origin: Option<String>,

    #[arg(
        short,
        long,
        value_enum,
        default_value_t = StoreKind::Memory,
        help = "Preference store backing the theme choice"
    )]
    pub store: StoreKind,
}
