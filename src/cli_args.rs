use std::{net::IpAddr, path::PathBuf};

use clap::{Parser, ValueEnum};

use crate::error::ErrorVerbosity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Seeded process-local catalog, lost on restart.
    Memory,
    /// JSON array persisted to `--books-file`.
    File,
}

#[derive(Debug, Parser)]
#[command(author, about, version)]
pub struct CliArgs {
    /// Path to a YAML configuration file. When set, the other options are ignored.
    #[clap(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Address to listen on.
    #[clap(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on.
    #[clap(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Which book store to serve.
    #[clap(long, env = "STORE", value_enum, default_value_t = StoreKind::File)]
    pub store: StoreKind,

    /// Backing file of the file-backed store.
    #[clap(long, env = "BOOKS_FILE", default_value = "books.json")]
    pub books_file: PathBuf,

    /// How much detail error responses carry.
    #[clap(long, env = "ERROR_VERBOSITY", value_enum, default_value_t = ErrorVerbosity::Full)]
    pub error_verbosity: ErrorVerbosity,
}
