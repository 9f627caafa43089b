//! secenc CLI
//!
//! Entry point for the `secenc` command-line tool: encode or decode a
//! piece of text with any registered algorithm, or list the registry.

use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use secenc_engine::{Algorithm, EngineConfig, OperationRegistry};

#[derive(Parser)]
#[command(name = "secenc")]
#[command(about = "Reversible text transformations: encodings, compressors, ciphers", version)]
struct Cli {
    /// Path to a TOML config file (default: secenc.toml if present)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Override the key directory from the config
    #[arg(long)]
    key_dir: Option<PathBuf>,

    /// Emit failures as JSON on stdout instead of text on stderr
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text with the named algorithm
    Encode {
        /// Algorithm name (see `secenc algorithms`)
        algorithm: String,

        /// Text to transform (read from stdin when omitted)
        text: Option<String>,
    },

    /// Decode an artifact with the named algorithm
    Decode {
        /// Algorithm name (see `secenc algorithms`)
        algorithm: String,

        /// Artifact to transform (read from stdin when omitted)
        text: Option<String>,
    },

    /// List the registered algorithms
    Algorithms,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("secenc.toml"));
    let mut config = match EngineConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    };
    if let Some(key_dir) = cli.key_dir {
        config.key_dir = key_dir;
    }

    match cli.command {
        Commands::Algorithms => {
            for algorithm in Algorithm::ALL {
                let key = if algorithm.needs_key() { " (keyed)" } else { "" };
                println!("{}{key}", algorithm.as_str());
            }
        }
        Commands::Encode { algorithm, text } => {
            run(&config, "encode", &algorithm, text, cli.json);
        }
        Commands::Decode { algorithm, text } => {
            run(&config, "decode", &algorithm, text, cli.json);
        }
    }
}

fn run(config: &EngineConfig, direction: &str, algorithm: &str, text: Option<String>, json: bool) {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("error: cannot read stdin: {e}");
                process::exit(2);
            }
            // Pipes and heredocs append a trailing newline that callers
            // rarely intend to transform.
            buf.trim_end_matches('\n').to_string()
        }
    };

    let registry = OperationRegistry::new(config.clone());
    match registry.dispatch(direction, algorithm, &text) {
        Ok(result) => println!("{result}"),
        Err(e) => {
            if json {
                match serde_json::to_string(&e.to_failure()) {
                    Ok(payload) => println!("{payload}"),
                    Err(ser) => eprintln!("error: {ser}"),
                }
            } else {
                eprintln!("error [{}]: {e}", e.kind().as_str());
            }
            process::exit(1);
        }
    }
}
