//! Password Gate - Entry Point
//!
//! Serves a single-password login page in front of a web application.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use password_gate::auth::{HashAlgorithm, hash_password};
use password_gate::utils::logging::setup_logging;
use password_gate::{GateConfig, GateError, Server};

#[derive(Parser)]
#[command(name = "password-gate", version, about)]
struct Cli {
    /// Path to the configuration file (defaults to ./config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the login server (default)
    Serve,
    /// Hash a password for the `password` setting
    Passwd {
        /// sha1, sha256, sha512, argon2 or bcrypt
        #[arg(short, long, default_value = "argon2")]
        algorithm: HashAlgorithm,

        /// Password to hash; read from stdin when omitted
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    setup_logging();

    let cli = Cli::parse();
    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(cli.config).await,
        Commands::Passwd {
            algorithm,
            password,
        } => passwd(algorithm, password),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(config_path: Option<PathBuf>) -> Result<(), GateError> {
    info!("Launching password gate...");

    let config = GateConfig::load(config_path.as_deref())?;
    let server = Server::new(&config).await?;
    server.start().await
}

fn passwd(algorithm: HashAlgorithm, password: Option<String>) -> Result<(), GateError> {
    let password = match password {
        Some(password) => password,
        None => {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if password.is_empty() {
        return Err(GateError::InvalidConfig("refusing to hash an empty password".into()));
    }

    println!("{}", hash_password(&password, algorithm)?);
    Ok(())
}
