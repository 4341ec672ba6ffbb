//! sealbox CLI - encrypt files with a password.
//!
//! Usage:
//!   sealbox encrypt <FILE>...   - seal files into `<name>.encrypted`
//!   sealbox decrypt <FILE>...   - open containers, restoring the original name
//!   sealbox generate            - print strong passwords/passphrases
//!   sealbox check               - rate a password
//!   sealbox config              - show the effective config

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::commands::{OutputOptions, StrengthOptions};
use cli::{Cli, Commands};
use sealbox::config::default_config_path;
use sealbox::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("sealbox={}", log_level).parse()?),
        )
        .with_target(false)
        .init();

    let config_path = cli.config.unwrap_or_else(default_config_path);

    match cli.command {
        Commands::Encrypt {
            files,
            output,
            password,
            force,
            breach_list,
            yes,
        } => {
            let config = Config::load_or_default(&config_path)?;
            let out = OutputOptions { dir: output, force };
            let strength = StrengthOptions {
                breach_list,
                assume_yes: yes,
            };
            cli::commands::encrypt(&files, password, &strength, &config, &out)
        }
        Commands::Decrypt {
            files,
            output,
            password,
            force,
        } => {
            let config = Config::load_or_default(&config_path)?;
            let out = OutputOptions { dir: output, force };
            cli::commands::decrypt(&files, password, &config, &out)
        }
        Commands::Generate {
            passphrase,
            length,
            count,
        } => {
            let config = Config::load_or_default(&config_path)?;
            cli::commands::generate(passphrase, length, count, &config)
        }
        Commands::Check {
            password,
            breach_list,
            json,
        } => cli::commands::check(password, breach_list.as_deref(), json),
        Commands::Config { init } => cli::commands::show_config(&config_path, init),
    }
}
