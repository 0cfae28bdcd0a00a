use clap::{Parser, Subcommand};
use seedlock_core::SecretId;
use seedlock_logs::Logger;
use std::path::PathBuf;

use crate::{
    commands::{config, open_vault, secret},
    config::{default_data_dir, Config, KeyStoreKind},
    Result,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Seedlock {
    /// Local storage directory.
    #[clap(long, env = "SEEDLOCK_DATA_DIR", hide_env_values = true)]
    storage: Option<PathBuf>,

    /// Storage for fragment keys, overrides the config file.
    #[clap(long, value_enum)]
    key_store: Option<KeyStoreKind>,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split and store a new secret.
    Save {
        /// Label for the secret.
        #[clap(short, long)]
        alias: String,

        /// Read the secret from standard input.
        #[clap(long)]
        stdin: bool,
    },
    /// Reconstruct a secret and print it.
    Load {
        /// Print the secret as hex.
        #[clap(long)]
        raw: bool,

        /// Secret identifier.
        id: SecretId,
    },
    /// Replace the value of a stored secret.
    Update {
        /// Read the secret from standard input.
        #[clap(long)]
        stdin: bool,

        /// Secret identifier.
        id: SecretId,
    },
    /// Delete a secret and its fragment keys.
    #[clap(alias = "rm")]
    Delete {
        /// Secret identifier.
        id: SecretId,
    },
    /// List stored secrets.
    #[clap(alias = "ls")]
    List {
        /// Print as JSON.
        #[clap(long)]
        json: bool,
    },
    /// Print the storage location and settings.
    Config {
        /// Write the settings to the config file.
        #[clap(long)]
        init: bool,
    },
}

pub async fn run() -> Result<()> {
    let args = Seedlock::parse();

    let data_dir = match args.storage {
        Some(storage) => storage,
        None => default_data_dir()?,
    };
    let _guard = Logger::new(&data_dir).init_subscriber(None)?;

    let mut settings = Config::load(Config::file(&data_dir)).await?;
    if let Some(key_store) = args.key_store {
        settings.key_store = key_store;
    }

    match args.cmd {
        Command::Config { init } => {
            config::run(&data_dir, &settings, init).await?
        }
        Command::Save { alias, stdin } => {
            let vault = open_vault(&data_dir, &settings)?;
            secret::save(&vault, &alias, stdin).await?
        }
        Command::Load { raw, id } => {
            let vault = open_vault(&data_dir, &settings)?;
            secret::load(&vault, &id, raw).await?
        }
        Command::Update { stdin, id } => {
            let vault = open_vault(&data_dir, &settings)?;
            secret::update(&vault, &id, stdin).await?
        }
        Command::Delete { id } => {
            let vault = open_vault(&data_dir, &settings)?;
            secret::delete(&vault, &id).await?
        }
        Command::List { json } => {
            let vault = open_vault(&data_dir, &settings)?;
            secret::list(&vault, json).await?
        }
    }
    Ok(())
}
