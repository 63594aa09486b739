//! Configuration from the environment

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use chrono::TimeDelta;

use crate::notes::DEFAULT_RECENT_WINDOW_DAYS;
use crate::notes::DEFAULT_SLOT;
use crate::notes::StoreConfig;
use crate::storage;
use crate::utils::env_var;
use crate::utils::env_var_or_else;
use crate::utils::env_var_parse_or;

const DEFAULT_ADDRESS: &str = "0.0.0.0:6000";

/// Roughly what a browser grants a single site
const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Everything needed to start Notely
#[derive(Debug)]
pub struct Config {
    /// Address to listen on
    pub address: SocketAddr,

    /// Where to keep the slots
    pub storage: storage::Config,

    /// Note store settings
    pub store: StoreConfig,
}

impl Config {
    /// Read the configuration from the environment
    ///
    /// - `ADDRESS`, with `PORT` to only override the port
    /// - `STORAGE_PATH` to use file storage, memory storage otherwise
    /// - `STORAGE_QUOTA_BYTES` for memory storage, `0` is unlimited
    /// - `NOTES_SLOT`
    /// - `RECENT_WINDOW_DAYS`
    ///
    /// # Errors
    ///
    /// Will return `Err` when any value is set but invalid
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            address: address()?,
            storage: storage_config()?,
            store: store_config()?,
        })
    }
}

fn address() -> Result<SocketAddr> {
    let mut address = env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS))
        .parse::<SocketAddr>()
        .context("Invalid `ADDRESS`")?;

    // optional override of just the port
    if let Some(port) = env_var("PORT") {
        let port = port.parse::<u16>().context("Invalid `PORT`")?;

        address.set_port(port);
    }

    Ok(address)
}

fn storage_config() -> Result<storage::Config> {
    if let Some(directory) = env_var("STORAGE_PATH") {
        return Ok(storage::Config::File {
            directory: PathBuf::from(directory),
        });
    }

    let quota = env_var_parse_or("STORAGE_QUOTA_BYTES", DEFAULT_STORAGE_QUOTA_BYTES)?;

    Ok(storage::Config::Memory {
        quota: (quota > 0).then_some(quota),
    })
}

fn store_config() -> Result<StoreConfig> {
    let slot = env_var_or_else("NOTES_SLOT", || String::from(DEFAULT_SLOT));

    let days = env_var_parse_or("RECENT_WINDOW_DAYS", DEFAULT_RECENT_WINDOW_DAYS)?;
    let recent_window = TimeDelta::try_days(days)
        .filter(|window| *window > TimeDelta::zero())
        .with_context(|| format!("Invalid `RECENT_WINDOW_DAYS`: {days}"))?;

    Ok(StoreConfig {
        slot,
        recent_window,
    })
}
