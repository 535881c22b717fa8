use std::fs;
use std::path::Path;
use std::str::FromStr;

use anchor_client::Cluster;
use serde::Deserialize;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use thiserror::Error;

use crate::provider::ProgramIds;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid {field} address {value:?}")]
    ProgramId { field: &'static str, value: String },
    #[error("unknown commitment level {0:?}")]
    Commitment(String),
}

#[derive(Deserialize, Debug)]
pub struct Global {
    pub http_url: String,
    pub ws_url: String,
    pub payer_path: String,
    #[serde(default)]
    pub commitment: Option<String>,
    #[serde(default)]
    pub skip_preflight: bool,
}

/// Program addresses; any key left out falls back to the mainnet deployment.
#[derive(Deserialize, Debug, Default)]
pub struct Programs {
    pub token_program: Option<String>,
    pub associated_token_program: Option<String>,
    pub system_program: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub global: Global,
    #[serde(default)]
    pub programs: Programs,
}

impl Config {
    /// Loads and parses the configuration from a TOML file at the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        content.parse()
    }

    pub fn cluster(&self) -> Cluster {
        Cluster::Custom(self.global.http_url.clone(), self.global.ws_url.clone())
    }

    pub fn commitment(&self) -> Result<CommitmentConfig, ConfigError> {
        match &self.global.commitment {
            None => Ok(CommitmentConfig::confirmed()),
            Some(level) => CommitmentConfig::from_str(level)
                .map_err(|_| ConfigError::Commitment(level.clone())),
        }
    }

    pub fn program_ids(&self) -> Result<ProgramIds, ConfigError> {
        let defaults = ProgramIds::default();
        Ok(ProgramIds {
            token_program: parse_or(
                "token_program",
                &self.programs.token_program,
                defaults.token_program,
            )?,
            associated_token_program: parse_or(
                "associated_token_program",
                &self.programs.associated_token_program,
                defaults.associated_token_program,
            )?,
            system_program: parse_or(
                "system_program",
                &self.programs.system_program,
                defaults.system_program,
            )?,
        })
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn parse_or(
    field: &'static str,
    value: &Option<String>,
    default: Pubkey,
) -> Result<Pubkey, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => Pubkey::from_str(value).map_err(|_| ConfigError::ProgramId {
            field,
            value: value.clone(),
        }),
    }
}
