use crate::bootstrap::BootstrapConfig;
use crate::snowball::Parameters;
use crate::validators::{ValidatorSet, Weight};
use crate::zfx_id::Id;
use crate::Result;

use config::{Config, Environment, File};
use serde::Deserialize;

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

// For explanation, see issue: https://github.com/serde-rs/serde/issues/368
fn default_db_path() -> String {
    "chain.sled".to_string()
}

/// Settings are overridden by `ZFX_` prefixed environment variables, e.g.
/// `ZFX_PARAMETERS__ALPHA=3`.
const ENV_PREFIX: &str = "ZFX";

#[derive(Debug, Deserialize, Clone)]
pub struct BeaconSettings {
    /// Base58check encoded validator id.
    pub id: String,
    pub weight: Weight,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Base58check encoded chain id.
    pub chain_id: String,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default)]
    pub beacons: Vec<BeaconSettings>,
    /// Directory holding `<chain_id>.txt` recovery records.
    #[serde(default)]
    pub recovery_dir: Option<String>,
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Settings {
    pub fn new(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn chain_id(&self) -> Result<Id> {
        Id::from_str(&self.chain_id)
    }

    pub fn recovery_dir(&self) -> Option<PathBuf> {
        self.recovery_dir.as_ref().map(PathBuf::from)
    }

    pub fn validator_set(&self) -> Result<ValidatorSet> {
        let mut validators = ValidatorSet::new();
        for beacon in self.beacons.iter() {
            validators.insert(Id::from_str(&beacon.id)?, beacon.weight);
        }
        Ok(validators)
    }

    /// The configuration of the chain's bootstrapper. The parameters are validated here
    /// so that a misconfigured node refuses to start.
    pub fn bootstrap_config(&self) -> Result<BootstrapConfig> {
        self.parameters.valid()?;
        Ok(BootstrapConfig {
            chain_id: self.chain_id()?,
            parameters: self.parameters,
            beacons: Arc::new(self.validator_set()?),
        })
    }
}
