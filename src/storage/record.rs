use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::types::{Token, TokenPair};

pub const CACHE_VERSION: u32 = 1;

/// Outcome of the bootstrap phase. Written once, read on every later run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowCacheRecord {
    pub token_one: Token,
    pub token_two: Token,
    pub pool_address: Address,
}

impl WorkflowCacheRecord {
    pub fn new(token_one: Token, token_two: Token, pool_address: Address) -> Self {
        Self { token_one, token_two, pool_address }
    }

    pub fn pair(&self) -> TokenPair {
        TokenPair::new(self.token_one.clone(), self.token_two.clone())
    }

    /// Why the record cannot be used, if anything.
    pub fn validate(&self) -> Result<(), String> {
        let addresses = [
            ("tokenOne", self.token_one.address),
            ("tokenTwo", self.token_two.address),
            ("poolAddress", self.pool_address),
        ];
        if let Some((field, _)) = addresses.iter().find(|(_, a)| a.is_zero()) {
            return Err(format!("{field} is the zero address"));
        }

        if self.token_one.address == self.token_two.address {
            return Err("both tokens share one address".to_string());
        }
        if self.pool_address == self.token_one.address || self.pool_address == self.token_two.address {
            return Err("pool address equals a token address".to_string());
        }

        Ok(())
    }

    pub(crate) fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&CacheFile {
            version: Some(CACHE_VERSION),
            token_one: Some((&self.token_one).into()),
            token_two: Some((&self.token_two).into()),
            pool_address: Some(self.pool_address),
        })
    }

    /// Parses a cache file. Anything that is not a complete, valid record of
    /// a known version is logged and read as no record.
    pub(crate) fn from_json(raw: &str) -> Option<Self> {
        let file: CacheFile = match serde_json::from_str(raw) {
            Ok(file) => file,
            Err(e) => {
                warn!(target: "pool_seeder::cache", error = %e, "discarding malformed cache file");
                return None;
            }
        };

        match file.version {
            Some(CACHE_VERSION) => {}
            None if file.is_empty() => return None,
            None => info!(target: "pool_seeder::cache", "migrating unversioned cache record"),
            Some(version) => {
                warn!(target: "pool_seeder::cache", version, "discarding cache record of unknown version");
                return None;
            }
        }

        let (Some(token_one), Some(token_two), Some(pool_address)) =
            (file.token_one, file.token_two, file.pool_address)
        else {
            warn!(target: "pool_seeder::cache", "discarding incomplete cache record");
            return None;
        };

        let record = Self::new(token_one.into(), token_two.into(), pool_address);
        if let Err(reason) = record.validate() {
            warn!(target: "pool_seeder::cache", %reason, "discarding invalid cache record");
            return None;
        }

        Some(record)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
    #[serde(default)]
    token_one: Option<CachedToken>,
    #[serde(default)]
    token_two: Option<CachedToken>,
    #[serde(default)]
    pool_address: Option<Address>,
}

impl CacheFile {
    fn is_empty(&self) -> bool {
        self.token_one.is_none() && self.token_two.is_none() && self.pool_address.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CachedToken {
    address: Address,
    token_name: String,
    token_symbol: String,
    #[serde(with = "decimal_u256")]
    token_supply: U256,
}

impl From<&Token> for CachedToken {
    fn from(token: &Token) -> Self {
        Self {
            address: token.address,
            token_name: token.name.clone(),
            token_symbol: token.symbol.clone(),
            token_supply: token.total_supply,
        }
    }
}

impl From<CachedToken> for Token {
    fn from(token: CachedToken) -> Self {
        Self {
            address: token.address,
            name: token.token_name,
            symbol: token.token_symbol,
            total_supply: token.token_supply,
        }
    }
}

/// Supplies are written as decimal strings.
mod decimal_u256 {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub(super) fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim().parse::<U256>().map_err(D::Error::custom)
    }
}
