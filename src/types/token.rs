// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Wallet-side token views and ledger identifiers.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::POLICY_ID_HEX_LEN;
use crate::error::{KernelError, Result};

/// Hex-encoded 28-byte script hash.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PolicyId(String);

impl PolicyId {
    pub fn new(hex_str: impl Into<String>) -> Result<Self> {
        let s = hex_str.into().to_ascii_lowercase();
        if s.len() != POLICY_ID_HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(KernelError::InvalidPolicyId(s));
        }
        Ok(PolicyId(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PolicyId {
    type Error = KernelError;

    fn try_from(s: String) -> Result<Self> {
        PolicyId::new(s)
    }
}

impl From<PolicyId> for String {
    fn from(p: PolicyId) -> String {
        p.0
    }
}

/// Identifier of a submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(pub String);

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to an unspent output: producing transaction plus output index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutRef {
    pub tx_hash: String,
    pub index: u32,
}

impl OutRef {
    pub fn new(tx_hash: impl Into<String>, index: u32) -> Self {
        Self { tx_hash: tx_hash.into(), index }
    }
}

impl fmt::Display for OutRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.tx_hash, self.index)
    }
}

/// Parses `txHash#index`.
impl FromStr for OutRef {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        let (tx, idx) = s
            .split_once('#')
            .ok_or_else(|| KernelError::InvalidTrade(format!("expected txHash#index, got {:?}", s)))?;
        let index = idx
            .parse()
            .map_err(|_| KernelError::InvalidTrade(format!("bad output index {:?}", idx)))?;
        Ok(OutRef::new(tx, index))
    }
}

/// A native token held by the connected wallet.
///
/// Pure projection of a wallet query; the session replaces the whole list on
/// every refresh.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedToken {
    pub source_ref: OutRef,
    pub asset_unit: String,
    pub policy_id: PolicyId,
    pub asset_name_bytes: String,
    pub display_name: String,
    pub quantity: u64,
}

impl SelectedToken {
    /// Splits a unit (`policyId ++ assetNameHex`) into its parts.
    pub fn from_unit(source_ref: OutRef, unit: &str, quantity: u64) -> Result<Self> {
        if unit.len() < POLICY_ID_HEX_LEN || !unit.is_char_boundary(POLICY_ID_HEX_LEN) {
            return Err(KernelError::InvalidUnit(unit.to_string()));
        }
        let (policy, name_hex) = unit.split_at(POLICY_ID_HEX_LEN);
        let policy_id = PolicyId::new(policy).map_err(|_| KernelError::InvalidUnit(unit.to_string()))?;
        let name_bytes = hex::decode(name_hex).map_err(|_| KernelError::InvalidUnit(unit.to_string()))?;
        let display_name = match String::from_utf8(name_bytes) {
            Ok(s) if !s.is_empty() => s,
            _ => name_hex.to_string(),
        };

        Ok(Self {
            source_ref,
            asset_unit: unit.to_ascii_lowercase(),
            policy_id,
            asset_name_bytes: name_hex.to_ascii_lowercase(),
            display_name,
            quantity,
        })
    }
}

/// Builds a unit string from a policy id and a UTF-8 asset name.
pub fn asset_unit(policy_id: &PolicyId, asset_name: &str) -> String {
    format!("{}{}", policy_id.as_str(), hex::encode(asset_name.as_bytes()))
}
