// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Mint and trade intents.
//!
//! An intent is everything this side knows about a transaction before the
//! wallet SDK builds it: script parameters, quantities, the redeemer and the
//! metadata. Building, balancing, signing and submitting stay with the ledger.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::CIP25_METADATA_LABEL;
use crate::error::{KernelError, Result};
use crate::plutus::{self, PlutusData};
use crate::reward::{ensure_mint_eligible, Tier};
use crate::types::record::{Commitment, MeasurementRecord};
use crate::types::token::{asset_unit, OutRef, PolicyId, SelectedToken};

/// Redeemer attached to the mint: `Constr 0 [hash, dataQuality, tokenName]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintRedeemer {
    pub hash: Commitment,
    pub data_quality: i64,
    pub token_name: String,
}

impl MintRedeemer {
    pub fn to_data(&self) -> PlutusData {
        PlutusData::constr(
            0,
            vec![
                PlutusData::bytes(self.hash.as_bytes()),
                PlutusData::integer(self.data_quality),
                PlutusData::text(&self.token_name),
            ],
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintIntent {
    /// Parameters applied to the minting script, in order.
    pub script_params: Vec<String>,
    pub asset_name: String,
    pub asset_name_hex: String,
    pub quantity: u64,
    pub tier: Tier,
    pub data_hash: Commitment,
    pub data_quality: i64,
    pub image: String,
    pub redeemer: PlutusData,
    pub redeemer_cbor: String,
}

impl MintIntent {
    /// Fails with `MissingCommitment` for an unsealed record and with
    /// `InsufficientQuality` below the mint threshold.
    pub fn build(record: &MeasurementRecord, token_name: &str, image: &str) -> Result<Self> {
        let hash = *record.hash().ok_or(KernelError::MissingCommitment)?;
        let reward = ensure_mint_eligible(record.data_quality())?;

        let redeemer = MintRedeemer {
            hash,
            data_quality: record.data_quality(),
            token_name: token_name.to_string(),
        }
        .to_data();
        let redeemer_cbor = plutus::to_hex(&redeemer)?;

        Ok(Self {
            script_params: vec![hash.to_hex()],
            asset_name: token_name.to_string(),
            asset_name_hex: hex::encode(token_name.as_bytes()),
            quantity: reward.quantity,
            tier: reward.tier,
            data_hash: hash,
            data_quality: record.data_quality(),
            image: image.to_string(),
            redeemer,
            redeemer_cbor,
        })
    }

    pub fn unit(&self, policy_id: &PolicyId) -> String {
        asset_unit(policy_id, &self.asset_name)
    }

    pub fn metadata_label(&self) -> u64 {
        CIP25_METADATA_LABEL
    }

    /// CIP-25 v1 body for label 721, keyed by the resolved policy id.
    pub fn metadata(&self, policy_id: &PolicyId) -> Value {
        json!({
            policy_id.as_str(): {
                self.asset_name.as_str(): {
                    "name": self.asset_name,
                    "image": self.image,
                    "dataHash": self.data_hash.to_hex(),
                    "dataQuality": self.data_quality,
                    "tier": self.tier.label(),
                }
            }
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum TradeAction {
    Sell = 0,
    Cancel = 1,
    Buy = 2,
}

impl TradeAction {
    pub fn discriminant(&self) -> u8 {
        *self as u8
    }
}

/// Redeemer for the market script:
/// `Constr 0 [action, address, Maybe (Constr 0 [txHash, index])]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeRedeemer {
    action: TradeAction,
    address: String,
    out_ref: Option<OutRef>,
}

impl TradeRedeemer {
    /// Only a buy names the output being purchased.
    pub fn new(action: TradeAction, address: impl Into<String>, out_ref: Option<OutRef>) -> Result<Self> {
        match (action, &out_ref) {
            (TradeAction::Buy, None) => {
                return Err(KernelError::InvalidTrade("buy requires the output being purchased".into()))
            }
            (TradeAction::Sell | TradeAction::Cancel, Some(_)) => {
                return Err(KernelError::InvalidTrade(format!("{:?} does not take an output reference", action)))
            }
            _ => {}
        }
        if let Some(r) = &out_ref {
            if r.tx_hash.len() != 64 || hex::decode(&r.tx_hash).is_err() {
                return Err(KernelError::InvalidHex(format!("transaction hash {:?}", r.tx_hash)));
            }
        }
        Ok(Self { action, address: address.into(), out_ref })
    }

    pub fn action(&self) -> TradeAction {
        self.action
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn out_ref(&self) -> Option<&OutRef> {
        self.out_ref.as_ref()
    }

    pub fn to_data(&self) -> PlutusData {
        let out_ref = self.out_ref.as_ref().map(|r| {
            PlutusData::constr(
                0,
                vec![
                    PlutusData::Bytes { hex: r.tx_hash.to_ascii_lowercase() },
                    PlutusData::integer(r.index),
                ],
            )
        });
        PlutusData::constr(
            0,
            vec![
                PlutusData::integer(self.action.discriminant()),
                PlutusData::text(&self.address),
                PlutusData::maybe(out_ref),
            ],
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeIntent {
    pub action: TradeAction,
    pub token: SelectedToken,
    /// Where the token goes: the market script for a sell, the wallet otherwise.
    pub destination: String,
    pub redeemer: PlutusData,
    pub redeemer_cbor: String,
}

impl TradeIntent {
    pub fn build(
        action: TradeAction,
        token: SelectedToken,
        wallet_address: &str,
        destination: &str,
        out_ref: Option<OutRef>,
    ) -> Result<Self> {
        let redeemer = TradeRedeemer::new(action, wallet_address, out_ref)?.to_data();
        let redeemer_cbor = plutus::to_hex(&redeemer)?;
        Ok(Self {
            action,
            token,
            destination: destination.to_string(),
            redeemer,
            redeemer_cbor,
        })
    }
}
