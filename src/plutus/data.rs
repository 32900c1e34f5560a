// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::Serialize;

/// Untyped Plutus data tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum PlutusData {
    Constr { alternative: u64, fields: Vec<PlutusData> },
    Map { entries: Vec<(PlutusData, PlutusData)> },
    List { items: Vec<PlutusData> },
    Integer { value: i128 },
    Bytes { hex: String },
}

impl PlutusData {
    pub fn constr(alternative: u64, fields: Vec<PlutusData>) -> Self {
        PlutusData::Constr { alternative, fields }
    }

    pub fn integer(value: impl Into<i128>) -> Self {
        PlutusData::Integer { value: value.into() }
    }

    pub fn bytes(raw: &[u8]) -> Self {
        PlutusData::Bytes { hex: hex::encode(raw) }
    }

    /// UTF-8 text as a byte string.
    pub fn text(s: &str) -> Self {
        PlutusData::bytes(s.as_bytes())
    }

    pub fn list(items: Vec<PlutusData>) -> Self {
        PlutusData::List { items }
    }

    /// `Constr 0 []`, the unit value.
    pub fn void() -> Self {
        PlutusData::constr(0, Vec::new())
    }

    /// `Just x` is `Constr 0 [x]`, `Nothing` is `Constr 1 []`.
    pub fn maybe(value: Option<PlutusData>) -> Self {
        match value {
            Some(v) => PlutusData::constr(0, vec![v]),
            None => PlutusData::constr(1, Vec::new()),
        }
    }
}
