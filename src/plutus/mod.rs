// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Plutus data: the shape of redeemers handed to on-chain scripts.

pub mod data;
pub mod encode;

pub use data::PlutusData;
pub use encode::{encode, to_hex};
