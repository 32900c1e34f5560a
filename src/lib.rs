// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! nrt-kernel: deterministic core of the Noise Reduction Token toolkit.
//!
//! Sample generation, commitment hashing, reward mapping and the redeemer
//! encodings handed to the external wallet SDK. Nothing in this crate talks to
//! a network or a wallet.

pub mod config;
pub mod error;
pub mod types;
pub mod sampler;
pub mod commitment;
pub mod reward;
pub mod plutus;
pub mod intent;

#[cfg(test)]
pub mod tests;
