// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

/// Default inclusive noise-level range in dB.
pub const NOISE_LEVEL_MIN: i64 = 45;
pub const NOISE_LEVEL_MAX: i64 = 100;

/// Noise-level range used by the first dashboard revision.
pub const LEGACY_NOISE_LEVEL_MIN: i64 = 30;
pub const LEGACY_NOISE_LEVEL_MAX: i64 = 129;

/// Default inclusive data-quality range.
pub const DATA_QUALITY_MIN: i64 = 45;
pub const DATA_QUALITY_MAX: i64 = 100;

pub const LATITUDE_BOUND: f64 = 90.0;
pub const LONGITUDE_BOUND: f64 = 180.0;

/// Decimal places for each coordinate in `location`.
pub const COORDINATE_DECIMALS: usize = 4;

/// Byte length of a commitment digest (SHA-256).
pub const COMMITMENT_LEN: usize = 32;

/// Hex length of a policy id (28-byte script hash).
pub const POLICY_ID_HEX_LEN: usize = 56;

/// Asset name minted under the parameterized policy.
pub const DEFAULT_TOKEN_NAME: &str = "Noise Reduction Token";

/// Ledger limit on asset name length, in bytes.
pub const ASSET_NAME_MAX_LEN: usize = 32;

pub const DEFAULT_TOKEN_IMAGE: &str = "https://bit.ly/3Xjas9h";

/// Transaction metadata label for CIP-25 token metadata.
pub const CIP25_METADATA_LABEL: u64 = 721;

/// Compiled (double CBOR wrapped) noise reduction minting policy, PlutusV3.
/// Supplied as-is; parameterized with the commitment hash by the ledger.
pub const NOISE_REDUCTION_SCRIPT_HEX: &str = "588a0101002229800aba2aba1aab9faab9eaab9dab9a9bae003488888896600264653001300800198041804800cc0200092225980099b8748000c020dd500144cc896600266e1cdc68042408114a314a08048dd7180598049baa0025980099b8748000c020dd5001c56600260126ea800e29345900a4590074590070c020004c010dd5004452689b2b200401";

/// Maximum chunk size for CBOR byte strings inside Plutus data.
pub const PLUTUS_BYTES_CHUNK: usize = 64;
