// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod record;
pub mod range;
pub mod token;

pub use record::{Commitment, MeasurementRecord};
pub use range::{SampleRange, SamplerConfig};
pub use token::{OutRef, PolicyId, SelectedToken, TxId};
