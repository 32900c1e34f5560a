// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod commit;
pub mod generate;
pub mod redeemer;
pub mod reward;
pub mod tiers;
pub mod verify;
