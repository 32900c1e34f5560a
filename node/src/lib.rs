// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod config;
pub mod errors;
pub mod api;
pub mod ledger;
pub mod session;
pub mod server;
pub mod telemetry;
