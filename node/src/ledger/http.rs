// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use nrt_kernel::types::token::{OutRef, SelectedToken, TxId};

use super::{Ledger, LedgerError, LedgerResult, MintSubmission, ParameterizedScript, TradeSubmission};

/// JSON bridge to a wallet-SDK sidecar that owns the keys and builds transactions.
#[derive(Debug, Clone)]
pub struct HttpLedger {
    base_url: String,
    client: Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyParamsRequest<'a> {
    script_hex: &'a str,
    params: &'a [String],
}

#[derive(Deserialize)]
struct AddressResponse {
    address: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WalletAsset {
    tx_hash: String,
    output_index: u32,
    unit: String,
    quantity: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    tx_hash: String,
}

impl HttpLedger {
    pub fn new(url: String) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn check(resp: Response) -> LedgerResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        Err(LedgerError::Rejected { status: status.as_u16(), message })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> LedgerResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).send().await
            .map_err(|e| LedgerError::Network(e.to_string()))?;
        let resp = Self::check(resp).await?;
        resp.json().await.map_err(|e| LedgerError::Decode(e.to_string()))
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> LedgerResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.post(&url).json(body).send().await
            .map_err(|e| LedgerError::Network(e.to_string()))?;
        let resp = Self::check(resp).await?;
        resp.json().await.map_err(|e| LedgerError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Ledger for HttpLedger {
    async fn wallet_address(&self) -> LedgerResult<String> {
        let resp: AddressResponse = self.get_json("/v1/address").await?;
        Ok(resp.address)
    }

    async fn apply_params(&self, script_hex: &str, params: &[String]) -> LedgerResult<ParameterizedScript> {
        self.post_json("/v1/scripts/apply", &ApplyParamsRequest { script_hex, params }).await
    }

    async fn wallet_tokens(&self) -> LedgerResult<Vec<SelectedToken>> {
        let assets: Vec<WalletAsset> = self.get_json("/v1/wallet/tokens").await?;
        assets
            .into_iter()
            .map(|a| {
                SelectedToken::from_unit(OutRef::new(a.tx_hash, a.output_index), &a.unit, a.quantity)
                    .map_err(|e| LedgerError::Decode(e.to_string()))
            })
            .collect()
    }

    async fn submit_mint(&self, mint: &MintSubmission) -> LedgerResult<TxId> {
        let resp: SubmitResponse = self.post_json("/v1/tx/mint", mint).await?;
        Ok(TxId(resp.tx_hash))
    }

    async fn submit_trade(&self, trade: &TradeSubmission) -> LedgerResult<TxId> {
        let resp: SubmitResponse = self.post_json("/v1/tx/trade", trade).await?;
        Ok(TxId(resp.tx_hash))
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}
