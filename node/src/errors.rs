// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use nrt_kernel::error::KernelError;

use crate::ledger::LedgerError;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("No measurement has been generated yet")]
    NoRecord,
    #[error("No token selected")]
    NoTokenSelected,
    #[error("Token not held by the wallet: {0}")]
    UnknownToken(String),
    #[error("{0}")]
    Kernel(#[from] KernelError),
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// The three failure families a dashboard action can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Precondition,
    External,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Precondition => "precondition",
            ErrorKind::External => "external",
            ErrorKind::Internal => "internal",
        }
    }
}

impl NodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NodeError::NoRecord
            | NodeError::NoTokenSelected
            | NodeError::UnknownToken(_)
            | NodeError::InvalidInput(_) => ErrorKind::Precondition,
            NodeError::Kernel(KernelError::Encoding(_)) => ErrorKind::Internal,
            NodeError::Kernel(_) => ErrorKind::Precondition,
            NodeError::Ledger(_) => ErrorKind::External,
            NodeError::Internal(_) => ErrorKind::Internal,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            NodeError::NoRecord | NodeError::NoTokenSelected => StatusCode::CONFLICT,
            NodeError::UnknownToken(_) => StatusCode::NOT_FOUND,
            NodeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            NodeError::Kernel(k_err) => match k_err {
                KernelError::InsufficientQuality { .. } | KernelError::MissingCommitment => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                KernelError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            NodeError::Ledger(_) => StatusCode::BAD_GATEWAY,
            NodeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for NodeError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind().as_str(),
        }));

        (status, body).into_response()
    }
}

pub type NodeResult<T> = Result<T, NodeError>;
