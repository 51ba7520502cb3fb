//! JWT-authenticated Engine API client.
//!
//! Every call is retried independently (5 attempts, 0.5s base, capped at 4s);
//! any payload status other than `VALID` (`INVALID`, `SYNCING`, `ACCEPTED`) is
//! surfaced to the caller rather than retried, since retrying will not change
//! a semantic rejection or resolve sync on its own.

use std::time::Duration;

use alloy_provider::{Provider, RootProvider, ext::engine::EngineApi};
use alloy_rpc_client::ClientBuilder;
use alloy_rpc_types_engine::{
    ExecutionPayloadEnvelopeV3, ExecutionPayloadV3, ForkchoiceState, ForkchoiceUpdated, PayloadId,
    PayloadStatus, PayloadStatusEnum,
};
use alloy_transport_http::AuthLayer;
use backon::{ExponentialBuilder, Retryable};
use op_alloy_rpc_types_engine::OpPayloadAttributes;
use url::Url;

use crate::{EngineError, jwt};

/// A client for the authenticated Engine API (`engine_*` JSON-RPC methods).
#[derive(Debug, Clone)]
pub struct EngineClient {
    provider: RootProvider,
}

impl EngineClient {
    /// Builds a client against `url`, authenticating with the JWT secret
    /// `jwt_secret_hex` (64 hex characters, optionally `0x`-prefixed).
    pub fn new(url: Url, jwt_secret_hex: &str) -> Result<Self, EngineError> {
        let secret = jwt::parse_secret(jwt_secret_hex)?;
        let client = ClientBuilder::default().layer(AuthLayer::new(secret)).http(url);
        let provider = RootProvider::new(client);
        Ok(Self { provider })
    }

    fn backoff() -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(500))
            .with_max_delay(Duration::from_secs(4))
            .with_max_times(5)
            .with_jitter()
    }

    /// `engine_forkchoiceUpdatedV3`.
    pub async fn fork_choice_updated_v3(
        &self,
        state: ForkchoiceState,
        attributes: Option<OpPayloadAttributes>,
    ) -> Result<ForkchoiceUpdated, EngineError> {
        let response = (|| async {
            self.provider.fork_choice_updated_v3(state, attributes.clone()).await
        })
        .retry(Self::backoff())
        .await
        .map_err(|e| EngineError::Rpc(e.to_string()))?;

        ensure_valid(&response.payload_status)?;
        Ok(response)
    }

    /// `engine_getPayloadV3`.
    pub async fn get_payload_v3(
        &self,
        payload_id: PayloadId,
    ) -> Result<ExecutionPayloadV3, EngineError> {
        let envelope: ExecutionPayloadEnvelopeV3 = (|| async {
            self.provider.get_payload_v3(payload_id).await
        })
        .retry(Self::backoff())
        .await
        .map_err(|e| EngineError::Rpc(e.to_string()))?;

        Ok(envelope.execution_payload)
    }

    /// `engine_newPayloadV3`.
    pub async fn new_payload_v3(
        &self,
        payload: ExecutionPayloadV3,
        versioned_hashes: Vec<alloy_primitives::B256>,
        parent_beacon_block_root: alloy_primitives::B256,
    ) -> Result<PayloadStatus, EngineError> {
        let status = (|| async {
            self.provider
                .new_payload_v3(payload.clone(), versioned_hashes.clone(), parent_beacon_block_root)
                .await
        })
        .retry(Self::backoff())
        .await
        .map_err(|e| EngineError::Rpc(e.to_string()))?;

        ensure_valid(&status)?;
        Ok(status)
    }
}

fn ensure_valid(status: &PayloadStatus) -> Result<(), EngineError> {
    match &status.status {
        PayloadStatusEnum::Valid => Ok(()),
        PayloadStatusEnum::Invalid { validation_error } => {
            Err(EngineError::Invalid(validation_error.clone()))
        }
        PayloadStatusEnum::Syncing => {
            Err(EngineError::Invalid("execution client is syncing".to_owned()))
        }
        PayloadStatusEnum::Accepted => {
            Err(EngineError::Invalid("execution client accepted without validating".to_owned()))
        }
        other => Err(EngineError::Invalid(format!("unexpected payload status: {other:?}"))),
    }
}
