//! Receipt confirmation

use std::time::Duration;

use antenna_primitives::H256;
use antenna_types::Receipt;

use crate::api::ApiClient;
use crate::SdkError;

/// Sleep for `delay`, then look the receipt of `hash` up exactly once.
///
/// There is no retry: a receipt that is not available yet is reported as the
/// lookup error. A receipt with a non-success status becomes
/// [`SdkError::ExecutionFailed`] naming the hash.
pub async fn wait_for_receipt(
    api: &ApiClient,
    hash: H256,
    delay: Duration,
) -> Result<Receipt, SdkError> {
    tracing::debug!("Waiting {:?} for receipt of {}", delay, hash);
    tokio::time::sleep(delay).await;

    let receipt = api.get_receipt_by_action(&hash).await?;
    if !receipt.is_success() {
        tracing::warn!("Action {} failed with status {}", hash, receipt.status);
        return Err(SdkError::ExecutionFailed {
            hash,
            status: receipt.status,
        });
    }

    tracing::info!(
        "Action {} confirmed at height {}, gas={}",
        hash,
        receipt.block_height,
        receipt.gas_consumed
    );
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::methods;
    use crate::MockTransport;
    use serde_json::json;

    const HASH: &str = "6c84ac119058e859a015221f87a4e187c393d0c6ee283959342eac95fad08c33";

    fn receipt_with_status(status: u64) -> serde_json::Value {
        json!({ "receipt": { "status": status, "blkHeight": 3, "actHash": HASH, "gasConsumed": 7 } })
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_after_delay() {
        let transport = MockTransport::new();
        transport.set_response(methods::GET_RECEIPT_BY_ACTION, receipt_with_status(1));
        let api = ApiClient::new(transport.clone());

        let start = tokio::time::Instant::now();
        let hash = H256::from_hex(HASH).unwrap();
        let receipt = wait_for_receipt(&api, hash, Duration::from_secs(25))
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_secs(25));
        assert_eq!(receipt.block_height, 3);
        assert_eq!(transport.call_count(methods::GET_RECEIPT_BY_ACTION), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_status_names_hash() {
        let transport = MockTransport::new();
        transport.set_response(methods::GET_RECEIPT_BY_ACTION, receipt_with_status(106));
        let api = ApiClient::new(transport);

        let hash = H256::from_hex(HASH).unwrap();
        let err = wait_for_receipt(&api, hash, Duration::from_millis(10))
            .await
            .unwrap_err();

        assert!(matches!(err, SdkError::ExecutionFailed { status: 106, .. }));
        assert!(err.to_string().contains(HASH));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_error_is_not_retried() {
        let transport = MockTransport::new();
        transport.set_error(methods::GET_RECEIPT_BY_ACTION, -32000, "not found");
        let api = ApiClient::new(transport.clone());

        let result = wait_for_receipt(&api, H256::ZERO, Duration::from_millis(10)).await;
        assert!(matches!(result, Err(SdkError::Rpc { .. })));
        assert_eq!(transport.call_count(methods::GET_RECEIPT_BY_ACTION), 1);
    }
}
