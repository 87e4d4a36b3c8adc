//! `eth_call` / `eth_sendTransaction` request bodies and transaction receipts.

use alloy_primitives::{Address, Bytes, B256, U64};
use serde::{Deserialize, Serialize};

/// Read-only contract call, first parameter of `eth_call`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    pub data: Bytes,
}

/// State-changing call, sole parameter of `eth_sendTransaction`.
///
/// Gas, fees and nonce are left to the wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
}

/// Subset of the `eth_getTransactionReceipt` result the front-end reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<U64>,
    /// `0x1` on success, `0x0` on failure. Absent on pre-Byzantium chains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<U64>,
}

impl TransactionReceipt {
    /// Pre-Byzantium receipts carry no status and are treated as successful.
    pub fn is_success(&self) -> bool {
        self.status.map_or(true, |status| status == U64::from(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_request_wire_shape() {
        let tx = TransactionRequest {
            from: Address::repeat_byte(0x11),
            to: Address::repeat_byte(0x22),
            data: Bytes::from_static(&[0xab]),
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["from"], "0x1111111111111111111111111111111111111111");
        assert_eq!(value["to"], "0x2222222222222222222222222222222222222222");
        assert_eq!(value["data"], "0xab");
    }

    #[test]
    fn test_call_request_omits_from() {
        let call = CallRequest {
            from: None,
            to: Address::ZERO,
            data: Bytes::new(),
        };
        let value = serde_json::to_value(&call).unwrap();
        assert!(value.get("from").is_none());
    }

    #[test]
    fn test_receipt_status() {
        let receipt: TransactionReceipt = serde_json::from_value(json!({
            "transactionHash": format!("0x{}", "ab".repeat(32)),
            "blockNumber": "0x2",
            "status": "0x0",
            "gasUsed": "0x5208",
        }))
        .unwrap();
        assert!(!receipt.is_success());
        assert_eq!(receipt.block_number, Some(U64::from(2)));
    }
}
