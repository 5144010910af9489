use algonaut::algod::v2::Algod;
use algonaut::core::{Address, MicroAlgos};
use algonaut::transaction::account::Account;
use algonaut::transaction::{Pay, TxnBuilder};
use anyhow::anyhow;
use async_trait::async_trait;

/// 1 ALGO = 1_000_000 microAlgos.
pub const MICRO_ALGOS_PER_ALGO: f64 = 1_000_000.0;

/// Convert an ALGO amount to the on-chain micro-unit, rounding down.
pub fn algos_to_micro(algos: f64) -> MicroAlgos {
    MicroAlgos((algos * MICRO_ALGOS_PER_ALGO).floor() as u64)
}

/// What the node hands back after accepting a broadcast.
#[derive(Debug, Clone)]
pub struct BroadcastReceipt {
    pub tx_id: String,
    pub sender: String,
}

/// Result of a pending-transaction lookup.
#[derive(Debug, Clone, Default)]
pub struct PendingInfo {
    pub confirmed_round: Option<u64>,
    pub pool_error: Option<String>,
}

/// Narrow node interface so tests can substitute an in-memory fake.
#[async_trait]
pub trait PaymentNode: Send + Sync {
    /// Build, sign and broadcast a payment transaction.
    async fn submit_payment(
        &self,
        sender: &Account,
        receiver: Address,
        amount: MicroAlgos,
        note: Option<Vec<u8>>,
    ) -> anyhow::Result<BroadcastReceipt>;

    /// Look up the confirmation state of a previously broadcast transaction.
    async fn query_status(&self, tx_id: &str) -> anyhow::Result<PendingInfo>;
}

/// `PaymentNode` backed by an algod v2 REST endpoint.
pub struct AlgodNode {
    algod: Algod,
}

impl AlgodNode {
    pub fn new(url: &str, token: &str) -> anyhow::Result<Self> {
        // Public AlgoNode endpoints take no API token
        let algod = if token.is_empty() {
            Algod::with_headers(url, vec![])
        } else {
            Algod::new(url, token)
        }
        .map_err(|e| anyhow!("Failed to create algod client: {}", e))?;

        Ok(Self { algod })
    }
}

#[async_trait]
impl PaymentNode for AlgodNode {
    async fn submit_payment(
        &self,
        sender: &Account,
        receiver: Address,
        amount: MicroAlgos,
        note: Option<Vec<u8>>,
    ) -> anyhow::Result<BroadcastReceipt> {
        let params = self
            .algod
            .suggested_transaction_params()
            .await
            .map_err(|e| anyhow!("Failed to get suggested transaction params: {}", e))?;

        let mut builder = TxnBuilder::with(
            &params,
            Pay::new(sender.address(), receiver, amount).build(),
        );
        if let Some(note) = note {
            builder = builder.note(note);
        }
        let txn = builder
            .build()
            .map_err(|e| anyhow!("Failed to build payment transaction: {}", e))?;

        let signed = sender
            .sign_transaction(txn)
            .map_err(|e| anyhow!("Failed to sign transaction: {}", e))?;

        let response = self
            .algod
            .broadcast_signed_transaction(&signed)
            .await
            .map_err(|e| anyhow!("Failed to broadcast transaction: {}", e))?;

        Ok(BroadcastReceipt {
            tx_id: response.tx_id,
            sender: sender.address().to_string(),
        })
    }

    async fn query_status(&self, tx_id: &str) -> anyhow::Result<PendingInfo> {
        let pending = self
            .algod
            .pending_transaction_with_id(tx_id)
            .await
            .map_err(|e| anyhow!("Failed to look up pending transaction {}: {}", tx_id, e))?;

        let pool_error = Some(pending.pool_error).filter(|err| !err.is_empty());

        Ok(PendingInfo {
            confirmed_round: pending.confirmed_round,
            pool_error,
        })
    }
}
