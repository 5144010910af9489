use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A submission starts out `Pending` and is flipped to `Confirmed` exactly
/// once, when the node reports a confirmation round for its transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Confirmed,
}

/// Local record of a payment broadcast to the network. `tx_id` is assigned
/// by the node at broadcast time and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub tx_id: String,
    #[serde(rename = "from")]
    pub sender: String,
    #[serde(rename = "to")]
    pub receiver: String,
    /// Amount in ALGO, exactly as submitted. The micro-unit conversion
    /// happens only on the on-chain call.
    pub amount: f64,
    pub note: Option<String>,
    pub status: SubmissionStatus,
    pub created_at: NaiveDateTime,
    pub confirmed_round: Option<i64>,
}

impl Submission {
    pub fn new(
        tx_id: String,
        sender: String,
        receiver: String,
        amount: f64,
        note: Option<String>,
    ) -> Self {
        Submission {
            tx_id,
            sender,
            receiver,
            amount,
            note,
            status: SubmissionStatus::Pending,
            created_at: chrono::Utc::now().naive_utc(),
            confirmed_round: None,
        }
    }
}
