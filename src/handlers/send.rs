use actix_web::{HttpResponse, post, web};
use algonaut::core::Address;
use algonaut::transaction::account::Account;
use serde::{Deserialize, Serialize};

use crate::chain::algos_to_micro;
use crate::handlers::ErrorBody;
use crate::schema::Submission;
use crate::state::AppState;

/// Algorand mnemonics are always 25 words.
const MNEMONIC_WORDS: usize = 25;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    #[serde(default)]
    pub mnemonic: Option<String>,
    #[serde(default)]
    pub recipient_address: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub success: bool,
    pub message: String,
    pub tx_id: String,
    pub from: String,
    pub to: String,
    pub amount: f64,
}

fn mnemonic_has_valid_format(mnemonic: &str) -> bool {
    mnemonic.split_whitespace().count() == MNEMONIC_WORDS
}

#[post("/send")]
pub async fn send_payment(
    body: web::Json<SendRequest>,
    app_state: web::Data<AppState>,
) -> HttpResponse {
    let body = body.into_inner();

    let (mnemonic, recipient, amount) =
        match (&body.mnemonic, &body.recipient_address, body.amount) {
            (Some(mnemonic), Some(recipient), Some(amount))
                if !mnemonic.trim().is_empty() && !recipient.trim().is_empty() && amount > 0.0 =>
            {
                (mnemonic, recipient.clone(), amount)
            }
            _ => {
                return HttpResponse::BadRequest().json(ErrorBody::new("Missing required fields"));
            }
        };

    if !mnemonic_has_valid_format(mnemonic) {
        return HttpResponse::BadRequest().json(ErrorBody::new(
            "Invalid mnemonic: must contain exactly 25 words",
        ));
    }

    let sender = match Account::from_mnemonic(mnemonic.trim()) {
        Ok(account) => account,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(ErrorBody::with_details("Invalid mnemonic phrase", e));
        }
    };

    let receiver = match recipient.parse::<Address>() {
        Ok(address) => address,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(ErrorBody::with_details("Invalid recipient address", e));
        }
    };

    let note = body.note.as_ref().filter(|note| !note.is_empty()).cloned();
    let note_bytes = note.as_ref().map(|note| note.clone().into_bytes());

    let receipt = match app_state
        .node
        .submit_payment(&sender, receiver, algos_to_micro(amount), note_bytes)
        .await
    {
        Ok(receipt) => receipt,
        Err(e) => {
            log::error!("Send transaction error: {:#}", e);
            return HttpResponse::InternalServerError().json(ErrorBody::with_details(
                "Failed to send transaction",
                format!("{:#}", e),
            ));
        }
    };

    let submission = Submission::new(
        receipt.tx_id.clone(),
        receipt.sender.clone(),
        recipient,
        amount,
        note,
    );

    if let Err(e) = app_state.store.save(&submission).await {
        log::error!("Send transaction error: {:#}", e);
        return HttpResponse::InternalServerError().json(ErrorBody::with_details(
            "Failed to send transaction",
            format!("{:#}", e),
        ));
    }

    HttpResponse::Ok().json(SendResponse {
        success: true,
        message: "Transaction sent successfully!".to_string(),
        tx_id: submission.tx_id,
        from: submission.sender,
        to: submission.receiver,
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_25_words() {
        let mnemonic = ["word"; 25].join(" ");
        assert!(mnemonic_has_valid_format(&mnemonic));
    }

    #[test]
    fn rejects_other_word_counts() {
        assert!(!mnemonic_has_valid_format(&["word"; 24].join(" ")));
        assert!(!mnemonic_has_valid_format(&["word"; 26].join(" ")));
        assert!(!mnemonic_has_valid_format(""));
    }

    #[test]
    fn word_count_ignores_extra_whitespace() {
        let mnemonic = format!("  {}  ", ["word"; 25].join("   "));
        assert!(mnemonic_has_valid_format(&mnemonic));
    }
}
