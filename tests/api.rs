use std::sync::{Arc, Mutex};

use actix_web::{App, test, web};
use algonaut::core::{Address, MicroAlgos};
use algonaut::transaction::account::Account;
use async_trait::async_trait;
use chrono::Duration;
use serde_json::{Value, json};

use algo_relay::chain::{BroadcastReceipt, PaymentNode, PendingInfo};
use algo_relay::db::SubmissionStore;
use algo_relay::handlers;
use algo_relay::schema::{Submission, SubmissionStatus};
use algo_relay::state::AppState;

/// Node fake: hands out a fixed transaction id and remembers the
/// micro-unit amounts it was asked to broadcast.
struct FakeNode {
    tx_id: String,
    pending: Mutex<PendingInfo>,
    submitted: Mutex<Vec<u64>>,
}

impl FakeNode {
    fn new(tx_id: &str) -> Arc<Self> {
        Arc::new(FakeNode {
            tx_id: tx_id.to_string(),
            pending: Mutex::new(PendingInfo::default()),
            submitted: Mutex::new(Vec::new()),
        })
    }

    fn set_pending(&self, info: PendingInfo) {
        *self.pending.lock().unwrap() = info;
    }
}

#[async_trait]
impl PaymentNode for FakeNode {
    async fn submit_payment(
        &self,
        sender: &Account,
        _receiver: Address,
        amount: MicroAlgos,
        _note: Option<Vec<u8>>,
    ) -> anyhow::Result<BroadcastReceipt> {
        self.submitted.lock().unwrap().push(amount.0);
        Ok(BroadcastReceipt {
            tx_id: self.tx_id.clone(),
            sender: sender.address().to_string(),
        })
    }

    async fn query_status(&self, _tx_id: &str) -> anyhow::Result<PendingInfo> {
        Ok(self.pending.lock().unwrap().clone())
    }
}

#[derive(Default)]
struct MemoryStore {
    records: Mutex<Vec<Submission>>,
}

impl MemoryStore {
    fn new() -> Arc<Self> {
        Arc::new(MemoryStore::default())
    }

    fn records(&self) -> Vec<Submission> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn save(&self, submission: &Submission) -> anyhow::Result<()> {
        self.records.lock().unwrap().push(submission.clone());
        Ok(())
    }

    async fn mark_confirmed(&self, tx_id: &str, confirmed_round: i64) -> anyhow::Result<()> {
        for record in self.records.lock().unwrap().iter_mut() {
            if record.tx_id == tx_id {
                record.status = SubmissionStatus::Confirmed;
                record.confirmed_round = Some(confirmed_round);
            }
        }
        Ok(())
    }

    async fn recent(&self, limit: i64) -> anyhow::Result<Vec<Submission>> {
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit as usize);
        Ok(records)
    }
}

macro_rules! init_app {
    ($node:expr, $store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new($node.clone(), $store.clone())))
                .service(
                    web::scope("/api/algorand")
                        .service(handlers::send_payment)
                        .service(handlers::get_status)
                        .service(handlers::list_transactions),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn send_rejects_missing_fields() {
    let node = FakeNode::new("TX1");
    let store = MemoryStore::new();
    let app = init_app!(node, store);

    let req = test::TestRequest::post()
        .uri("/api/algorand/send")
        .set_json(json!({ "recipientAddress": "SOMEADDRESS", "amount": 1.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
    assert!(store.records().is_empty());
}

#[actix_web::test]
async fn send_rejects_wrong_mnemonic_word_count() {
    let node = FakeNode::new("TX1");
    let store = MemoryStore::new();
    let app = init_app!(node, store);

    let short_mnemonic = ["word"; 24].join(" ");
    let req = test::TestRequest::post()
        .uri("/api/algorand/send")
        .set_json(json!({
            "mnemonic": short_mnemonic,
            "recipientAddress": "SOMEADDRESS",
            "amount": 1.0,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("25 words"));
}

#[actix_web::test]
async fn send_rejects_garbage_25_word_mnemonic() {
    let node = FakeNode::new("TX1");
    let store = MemoryStore::new();
    let app = init_app!(node, store);

    let garbage_mnemonic = ["zzzz"; 25].join(" ");
    let recipient = Account::generate().address().to_string();
    let req = test::TestRequest::post()
        .uri("/api/algorand/send")
        .set_json(json!({
            "mnemonic": garbage_mnemonic,
            "recipientAddress": recipient,
            "amount": 1.0,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Invalid mnemonic phrase"));
    assert!(store.records().is_empty());
}

#[actix_web::test]
async fn send_broadcasts_and_records_once() {
    let node = FakeNode::new("BROADCAST1");
    let store = MemoryStore::new();
    let app = init_app!(node, store);

    let sender = Account::generate();
    let recipient = Account::generate().address().to_string();

    let req = test::TestRequest::post()
        .uri("/api/algorand/send")
        .set_json(json!({
            "mnemonic": sender.mnemonic(),
            "recipientAddress": recipient,
            "amount": 1.5,
            "note": "coffee",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["txId"], json!("BROADCAST1"));
    assert_eq!(body["from"], json!(sender.address().to_string()));
    assert_eq!(body["to"], json!(recipient));
    assert_eq!(body["amount"], json!(1.5));

    // stored amount stays in ALGO, the node sees micro-units
    assert_eq!(*node.submitted.lock().unwrap(), vec![1_500_000]);
    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].tx_id, "BROADCAST1");
    assert_eq!(records[0].amount, 1.5);
    assert_eq!(records[0].note.as_deref(), Some("coffee"));
    assert_eq!(records[0].status, SubmissionStatus::Pending);
}

#[actix_web::test]
async fn status_confirms_record_and_is_idempotent() {
    let node = FakeNode::new("CONF1");
    let store = MemoryStore::new();
    store
        .save(&Submission::new(
            "CONF1".to_string(),
            "SENDER".to_string(),
            "RECEIVER".to_string(),
            0.25,
            None,
        ))
        .await
        .unwrap();
    node.set_pending(PendingInfo {
        confirmed_round: Some(4242),
        pool_error: None,
    });
    let app = init_app!(node, store);

    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri("/api/algorand/status/CONF1")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["txId"], json!("CONF1"));
        assert_eq!(body["status"], json!("confirmed"));
        assert_eq!(body["confirmedRound"], json!(4242));
        assert!(body["poolError"].is_null());

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, SubmissionStatus::Confirmed);
        assert_eq!(records[0].confirmed_round, Some(4242));
    }
}

#[actix_web::test]
async fn status_leaves_pending_record_untouched() {
    let node = FakeNode::new("PEND1");
    let store = MemoryStore::new();
    store
        .save(&Submission::new(
            "PEND1".to_string(),
            "SENDER".to_string(),
            "RECEIVER".to_string(),
            0.25,
            None,
        ))
        .await
        .unwrap();
    let app = init_app!(node, store);

    let req = test::TestRequest::get()
        .uri("/api/algorand/status/PEND1")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], json!("pending"));
    assert!(body["confirmedRound"].is_null());

    let records = store.records();
    assert_eq!(records[0].status, SubmissionStatus::Pending);
    assert_eq!(records[0].confirmed_round, None);
}

#[actix_web::test]
async fn transactions_lists_newest_first() {
    let node = FakeNode::new("TX1");
    let store = MemoryStore::new();
    let base = chrono::Utc::now().naive_utc();
    for i in 0..3 {
        let mut submission = Submission::new(
            format!("LIST{}", i),
            "SENDER".to_string(),
            "RECEIVER".to_string(),
            1.0,
            None,
        );
        submission.created_at = base + Duration::seconds(i);
        store.save(&submission).await.unwrap();
    }
    let app = init_app!(node, store);

    let req = test::TestRequest::get()
        .uri("/api/algorand/transactions")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["count"], json!(3));
    assert_eq!(body["transactions"][0]["txId"], json!("LIST2"));
    assert_eq!(body["transactions"][2]["txId"], json!("LIST0"));
}
