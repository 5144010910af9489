use actix_web::{HttpResponse, get, web};
use serde::Serialize;

use crate::handlers::ErrorBody;
use crate::schema::Submission;
use crate::state::AppState;

/// History listing cap, newest first.
const RECENT_LIMIT: i64 = 50;

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub success: bool,
    pub count: usize,
    pub transactions: Vec<Submission>,
}

#[get("/transactions")]
pub async fn list_transactions(app_state: web::Data<AppState>) -> HttpResponse {
    let transactions = match app_state.store.recent(RECENT_LIMIT).await {
        Ok(transactions) => transactions,
        Err(e) => {
            log::error!("Fetch transactions error: {:#}", e);
            return HttpResponse::InternalServerError().json(ErrorBody::with_details(
                "Failed to fetch transactions",
                format!("{:#}", e),
            ));
        }
    };

    HttpResponse::Ok().json(TransactionsResponse {
        success: true,
        count: transactions.len(),
        transactions,
    })
}
