use actix_web::{HttpResponse, get, web};
use serde::Serialize;

use crate::handlers::ErrorBody;
use crate::schema::SubmissionStatus;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub success: bool,
    pub tx_id: String,
    pub status: SubmissionStatus,
    pub confirmed_round: Option<i64>,
    pub pool_error: Option<String>,
}

#[get("/status/{tx_id}")]
pub async fn get_status(path: web::Path<String>, app_state: web::Data<AppState>) -> HttpResponse {
    let tx_id = path.into_inner();

    let info = match app_state.node.query_status(&tx_id).await {
        Ok(info) => info,
        Err(e) => {
            log::error!("Status check error: {:#}", e);
            return HttpResponse::InternalServerError().json(ErrorBody::with_details(
                "Failed to check transaction status",
                format!("{:#}", e),
            ));
        }
    };

    let mut status = SubmissionStatus::Pending;
    let mut confirmed_round = None;

    // algod reports round 0 while the transaction is still in the pool
    if let Some(round) = info.confirmed_round.filter(|round| *round > 0) {
        status = SubmissionStatus::Confirmed;
        confirmed_round = Some(round as i64);

        if let Err(e) = app_state.store.mark_confirmed(&tx_id, round as i64).await {
            log::error!("Status check error: {:#}", e);
            return HttpResponse::InternalServerError().json(ErrorBody::with_details(
                "Failed to check transaction status",
                format!("{:#}", e),
            ));
        }
    }

    HttpResponse::Ok().json(StatusResponse {
        success: true,
        tx_id,
        status,
        confirmed_round,
        pool_error: info.pool_error,
    })
}
