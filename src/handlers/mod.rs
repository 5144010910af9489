mod send;
mod status;
mod transactions;

use actix_web::{HttpResponse, Responder, get, http::header::ContentType};
use serde::Serialize;

pub use send::*;
pub use status::*;
pub use transactions::*;

/// Wire shape shared by every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: &str) -> Self {
        ErrorBody {
            error: error.to_string(),
            details: None,
        }
    }

    pub fn with_details(error: &str, details: impl ToString) -> Self {
        ErrorBody {
            error: error.to_string(),
            details: Some(details.to_string()),
        }
    }
}

/// The form/history page, inlined into the binary.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(include_str!("../../static/index.html"))
}
