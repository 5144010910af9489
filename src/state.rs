use std::sync::Arc;

use crate::chain::PaymentNode;
use crate::db::SubmissionStore;

/// Shared handler state: the node client and the submission store, both
/// behind their narrow interfaces.
pub struct AppState {
    pub node: Arc<dyn PaymentNode>,
    pub store: Arc<dyn SubmissionStore>,
}

impl AppState {
    pub fn new(node: Arc<dyn PaymentNode>, store: Arc<dyn SubmissionStore>) -> Self {
        AppState { node, store }
    }
}
