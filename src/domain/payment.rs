use super::account::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum PaymentStatus {
    #[default]
    #[serde(rename = "INPROGRESS")]
    InProgress,
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "FAIL")]
    Fail,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Payment {
    pub id: String,
    pub account_id: i64,
    pub amount: Money,
    pub category: String,
    pub status: PaymentStatus,
}

impl Payment {
    /// Creates a payment in the `InProgress` state.
    pub fn new(
        id: impl Into<String>,
        account_id: i64,
        amount: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            account_id,
            amount,
            category: category.into(),
            status: PaymentStatus::InProgress,
        }
    }
}
