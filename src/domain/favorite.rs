use super::account::Money;
use super::payment::Payment;
use serde::{Deserialize, Serialize};

/// A reusable payment template.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Favorite {
    pub id: String,
    pub account_id: i64,
    pub name: String,
    pub amount: Money,
    pub category: String,
}

impl Favorite {
    /// Captures the account, amount and category of `payment` under `name`.
    pub fn from_payment(id: impl Into<String>, name: impl Into<String>, payment: &Payment) -> Self {
        Self {
            id: id.into(),
            account_id: payment.account_id,
            name: name.into(),
            amount: payment.amount,
            category: payment.category.clone(),
        }
    }
}
