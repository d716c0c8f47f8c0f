#![allow(dead_code)]

use rand::Rng;
use wallet::domain::account::{Account, Money};
use wallet::domain::favorite::Favorite;
use wallet::domain::payment::{Payment, PaymentStatus};

pub fn random_payments(count: usize, accounts: i64) -> Vec<Payment> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let mut payment = Payment::new(
                format!("pay-{i}"),
                rng.gen_range(1..=accounts),
                Money::new(rng.gen_range(1..=100_000)),
                "auto",
            );
            payment.status = match rng.gen_range(0..3) {
                0 => PaymentStatus::InProgress,
                1 => PaymentStatus::Ok,
                _ => PaymentStatus::Fail,
            };
            payment
        })
        .collect()
}

pub fn sample_accounts() -> Vec<Account> {
    vec![
        Account {
            id: 1,
            phone: "+992000000001".to_string(),
            balance: Money::new(1_000),
        },
        Account {
            id: 2,
            phone: "+992000000002".to_string(),
            balance: Money::new(0),
        },
    ]
}

pub fn sample_payments() -> Vec<Payment> {
    let mut ok = Payment::new("p-1", 1, Money::new(3_000), "auto");
    ok.status = PaymentStatus::Ok;
    let pending = Payment::new("p-2", 2, Money::new(1_000), "food");
    vec![ok, pending]
}

pub fn sample_favorites() -> Vec<Favorite> {
    let payments = sample_payments();
    vec![Favorite::from_payment("f-1", "groceries", &payments[1])]
}

/// Sorts by id so collections can be compared as multisets.
pub fn by_id(mut payments: Vec<Payment>) -> Vec<Payment> {
    payments.sort_by(|a, b| a.id.cmp(&b.id));
    payments
}
