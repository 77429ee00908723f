use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Payment,
    Adjustment,
}

impl TransactionType {
    /// Withdrawals and payments draw down the client's trust balance.
    pub fn draws_down(&self) -> bool {
        matches!(self, TransactionType::Withdrawal | TransactionType::Payment)
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrustBalance {
    #[serde(default)]
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustStatementRequest {
    pub client: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
}

impl TrustStatementRequest {
    pub fn new(client: impl Into<String>) -> Self {
        Self {
            client: client.into(),
            from_date: None,
            to_date: None,
        }
    }

    pub fn between(mut self, from_date: Option<NaiveDate>, to_date: Option<NaiveDate>) -> Self {
        self.from_date = from_date;
        self.to_date = to_date;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustStatementLine {
    pub transaction_date: NaiveDate,
    pub transaction_type: TransactionType,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub balance_after: Option<f64>,
    #[serde(default)]
    pub running_balance: Option<f64>,
}

impl TrustStatementLine {
    /// The running balance when the server computed one, otherwise the
    /// balance recorded on the transaction itself.
    pub fn balance(&self) -> Option<f64> {
        self.running_balance.or(self.balance_after)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustTransactionRequest {
    pub client: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustTransactionCreated {
    pub transaction_id: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn statement_line_prefers_running_balance() {
        let line: TrustStatementLine = serde_json::from_value(json!({
            "transaction_date": "2024-03-01",
            "transaction_type": "Withdrawal",
            "amount": 250.0,
            "description": "Court filing fee",
            "balance_after": 900.0,
            "running_balance": 750.0
        }))
        .unwrap();

        assert_eq!(line.transaction_type, TransactionType::Withdrawal);
        assert_eq!(line.balance(), Some(750.0));
    }

    #[test]
    fn statement_line_falls_back_to_balance_after() {
        let line: TrustStatementLine = serde_json::from_value(json!({
            "transaction_date": "2024-03-01",
            "transaction_type": "Deposit",
            "amount": 1000,
            "balance_after": 1000
        }))
        .unwrap();

        assert_eq!(line.balance(), Some(1000.0));
        assert_eq!(line.description, None);
    }

    #[test]
    fn only_withdrawals_and_payments_draw_down() {
        assert!(TransactionType::Withdrawal.draws_down());
        assert!(TransactionType::Payment.draws_down());
        assert!(!TransactionType::Deposit.draws_down());
        assert!(!TransactionType::Adjustment.draws_down());
    }
}
