use serde::{Deserialize, Serialize};
use sheria_client::domain::TransactionType;
use strum::{AsRefStr, Display, EnumString};

use crate::{
    choice, money::format_currency, BalancePurpose, Color, Document, Effect, Effects, FieldError,
    FieldOf, FieldValue, FormContext, FormHandler, Request, Response,
};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustTransaction {
    pub name: Option<String>,
    pub client: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<f64>,
    pub balance_before: Option<f64>,
    pub balance_after: Option<f64>,
    #[serde(default)]
    pub is_new: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum TrustTransactionField {
    Name,
    Client,
    TransactionType,
    Amount,
    BalanceBefore,
    BalanceAfter,
}

impl Document for TrustTransaction {
    type Field = TrustTransactionField;

    fn get(&self, field: TrustTransactionField) -> FieldValue {
        match field {
            TrustTransactionField::Name => self.name.clone().into(),
            TrustTransactionField::Client => self.client.clone().into(),
            TrustTransactionField::TransactionType => choice(self.transaction_type),
            TrustTransactionField::Amount => self.amount.into(),
            TrustTransactionField::BalanceBefore => self.balance_before.into(),
            TrustTransactionField::BalanceAfter => self.balance_after.into(),
        }
    }

    fn set(&mut self, field: TrustTransactionField, value: FieldValue) -> Result<(), FieldError> {
        match field {
            TrustTransactionField::Name => self.name = value.into_text(field)?,
            TrustTransactionField::Client => self.client = value.into_text(field)?,
            TrustTransactionField::TransactionType => {
                self.transaction_type = value.into_choice(field)?
            }
            TrustTransactionField::Amount => self.amount = value.into_number(field)?,
            TrustTransactionField::BalanceBefore => self.balance_before = value.into_number(field)?,
            TrustTransactionField::BalanceAfter => self.balance_after = value.into_number(field)?,
        }
        Ok(())
    }
}

pub struct TrustTransactionForm;

impl FormHandler for TrustTransactionForm {
    type Doc = TrustTransaction;

    fn on_load(&self, doc: &TrustTransaction, _ctx: &FormContext) -> Effects<TrustTransaction> {
        match &doc.client {
            Some(client) if !doc.is_new => vec![Effect::Request(Request::TrustBalance {
                client: client.clone(),
                purpose: BalancePurpose::Indicator,
            })],
            _ => Vec::new(),
        }
    }

    fn on_field_change(
        &self,
        doc: &TrustTransaction,
        field: FieldOf<TrustTransaction>,
        _value: &FieldValue,
        _ctx: &FormContext,
    ) -> Effects<TrustTransaction> {
        match (field, &doc.client, doc.transaction_type) {
            (TrustTransactionField::TransactionType, Some(client), Some(_)) => {
                vec![Effect::Request(Request::TrustBalance {
                    client: client.clone(),
                    purpose: BalancePurpose::BalanceBefore,
                })]
            }
            _ => Vec::new(),
        }
    }

    /// Advisory only; the server checks the balance again when it posts the
    /// transaction.
    fn on_before_save(&self, doc: &TrustTransaction, ctx: &FormContext) -> Effects<TrustTransaction> {
        let Some(amount) = doc.amount else {
            return Vec::new();
        };

        if amount <= 0.0 {
            return vec![Effect::CancelSave(
                "Transaction amount must be greater than zero".to_string(),
            )];
        }

        match (doc.transaction_type, doc.balance_before) {
            (Some(kind), Some(available)) if kind.draws_down() && available < amount => {
                vec![Effect::CancelSave(format!(
                    "Insufficient trust account balance. Available: {}",
                    format_currency(available, &ctx.currency)
                ))]
            }
            _ => Vec::new(),
        }
    }

    fn on_response(
        &self,
        _doc: &TrustTransaction,
        response: Response,
        ctx: &FormContext,
    ) -> Effects<TrustTransaction> {
        match response {
            Response::TrustBalance {
                purpose: BalancePurpose::Indicator,
                balance,
            } => vec![Effect::Indicator {
                label: format!("Trust Balance: {}", format_currency(balance, &ctx.currency)),
                color: Color::Blue,
            }],
            Response::TrustBalance {
                purpose: BalancePurpose::BalanceBefore,
                balance,
            } => vec![Effect::set(TrustTransactionField::BalanceBefore, balance)],
            _ => Vec::new(),
        }
    }
}
