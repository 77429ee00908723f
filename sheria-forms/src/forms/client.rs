use serde::{Deserialize, Serialize};
use sheria_client::domain::TransactionType;
use strum::{AsRefStr, Display, EnumString};

use crate::{
    money::format_currency, Action, Button, Color, Document, Effect, Effects, FieldError,
    FieldOf, FieldType, FieldValue, FormContext, FormHandler, Prompt, PromptField, PromptKind,
    PromptValues, Request, Response, StatementView,
};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: Option<String>,
    pub trust_balance: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ClientField {
    Name,
    TrustBalance,
}

impl Document for Client {
    type Field = ClientField;

    fn get(&self, field: ClientField) -> FieldValue {
        match field {
            ClientField::Name => self.name.clone().into(),
            ClientField::TrustBalance => self.trust_balance.into(),
        }
    }

    fn set(&mut self, field: ClientField, value: FieldValue) -> Result<(), FieldError> {
        match field {
            ClientField::Name => self.name = value.into_text(field)?,
            ClientField::TrustBalance => self.trust_balance = value.into_number(field)?,
        }
        Ok(())
    }
}

/// Trust account view and actions on the client form.
pub struct ClientForm;

impl ClientForm {
    fn transaction_prompt(kind: TransactionType) -> Prompt {
        Prompt {
            kind: PromptKind::TrustTransaction(kind),
            title: format!("Add Trust {}", kind),
            primary_label: "Submit".to_string(),
            fields: vec![
                PromptField::new("Amount", "amount", FieldType::Currency).required(),
                PromptField::new("Description", "description", FieldType::Text).required(),
                PromptField::new("Reference", "reference", FieldType::Data),
            ],
        }
    }

    fn transaction_request(
        client: &str,
        kind: TransactionType,
        values: &PromptValues,
    ) -> Result<Request, FieldError> {
        let value = |name: &str| values.get(name).cloned().unwrap_or_default();

        Ok(Request::CreateTrustTransaction {
            client: client.to_string(),
            transaction_type: kind,
            amount: value("amount").into_number("amount")?.unwrap_or_default(),
            description: value("description")
                .into_text("description")?
                .unwrap_or_default(),
            reference: value("reference").into_text("reference")?,
        })
    }
}

impl FormHandler for ClientForm {
    type Doc = Client;

    fn on_load(&self, doc: &Client, ctx: &FormContext) -> Effects<Client> {
        let Some(balance) = doc.trust_balance else {
            return Vec::new();
        };

        vec![
            Effect::Indicator {
                label: format!(
                    "Trust Account Balance: {}",
                    format_currency(balance, &ctx.currency)
                ),
                color: Color::Green,
            },
            Effect::AddMenuItem(Button::new(Action::ViewTrustStatement)),
            Effect::AddMenuItem(Button::new(Action::AddTrustDeposit)),
            Effect::AddMenuItem(Button::new(Action::AddTrustWithdrawal)),
        ]
    }

    fn on_field_change(
        &self,
        _doc: &Client,
        _field: FieldOf<Client>,
        _value: &FieldValue,
        _ctx: &FormContext,
    ) -> Effects<Client> {
        Vec::new()
    }

    fn on_action(&self, doc: &Client, action: Action, _ctx: &FormContext) -> Effects<Client> {
        let Some(client) = &doc.name else {
            return Vec::new();
        };

        match action {
            Action::ViewTrustStatement => vec![Effect::Request(Request::TrustStatement {
                client: client.clone(),
            })],
            Action::AddTrustDeposit => {
                vec![Effect::Prompt(Self::transaction_prompt(TransactionType::Deposit))]
            }
            Action::AddTrustWithdrawal => {
                vec![Effect::Prompt(Self::transaction_prompt(TransactionType::Withdrawal))]
            }
            _ => Vec::new(),
        }
    }

    fn on_prompt(
        &self,
        doc: &Client,
        kind: PromptKind,
        values: &PromptValues,
        _ctx: &FormContext,
    ) -> Effects<Client> {
        let (PromptKind::TrustTransaction(kind), Some(client)) = (kind, &doc.name) else {
            return Vec::new();
        };

        match Self::transaction_request(client, kind, values) {
            Ok(request) => vec![Effect::Request(request)],
            Err(err) => vec![Effect::message(err.to_string())],
        }
    }

    fn on_response(&self, _doc: &Client, response: Response, ctx: &FormContext) -> Effects<Client> {
        match response {
            Response::TrustStatement(lines) => {
                vec![Effect::ShowStatement(StatementView::new(&lines, &ctx.currency))]
            }
            Response::TrustTransactionCreated {
                transaction_type, ..
            } => vec![
                Effect::message(format!("Trust {} added successfully", transaction_type)),
                Effect::CloseDialog,
                Effect::Reload,
            ],
            _ => Vec::new(),
        }
    }
}
