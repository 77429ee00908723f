use std::collections::VecDeque;

use sheria_client::{
    domain::{GenerateInvoiceRequest, TrustStatementRequest, TrustTransactionRequest},
    CallError, HttpRpcClient, RpcClient, SheriaClient,
};

use crate::{
    Action, Alert, Document, Effect, Effects, FieldError, FieldOf, FieldValue, FormContext,
    FormHandler, Prompt, PromptValues, Request, Response,
};

/// Makes the server call behind a [`Request`].
pub async fn dispatch<R: RpcClient>(
    client: &SheriaClient<R>,
    request: &Request,
) -> Result<Response, CallError> {
    match request {
        Request::GenerateInvoice { time_entries } => {
            let summary = client
                .generate_invoice_from_time_entries(&GenerateInvoiceRequest::new(
                    time_entries.clone(),
                ))
                .await?;
            Ok(Response::Invoice(summary))
        }
        Request::SendHearingReminder { hearing_id } => {
            client.send_hearing_reminder(hearing_id).await?;
            Ok(Response::ReminderSent)
        }
        Request::TrustBalance { client: name, purpose } => {
            let balance = client.get_client_trust_balance(name).await?;
            Ok(Response::TrustBalance {
                purpose: *purpose,
                balance: balance.balance,
            })
        }
        Request::TrustStatement { client: name } => {
            let lines = client
                .get_client_trust_statement(&TrustStatementRequest::new(name.as_str()))
                .await?;
            Ok(Response::TrustStatement(lines))
        }
        Request::CreateTrustTransaction {
            client: name,
            transaction_type,
            amount,
            description,
            reference,
        } => {
            let created = client
                .create_trust_account_transaction(&TrustTransactionRequest {
                    client: name.clone(),
                    amount: *amount,
                    transaction_type: *transaction_type,
                    description: description.clone(),
                    reference: reference.clone(),
                })
                .await?;
            Ok(Response::TrustTransactionCreated {
                transaction_type: *transaction_type,
                created,
            })
        }
    }
}

/// One open document bound to its handler.
///
/// Each entry point runs the handler and then works through the effects it
/// returned: field writes land on the document without raising change events,
/// requests go to the server and their answers go back to the handler, and a
/// save first passes the handler's before-save checks. Whatever is left for
/// the user to see is returned in order.
pub struct FormSession<'a, H: FormHandler, R: RpcClient = HttpRpcClient> {
    handler: H,
    doc: H::Doc,
    ctx: FormContext,
    client: &'a SheriaClient<R>,
    prompt: Option<Prompt>,
}

impl<'a, H: FormHandler, R: RpcClient> FormSession<'a, H, R> {
    pub fn new(handler: H, doc: H::Doc, ctx: FormContext, client: &'a SheriaClient<R>) -> Self {
        Self {
            handler,
            doc,
            ctx,
            client,
            prompt: None,
        }
    }

    pub fn doc(&self) -> &H::Doc {
        &self.doc
    }

    /// The dialog waiting for input, if any.
    pub fn open_prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub async fn load(&mut self) -> Result<Effects<H::Doc>, FieldError> {
        let effects = self.handler.on_load(&self.doc, &self.ctx);
        self.run(effects).await
    }

    /// The user edited `field`.
    pub async fn change(
        &mut self,
        field: FieldOf<H::Doc>,
        value: impl Into<FieldValue>,
    ) -> Result<Effects<H::Doc>, FieldError> {
        let value = value.into();
        self.doc.set(field, value.clone())?;

        let effects = self
            .handler
            .on_field_change(&self.doc, field, &value, &self.ctx);
        self.run(effects).await
    }

    pub async fn save(&mut self) -> Result<Effects<H::Doc>, FieldError> {
        self.run(vec![Effect::Save]).await
    }

    pub async fn click(&mut self, action: Action) -> Result<Effects<H::Doc>, FieldError> {
        let effects = self.handler.on_action(&self.doc, action, &self.ctx);
        self.run(effects).await
    }

    /// Submits the open dialog. Required fields left empty keep it open.
    pub async fn submit_prompt(
        &mut self,
        values: PromptValues,
    ) -> Result<Effects<H::Doc>, FieldError> {
        let Some(prompt) = &self.prompt else {
            tracing::debug!("prompt submitted with no dialog open");
            return Ok(Vec::new());
        };

        let missing = prompt.missing_required(&values);
        if !missing.is_empty() {
            return Ok(vec![Effect::message(format!(
                "Missing required fields: {}",
                missing.join(", ")
            ))]);
        }

        let kind = prompt.kind;
        if kind.closes_on_submit() {
            self.prompt = None;
        }

        let effects = self.handler.on_prompt(&self.doc, kind, &values, &self.ctx);
        self.run(effects).await
    }

    async fn run(&mut self, effects: Effects<H::Doc>) -> Result<Effects<H::Doc>, FieldError> {
        let mut queue: VecDeque<_> = effects.into();
        let mut shown = Vec::new();

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::SetValue { field, value } => self.doc.set(field, value)?,
                Effect::Request(request) => match dispatch(self.client, &request).await {
                    Ok(response) => {
                        queue.extend(self.handler.on_response(&self.doc, response, &self.ctx))
                    }
                    Err(err) => {
                        tracing::warn!(?request, "request failed: {}", err);
                        shown.push(Effect::Alert(Alert::from_call_error(&err)));
                    }
                },
                Effect::Save => {
                    let checks = self.handler.on_before_save(&self.doc, &self.ctx);
                    let cancelled = checks.iter().any(|e| matches!(e, Effect::CancelSave(_)));
                    for check in checks.into_iter().rev() {
                        queue.push_front(check);
                    }
                    if !cancelled {
                        shown.push(Effect::Save);
                    }
                }
                Effect::Prompt(prompt) => {
                    self.prompt = Some(prompt.clone());
                    shown.push(Effect::Prompt(prompt));
                }
                Effect::CloseDialog => {
                    self.prompt = None;
                    shown.push(Effect::CloseDialog);
                }
                other => shown.push(other),
            }
        }

        Ok(shown)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use serde_json::json;
    use sheria_client::{domain::TransactionType, mock::MockRpcClient, Method};

    use super::*;
    use crate::{
        forms::{
            Client, ClientForm, Hearing, HearingField, HearingForm, HearingStatus, Task,
            TaskField, TaskForm, TimeEntry, TimeEntryField, TimeEntryForm, TrustTransaction,
            TrustTransactionField, TrustTransactionForm,
        },
        progress::TaskStatus,
        AlertKind, Color, NETWORK_ERROR,
    };

    fn ctx() -> FormContext {
        FormContext::new(
            NaiveDate::from_ymd_opt(2024, 6, 3)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        )
    }

    fn client(rpc: MockRpcClient) -> SheriaClient<MockRpcClient> {
        SheriaClient::with_rpc(rpc)
    }

    #[tokio::test]
    async fn field_writes_are_applied_without_cascading() {
        let client = client(MockRpcClient::new());
        let doc = TimeEntry {
            billing_rate: Some(50.0),
            billable: true,
            ..Default::default()
        };
        let mut session = FormSession::new(TimeEntryForm, doc, ctx(), &client);

        session
            .change(TimeEntryField::StartTime, NaiveTime::from_hms_opt(22, 0, 0))
            .await
            .unwrap();
        let shown = session
            .change(TimeEntryField::EndTime, "02:00")
            .await
            .unwrap();

        assert!(shown.is_empty());
        assert_eq!(session.doc().hours, Some(4.0));
        assert_eq!(session.doc().total_amount, 200.0);
    }

    #[tokio::test]
    async fn task_sync_settles_after_one_write() {
        let client = client(MockRpcClient::new());
        let doc = Task {
            status: Some(TaskStatus::Open),
            ..Default::default()
        };
        let mut session = FormSession::new(TaskForm, doc, ctx(), &client);

        session.change(TaskField::Progress, 100.0).await.unwrap();
        assert_eq!(session.doc().status, Some(TaskStatus::Completed));

        session.change(TaskField::Status, "Open").await.unwrap();
        assert_eq!(session.doc().progress, 0.0);
    }

    #[tokio::test]
    async fn balance_request_round_trips_to_indicator() {
        let rpc = MockRpcClient::new()
            .with_response(Method::GetClientTrustBalance, json!({ "balance": 1500.0 }));
        let client = client(rpc.clone());
        let doc = TrustTransaction {
            client: Some("CL-001".to_string()),
            ..Default::default()
        };
        let mut session = FormSession::new(TrustTransactionForm, doc, ctx(), &client);

        let shown = session.load().await.unwrap();

        assert_eq!(
            shown,
            vec![Effect::Indicator {
                label: "Trust Balance: KES 1,500.00".to_string(),
                color: Color::Blue,
            }]
        );
        assert_eq!(
            rpc.calls_to(Method::GetClientTrustBalance)[0]["client"],
            json!("CL-001")
        );
    }

    #[tokio::test]
    async fn balance_before_is_written_then_checked_on_save() {
        let rpc = MockRpcClient::new()
            .with_response(Method::GetClientTrustBalance, json!({ "balance": 300.0 }));
        let client = client(rpc);
        let doc = TrustTransaction {
            client: Some("CL-001".to_string()),
            amount: Some(500.0),
            is_new: true,
            ..Default::default()
        };
        let mut session = FormSession::new(TrustTransactionForm, doc, ctx(), &client);

        session
            .change(TrustTransactionField::TransactionType, "Payment")
            .await
            .unwrap();
        assert_eq!(session.doc().balance_before, Some(300.0));

        let shown = session.save().await.unwrap();
        assert_eq!(
            shown,
            vec![Effect::CancelSave(
                "Insufficient trust account balance. Available: KES 300.00".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn failed_request_alerts_and_keeps_state() {
        let rpc = MockRpcClient::new().with_failure(
            Method::GetClientTrustBalance,
            CallError::ResponseError("connection refused".to_string()),
        );
        let client = client(rpc);
        let doc = TrustTransaction {
            client: Some("CL-001".to_string()),
            transaction_type: Some(TransactionType::Withdrawal),
            balance_before: Some(10.0),
            ..Default::default()
        };
        let mut session = FormSession::new(TrustTransactionForm, doc, ctx(), &client);

        let shown = session
            .change(TrustTransactionField::TransactionType, "Withdrawal")
            .await
            .unwrap();

        let [Effect::Alert(alert)] = &shown[..] else {
            panic!("expected an alert, got {:?}", shown);
        };
        assert_eq!(alert.kind, AlertKind::Error);
        assert_eq!(alert.message, NETWORK_ERROR);
        assert_eq!(session.doc().balance_before, Some(10.0));
    }

    #[tokio::test]
    async fn hearing_outcome_prompt_flow() {
        let client = client(MockRpcClient::new());
        let doc = Hearing {
            name: Some("HRG-0001".to_string()),
            status: Some(HearingStatus::Scheduled),
            ..Default::default()
        };
        let mut session = FormSession::new(HearingForm, doc, ctx(), &client);

        session.click(Action::MarkCompleted).await.unwrap();
        assert_eq!(session.doc().status, Some(HearingStatus::Completed));
        assert!(session.open_prompt().is_some());

        let shown = session.submit_prompt(PromptValues::new()).await.unwrap();
        assert_eq!(
            shown,
            vec![Effect::message("Missing required fields: Outcome")]
        );
        assert!(session.open_prompt().is_some());

        let mut values = PromptValues::new();
        values.insert("outcome".to_string(), "Settled".into());
        let shown = session.submit_prompt(values).await.unwrap();

        assert_eq!(shown, vec![Effect::Save]);
        assert!(session.open_prompt().is_none());
        assert_eq!(
            session.doc().get(HearingField::Outcome),
            FieldValue::from("Settled")
        );
    }

    #[tokio::test]
    async fn trust_deposit_dialog_closes_after_server_confirms() {
        let rpc = MockRpcClient::new().with_response(
            Method::CreateTrustAccountTransaction,
            json!({ "success": true, "transaction_id": "TAT-0010" }),
        );
        let client = client(rpc.clone());
        let doc = Client {
            name: Some("CL-0042".to_string()),
            trust_balance: Some(0.0),
        };
        let mut session = FormSession::new(ClientForm, doc, ctx(), &client);

        session.click(Action::AddTrustDeposit).await.unwrap();
        let mut values = PromptValues::new();
        values.insert("amount".to_string(), FieldValue::Number(2000.0));
        values.insert("description".to_string(), "Retainer".into());

        let shown = session.submit_prompt(values).await.unwrap();

        assert_eq!(
            shown,
            vec![
                Effect::message("Trust Deposit added successfully"),
                Effect::CloseDialog,
                Effect::Reload,
            ]
        );
        assert!(session.open_prompt().is_none());

        let args = &rpc.calls_to(Method::CreateTrustAccountTransaction)[0];
        assert_eq!(args["transaction_type"], json!("Deposit"));
        assert_eq!(args["amount"], json!(2000.0));
    }

    #[tokio::test]
    async fn rejected_trust_transaction_keeps_dialog_open() {
        let rpc = MockRpcClient::new().with_response(
            Method::CreateTrustAccountTransaction,
            json!({ "success": false, "error": "Client has no trust account" }),
        );
        let client = client(rpc);
        let doc = Client {
            name: Some("CL-0042".to_string()),
            trust_balance: Some(0.0),
        };
        let mut session = FormSession::new(ClientForm, doc, ctx(), &client);

        session.click(Action::AddTrustWithdrawal).await.unwrap();
        let mut values = PromptValues::new();
        values.insert("amount".to_string(), FieldValue::Number(50.0));
        values.insert("description".to_string(), "Refund".into());

        let shown = session.submit_prompt(values).await.unwrap();

        assert_eq!(
            shown,
            vec![Effect::Alert(Alert::error("Client has no trust account"))]
        );
        assert!(session.open_prompt().is_some());
    }
}
