use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use crate::{
    domain::{
        query_error, ActionOutcome, CaseStatistics, ContactCreated, ContactRequest,
        GenerateInvoiceRequest, InvoiceSummary, LegalService, RecentActivity,
        ServiceBookingRequest, ServiceRequestCreated, ServiceRequestSummary, TrustBalance,
        TrustStatementLine, TrustStatementRequest, TrustTransactionCreated,
        TrustTransactionRequest, UpcomingHearing,
    },
    Args, CallError, HttpRpcClient, Method, Payload, RpcClient,
};

pub const DEFAULT_HEARINGS_LIMIT: u32 = 5;
pub const DEFAULT_ACTIVITIES_LIMIT: u32 = 10;

/// Typed wrapper over the thirteen server methods.
pub struct SheriaClient<R = HttpRpcClient> {
    rpc: R,
}

impl<R: RpcClient> SheriaClient<R> {
    pub fn with_rpc(rpc: R) -> Self {
        Self { rpc }
    }

    /// Calls `method` and checks the payload the way that method reports
    /// failure: actions through their `success` flag, queries through an
    /// `error` key. An action's payload comes back as its data fields alone.
    pub async fn call(&self, method: Method, args: Args) -> Result<Payload, CallError> {
        let payload = self.rpc.call(method, args).await?;

        let checked = if method.is_action() {
            serde_json::from_value::<ActionOutcome>(payload)
                .map_err(|e| parse_error(method, e))
                .and_then(ActionOutcome::into_result)
                .map(|outcome| Value::Object(outcome.data))
        } else {
            match query_error(&payload) {
                Some(err) => Err(err),
                None => Ok(payload),
            }
        };

        checked.inspect_err(|err| {
            tracing::warn!(%method, "call failed: {}", err);
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, method: Method, args: Args) -> Result<T, CallError> {
        let payload = self.call(method, args).await?;
        serde_json::from_value(payload).map_err(|e| parse_error(method, e))
    }

    pub async fn generate_invoice_from_time_entries(
        &self,
        request: &GenerateInvoiceRequest,
    ) -> Result<InvoiceSummary, CallError> {
        self.fetch(Method::GenerateInvoiceFromTimeEntries, to_args(request)?)
            .await
    }

    pub async fn get_client_trust_balance(&self, client: &str) -> Result<TrustBalance, CallError> {
        self.fetch(Method::GetClientTrustBalance, args(json!({ "client": client })))
            .await
    }

    pub async fn get_client_trust_statement(
        &self,
        request: &TrustStatementRequest,
    ) -> Result<Vec<TrustStatementLine>, CallError> {
        self.fetch(Method::GetClientTrustStatement, to_args(request)?)
            .await
    }

    pub async fn create_trust_account_transaction(
        &self,
        request: &TrustTransactionRequest,
    ) -> Result<TrustTransactionCreated, CallError> {
        self.fetch(Method::CreateTrustAccountTransaction, to_args(request)?)
            .await
    }

    pub async fn send_hearing_reminder(&self, hearing_id: &str) -> Result<(), CallError> {
        let _: Value = self
            .call(
                Method::SendHearingReminder,
                args(json!({ "hearing_id": hearing_id })),
            )
            .await?;
        Ok(())
    }

    pub async fn submit_service_booking(
        &self,
        request: &ServiceBookingRequest,
    ) -> Result<ServiceRequestCreated, CallError> {
        self.fetch(Method::SubmitServiceBooking, to_args(request)?)
            .await
    }

    pub async fn submit_contact(&self, request: &ContactRequest) -> Result<ContactCreated, CallError> {
        self.fetch(Method::SubmitContact, to_args(request)?).await
    }

    pub async fn get_case_statistics(&self) -> Result<CaseStatistics, CallError> {
        self.fetch(Method::GetCaseStatistics, Args::new()).await
    }

    pub async fn get_upcoming_hearings(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<UpcomingHearing>, CallError> {
        let limit = limit.unwrap_or(DEFAULT_HEARINGS_LIMIT);
        self.fetch(Method::GetUpcomingHearings, args(json!({ "limit": limit })))
            .await
    }

    pub async fn get_recent_activities(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<RecentActivity>, CallError> {
        let limit = limit.unwrap_or(DEFAULT_ACTIVITIES_LIMIT);
        self.fetch(Method::GetRecentActivities, args(json!({ "limit": limit })))
            .await
    }

    pub async fn get_client_services(&self) -> Result<Vec<LegalService>, CallError> {
        self.fetch(Method::GetClientServices, Args::new()).await
    }

    /// Without a client the server answers for the logged-in user.
    pub async fn get_service_requests(
        &self,
        client: Option<&str>,
    ) -> Result<Vec<ServiceRequestSummary>, CallError> {
        let args = match client {
            Some(client) => args(json!({ "client": client })),
            None => Args::new(),
        };
        self.fetch(Method::GetServiceRequests, args)
            .await
    }

    pub async fn request_service(&self, service: &str) -> Result<ServiceRequestCreated, CallError> {
        self.fetch(Method::RequestService, args(json!({ "service": service })))
            .await
    }
}

fn parse_error(method: Method, err: serde_json::Error) -> CallError {
    CallError::ParsingError(format!("Failed to parse {} payload: {}", method, err))
}

fn args(value: Value) -> Args {
    match value {
        Value::Object(map) => map,
        _ => Args::new(),
    }
}

fn to_args(request: &impl Serialize) -> Result<Args, CallError> {
    match serde_json::to_value(request) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CallError::ParsingError(format!(
            "Expected arguments to serialize as an object, got {}",
            other
        ))),
        Err(e) => Err(CallError::ParsingError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::domain::TransactionType;
    use crate::mock::MockRpcClient;

    fn client(rpc: MockRpcClient) -> SheriaClient<MockRpcClient> {
        SheriaClient::with_rpc(rpc)
    }

    #[tokio::test]
    async fn invoice_generation_sends_entry_names() {
        let rpc = MockRpcClient::new().with_response(
            Method::GenerateInvoiceFromTimeEntries,
            json!({
                "success": true,
                "invoice_id": "ACC-SINV-2024-00001",
                "total_amount": 12000.0,
                "total_hours": 4.0
            }),
        );
        let client = client(rpc.clone());

        let summary = client
            .generate_invoice_from_time_entries(&GenerateInvoiceRequest::new(vec![
                "TE-0001".to_string(),
            ]))
            .await
            .unwrap();

        assert_eq!(summary.invoice_id, "ACC-SINV-2024-00001");
        assert_eq!(summary.total_hours, 4.0);

        let calls = rpc.calls_to(Method::GenerateInvoiceFromTimeEntries);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].get("time_entries"), Some(&json!(["TE-0001"])));
        assert!(!calls[0].contains_key("client"));
    }

    #[tokio::test]
    async fn failed_action_carries_server_error() {
        let rpc = MockRpcClient::new().with_response(
            Method::GenerateInvoiceFromTimeEntries,
            json!({ "error": "No valid billable time entries found" }),
        );

        let err = client(rpc)
            .generate_invoice_from_time_entries(&GenerateInvoiceRequest::new(vec![]))
            .await
            .unwrap_err();

        assert_eq!(
            err.server_message(),
            Some("No valid billable time entries found")
        );
    }

    #[tokio::test]
    async fn trust_balance_is_decoded() {
        let rpc = MockRpcClient::new()
            .with_response(Method::GetClientTrustBalance, json!({ "balance": 1500.5 }));
        let client = client(rpc.clone());

        let balance = client.get_client_trust_balance("CL-0001").await.unwrap();

        assert_eq!(balance.balance, 1500.5);
        assert_eq!(
            rpc.calls_to(Method::GetClientTrustBalance)[0].get("client"),
            Some(&json!("CL-0001"))
        );
    }

    #[tokio::test]
    async fn query_error_object_is_an_application_error() {
        let rpc = MockRpcClient::new().with_response(
            Method::GetClientTrustBalance,
            json!({ "error": "Failed to get trust balance" }),
        );

        let err = client(rpc)
            .get_client_trust_balance("CL-0001")
            .await
            .unwrap_err();

        assert_eq!(err.server_message(), Some("Failed to get trust balance"));
    }

    #[tokio::test]
    async fn statement_request_skips_open_date_bounds() {
        let rpc = MockRpcClient::new().with_response(
            Method::GetClientTrustStatement,
            json!([{
                "transaction_date": "2024-01-05",
                "transaction_type": "Deposit",
                "amount": 500.0,
                "running_balance": 500.0
            }]),
        );
        let client = client(rpc.clone());

        let request = TrustStatementRequest::new("CL-0001")
            .between(NaiveDate::from_ymd_opt(2024, 1, 1), None);
        let lines = client.get_client_trust_statement(&request).await.unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].transaction_type, TransactionType::Deposit);

        let sent = &rpc.calls_to(Method::GetClientTrustStatement)[0];
        assert_eq!(sent.get("from_date"), Some(&json!("2024-01-01")));
        assert!(!sent.contains_key("to_date"));
    }

    #[tokio::test]
    async fn raw_call_checks_failure_per_method_kind() {
        let rpc = MockRpcClient::new()
            .with_response(
                Method::RequestService,
                json!({ "success": true, "request_id": "SR-0031" }),
            )
            .with_response(
                Method::GetClientServices,
                json!({ "error": "Failed to get services" }),
            );
        let client = client(rpc);

        let data = client
            .call(Method::RequestService, args(json!({ "service": "LS-0001" })))
            .await
            .unwrap();
        assert_eq!(data, json!({ "request_id": "SR-0031" }));

        let err = client
            .call(Method::GetClientServices, Args::new())
            .await
            .unwrap_err();
        assert_eq!(err.server_message(), Some("Failed to get services"));
    }

    #[tokio::test]
    async fn hearing_reminder_succeeds_on_bare_success_flag() {
        let rpc = MockRpcClient::new()
            .with_response(Method::SendHearingReminder, json!({ "success": true }));

        client(rpc).send_hearing_reminder("HRG-0001").await.unwrap();
    }

    #[tokio::test]
    async fn null_payload_is_a_failure() {
        let rpc = MockRpcClient::new().with_response(Method::GetCaseStatistics, Value::Null);

        let err = client(rpc).get_case_statistics().await.unwrap_err();

        assert_eq!(err, CallError::ApplicationError(None));
    }

    #[tokio::test]
    async fn list_limits_default_when_not_given() {
        let rpc = MockRpcClient::new()
            .with_response(Method::GetUpcomingHearings, json!([]))
            .with_response(Method::GetRecentActivities, json!([]));
        let client = client(rpc.clone());

        client.get_upcoming_hearings(None).await.unwrap();
        client.get_recent_activities(Some(3)).await.unwrap();

        assert_eq!(
            rpc.calls_to(Method::GetUpcomingHearings)[0].get("limit"),
            Some(&json!(5))
        );
        assert_eq!(
            rpc.calls_to(Method::GetRecentActivities)[0].get("limit"),
            Some(&json!(3))
        );
    }

    #[tokio::test]
    async fn transport_failure_passes_through() {
        let rpc = MockRpcClient::new().with_failure(
            Method::SubmitContact,
            CallError::ResponseError("connection refused".to_string()),
        );

        let err = client(rpc)
            .submit_contact(&ContactRequest {
                name: "Amina Njeri".to_string(),
                email: "amina@example.com".to_string(),
                message: "Hello".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(err.is_transport());
    }
}
