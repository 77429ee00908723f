use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Every server method this client knows how to call.
///
/// The string form is the whitelisted function name on the server, e.g.
/// `Method::GetClientTrustBalance` is `get_client_trust_balance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Method {
    GenerateInvoiceFromTimeEntries,
    GetClientTrustBalance,
    GetClientTrustStatement,
    CreateTrustAccountTransaction,
    SendHearingReminder,
    SubmitServiceBooking,
    SubmitContact,
    GetCaseStatistics,
    GetUpcomingHearings,
    GetRecentActivities,
    GetClientServices,
    GetServiceRequests,
    RequestService,
}

impl Method {
    /// Action methods answer with a `success` flag in their payload. Query
    /// methods return their data directly and only signal failure with an
    /// `error` key.
    pub fn is_action(&self) -> bool {
        matches!(
            self,
            Method::GenerateInvoiceFromTimeEntries
                | Method::CreateTrustAccountTransaction
                | Method::SendHearingReminder
                | Method::SubmitServiceBooking
                | Method::SubmitContact
                | Method::RequestService
        )
    }
}
