use std::collections::BTreeMap;
use std::time::Duration;

use sheria_client::{
    domain::{InvoiceSummary, TransactionType, TrustStatementLine, TrustTransactionCreated},
    CallError,
};
use strum::Display;

use crate::{statement::StatementView, FieldValue};

/// How long a toast stays on screen before it fades.
pub const ALERT_DISMISS_AFTER: Duration = Duration::from_secs(5);

pub const GENERIC_ERROR: &str = "An error occurred. Please try again.";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";

/// A declarative instruction returned by a form handler. `F` is the field
/// type of the document the handler is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<F> {
    /// Write a field without raising a change event.
    SetValue { field: F, value: FieldValue },
    /// Modal message.
    Message(String),
    Alert(Alert),
    AddButton(Button),
    AddMenuItem(Button),
    Indicator { label: String, color: Color },
    Progress { label: String, percent: f64 },
    Prompt(Prompt),
    ShowStatement(StatementView),
    CloseDialog,
    Navigate(Route),
    Save,
    /// Abort the pending save and tell the user why.
    CancelSave(String),
    Reload,
    RefreshList,
    Request(Request),
}

impl<F> Effect<F> {
    pub fn set(field: F, value: impl Into<FieldValue>) -> Self {
        Effect::SetValue {
            field,
            value: value.into(),
        }
    }

    pub fn clear(field: F) -> Self {
        Effect::SetValue {
            field,
            value: FieldValue::Empty,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Effect::Message(message.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    Blue,
    Green,
    Orange,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
    Info,
}

/// A toast that hides itself after `dismiss_after`.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub dismiss_after: Duration,
}

impl Alert {
    fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            dismiss_after: ALERT_DISMISS_AFTER,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Info, message)
    }

    /// The server's own message when it sent one, otherwise a generic one.
    pub fn from_call_error(err: &CallError) -> Self {
        let message = if err.is_transport() {
            NETWORK_ERROR
        } else {
            err.server_message().unwrap_or(GENERIC_ERROR)
        };
        Self::error(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Action {
    #[strum(serialize = "Mark Complete")]
    MarkComplete,
    Reopen,
    #[strum(serialize = "Send Reminder")]
    SendReminder,
    #[strum(serialize = "Mark Completed")]
    MarkCompleted,
    #[strum(serialize = "Submit Request")]
    SubmitRequest,
    Approve,
    Reject,
    #[strum(serialize = "Generate Invoice")]
    GenerateInvoice,
    #[strum(serialize = "View Invoice")]
    ViewInvoice,
    #[strum(serialize = "View Trust Statement")]
    ViewTrustStatement,
    #[strum(serialize = "Add Trust Deposit")]
    AddTrustDeposit,
    #[strum(serialize = "Trust Withdrawal")]
    AddTrustWithdrawal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub group: Option<String>,
    pub action: Action,
}

impl Button {
    pub fn new(action: Action) -> Self {
        Self {
            label: action.to_string(),
            group: None,
            action,
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Form { doctype: String, name: String },
}

impl Route {
    pub fn form(doctype: impl Into<String>, name: impl Into<String>) -> Self {
        Route::Form {
            doctype: doctype.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    HearingOutcome,
    ApproveRequest,
    RejectRequest,
    TrustTransaction(TransactionType),
}

impl PromptKind {
    /// Trust dialogs stay up until the server confirms and the handler closes
    /// them; the others close as soon as they are submitted.
    pub fn closes_on_submit(&self) -> bool {
        !matches!(self, PromptKind::TrustTransaction(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Select(Vec<String>),
    Date,
    Text,
    Data,
    Currency,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptField {
    pub label: String,
    pub fieldname: String,
    pub fieldtype: FieldType,
    pub required: bool,
    pub default: FieldValue,
}

impl PromptField {
    pub fn new(label: &str, fieldname: &str, fieldtype: FieldType) -> Self {
        Self {
            label: label.to_string(),
            fieldname: fieldname.to_string(),
            fieldtype,
            required: false,
            default: FieldValue::Empty,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = value.into();
        self
    }
}

/// A dialog asking the user for a few values before continuing.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub title: String,
    pub primary_label: String,
    pub fields: Vec<PromptField>,
}

impl Prompt {
    /// Names of required fields the user left empty.
    pub fn missing_required(&self, values: &PromptValues) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .filter(|f| values.get(&f.fieldname).map_or(true, FieldValue::is_empty))
            .map(|f| f.label.as_str())
            .collect()
    }
}

pub type PromptValues = BTreeMap<String, FieldValue>;

/// Why a trust balance is being fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalancePurpose {
    Indicator,
    BalanceBefore,
}

/// A server call a handler wants made on its behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    GenerateInvoice {
        time_entries: Vec<String>,
    },
    SendHearingReminder {
        hearing_id: String,
    },
    TrustBalance {
        client: String,
        purpose: BalancePurpose,
    },
    TrustStatement {
        client: String,
    },
    CreateTrustTransaction {
        client: String,
        transaction_type: TransactionType,
        amount: f64,
        description: String,
        reference: Option<String>,
    },
}

/// The answer to a [`Request`], handed back to the handler that asked.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Invoice(InvoiceSummary),
    ReminderSent,
    TrustBalance {
        purpose: BalancePurpose,
        balance: f64,
    },
    TrustStatement(Vec<TrustStatementLine>),
    TrustTransactionCreated {
        transaction_type: TransactionType,
        created: TrustTransactionCreated,
    },
}
