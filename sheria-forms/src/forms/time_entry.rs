use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{
    billing::{duration_hours, total_amount},
    choice, Action, Button, Document, Effect, Effects, FieldError, FieldOf, FieldValue,
    FormContext, FormHandler, Request, Response, Route,
};

const BILLING_GROUP: &str = "Billing";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum TimeEntryStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub name: Option<String>,
    pub employee: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub hours: Option<f64>,
    pub billing_rate: Option<f64>,
    #[serde(default)]
    pub billable: bool,
    #[serde(default)]
    pub total_amount: f64,
    pub status: Option<TimeEntryStatus>,
    #[serde(default)]
    pub is_billable: bool,
    #[serde(default)]
    pub billed: bool,
    pub invoice_reference: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum TimeEntryField {
    Name,
    Employee,
    StartTime,
    EndTime,
    Hours,
    BillingRate,
    Billable,
    TotalAmount,
    Status,
    IsBillable,
    Billed,
    InvoiceReference,
}

impl Document for TimeEntry {
    type Field = TimeEntryField;

    fn get(&self, field: TimeEntryField) -> FieldValue {
        match field {
            TimeEntryField::Name => self.name.clone().into(),
            TimeEntryField::Employee => self.employee.clone().into(),
            TimeEntryField::StartTime => self.start_time.into(),
            TimeEntryField::EndTime => self.end_time.into(),
            TimeEntryField::Hours => self.hours.into(),
            TimeEntryField::BillingRate => self.billing_rate.into(),
            TimeEntryField::Billable => self.billable.into(),
            TimeEntryField::TotalAmount => self.total_amount.into(),
            TimeEntryField::Status => choice(self.status),
            TimeEntryField::IsBillable => self.is_billable.into(),
            TimeEntryField::Billed => self.billed.into(),
            TimeEntryField::InvoiceReference => self.invoice_reference.clone().into(),
        }
    }

    fn set(&mut self, field: TimeEntryField, value: FieldValue) -> Result<(), FieldError> {
        match field {
            TimeEntryField::Name => self.name = value.into_text(field)?,
            TimeEntryField::Employee => self.employee = value.into_text(field)?,
            TimeEntryField::StartTime => self.start_time = value.into_time(field)?,
            TimeEntryField::EndTime => self.end_time = value.into_time(field)?,
            TimeEntryField::Hours => self.hours = value.into_number(field)?,
            TimeEntryField::BillingRate => self.billing_rate = value.into_number(field)?,
            TimeEntryField::Billable => self.billable = value.into_flag(field)?,
            TimeEntryField::TotalAmount => {
                self.total_amount = value.into_number(field)?.unwrap_or_default()
            }
            TimeEntryField::Status => self.status = value.into_choice(field)?,
            TimeEntryField::IsBillable => self.is_billable = value.into_flag(field)?,
            TimeEntryField::Billed => self.billed = value.into_flag(field)?,
            TimeEntryField::InvoiceReference => self.invoice_reference = value.into_text(field)?,
        }
        Ok(())
    }
}

impl TimeEntry {
    /// Approved billable entries that have not been invoiced yet.
    pub fn awaiting_invoice(&self) -> bool {
        self.status == Some(TimeEntryStatus::Approved) && self.is_billable && !self.billed
    }

    fn total_for(&self, hours: Option<f64>) -> f64 {
        total_amount(hours, self.billing_rate, self.billable)
    }
}

pub struct TimeEntryForm;

impl FormHandler for TimeEntryForm {
    type Doc = TimeEntry;

    fn on_load(&self, doc: &TimeEntry, ctx: &FormContext) -> Effects<TimeEntry> {
        let mut effects = Vec::new();

        if doc.employee.is_none() {
            if let Some(user) = &ctx.user {
                effects.push(Effect::set(TimeEntryField::Employee, user.as_str()));
            }
        }

        effects.push(Effect::set(TimeEntryField::TotalAmount, doc.total_for(doc.hours)));

        if doc.awaiting_invoice() {
            effects.push(Effect::AddButton(
                Button::new(Action::GenerateInvoice).in_group(BILLING_GROUP),
            ));
        }

        if doc.billed && doc.invoice_reference.is_some() {
            effects.push(Effect::AddButton(
                Button::new(Action::ViewInvoice).in_group(BILLING_GROUP),
            ));
        }

        effects
    }

    fn on_field_change(
        &self,
        doc: &TimeEntry,
        field: FieldOf<TimeEntry>,
        _value: &FieldValue,
        _ctx: &FormContext,
    ) -> Effects<TimeEntry> {
        match field {
            TimeEntryField::StartTime | TimeEntryField::EndTime => {
                let (Some(start), Some(end)) = (doc.start_time, doc.end_time) else {
                    return Vec::new();
                };
                let hours = duration_hours(start, end);
                vec![
                    Effect::set(TimeEntryField::Hours, hours),
                    Effect::set(TimeEntryField::TotalAmount, doc.total_for(Some(hours))),
                ]
            }
            TimeEntryField::Hours | TimeEntryField::BillingRate | TimeEntryField::Billable => {
                vec![Effect::set(
                    TimeEntryField::TotalAmount,
                    doc.total_for(doc.hours),
                )]
            }
            _ => Vec::new(),
        }
    }

    fn on_before_save(&self, doc: &TimeEntry, _ctx: &FormContext) -> Effects<TimeEntry> {
        match doc.hours {
            Some(hours) if hours <= 0.0 => {
                vec![Effect::CancelSave("Hours must be greater than 0".to_string())]
            }
            _ => Vec::new(),
        }
    }

    fn on_action(&self, doc: &TimeEntry, action: Action, _ctx: &FormContext) -> Effects<TimeEntry> {
        match (action, &doc.name, &doc.invoice_reference) {
            (Action::GenerateInvoice, Some(name), _) => {
                vec![Effect::Request(Request::GenerateInvoice {
                    time_entries: vec![name.clone()],
                })]
            }
            (Action::ViewInvoice, _, Some(invoice)) => {
                vec![Effect::Navigate(Route::form("Sales Invoice", invoice))]
            }
            _ => Vec::new(),
        }
    }

    fn on_response(&self, _doc: &TimeEntry, response: Response, _ctx: &FormContext) -> Effects<TimeEntry> {
        match response {
            Response::Invoice(summary) => vec![
                Effect::message(format!(
                    "Invoice generated successfully: {}",
                    summary.invoice_id
                )),
                Effect::Reload,
            ],
            _ => Vec::new(),
        }
    }
}

/// Bulk actions on the time entry list.
pub struct TimeEntryList;

impl TimeEntryList {
    pub fn generate_invoice(selected: &[TimeEntry]) -> Effects<TimeEntry> {
        let names: Vec<String> = selected.iter().filter_map(|e| e.name.clone()).collect();
        if names.is_empty() {
            return vec![Effect::message("Please select time entries to invoice")];
        }

        vec![Effect::Request(Request::GenerateInvoice {
            time_entries: names,
        })]
    }

    pub fn on_response(response: Response) -> Effects<TimeEntry> {
        match response {
            Response::Invoice(summary) => vec![
                Effect::message(format!(
                    "Invoice generated successfully: {}",
                    summary.invoice_id
                )),
                Effect::RefreshList,
            ],
            _ => Vec::new(),
        }
    }
}
