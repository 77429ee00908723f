use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{
    choice, dates::ensure_not_past, Action, Button, Document, Effect, Effects, FieldError,
    FieldOf, FieldType, FieldValue, FormContext, FormHandler, Prompt, PromptField, PromptKind,
    PromptValues,
};

pub const LEGAL_ADMIN_ROLE: &str = "Legal Admin";
const ACTIONS_GROUP: &str = "Actions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum ServiceRequestStatus {
    Draft,
    Submitted,
    #[serde(rename = "Under Review")]
    #[strum(serialize = "Under Review")]
    UnderReview,
    Approved,
    Rejected,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub name: Option<String>,
    pub status: Option<ServiceRequestStatus>,
    pub service: Option<String>,
    pub request_date: Option<NaiveDate>,
    pub preferred_date: Option<NaiveDate>,
    pub approved_date: Option<NaiveDate>,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ServiceRequestField {
    Name,
    Status,
    Service,
    RequestDate,
    PreferredDate,
    ApprovedDate,
    RejectionReason,
}

impl Document for ServiceRequest {
    type Field = ServiceRequestField;

    fn get(&self, field: ServiceRequestField) -> FieldValue {
        match field {
            ServiceRequestField::Name => self.name.clone().into(),
            ServiceRequestField::Status => choice(self.status),
            ServiceRequestField::Service => self.service.clone().into(),
            ServiceRequestField::RequestDate => self.request_date.into(),
            ServiceRequestField::PreferredDate => self.preferred_date.into(),
            ServiceRequestField::ApprovedDate => self.approved_date.into(),
            ServiceRequestField::RejectionReason => self.rejection_reason.clone().into(),
        }
    }

    fn set(&mut self, field: ServiceRequestField, value: FieldValue) -> Result<(), FieldError> {
        match field {
            ServiceRequestField::Name => self.name = value.into_text(field)?,
            ServiceRequestField::Status => self.status = value.into_choice(field)?,
            ServiceRequestField::Service => self.service = value.into_text(field)?,
            ServiceRequestField::RequestDate => self.request_date = value.into_date(field)?,
            ServiceRequestField::PreferredDate => self.preferred_date = value.into_date(field)?,
            ServiceRequestField::ApprovedDate => self.approved_date = value.into_date(field)?,
            ServiceRequestField::RejectionReason => {
                self.rejection_reason = value.into_text(field)?
            }
        }
        Ok(())
    }
}

pub struct ServiceRequestForm;

impl FormHandler for ServiceRequestForm {
    type Doc = ServiceRequest;

    fn on_load(&self, doc: &ServiceRequest, ctx: &FormContext) -> Effects<ServiceRequest> {
        let mut effects = Vec::new();

        if doc.request_date.is_none() {
            effects.push(Effect::set(ServiceRequestField::RequestDate, ctx.today()));
        }

        let status = doc.status.unwrap_or_else(|| {
            effects.push(Effect::set(
                ServiceRequestField::Status,
                ServiceRequestStatus::Draft.to_string(),
            ));
            ServiceRequestStatus::Draft
        });

        match status {
            ServiceRequestStatus::Draft => {
                effects.push(Effect::AddButton(Button::new(Action::SubmitRequest)))
            }
            ServiceRequestStatus::UnderReview if ctx.has_role(LEGAL_ADMIN_ROLE) => {
                effects.push(Effect::AddButton(
                    Button::new(Action::Approve).in_group(ACTIONS_GROUP),
                ));
                effects.push(Effect::AddButton(
                    Button::new(Action::Reject).in_group(ACTIONS_GROUP),
                ));
            }
            _ => {}
        }

        effects
    }

    fn on_field_change(
        &self,
        doc: &ServiceRequest,
        field: FieldOf<ServiceRequest>,
        _value: &FieldValue,
        ctx: &FormContext,
    ) -> Effects<ServiceRequest> {
        let (ServiceRequestField::PreferredDate, Some(date)) = (field, doc.preferred_date) else {
            return Vec::new();
        };

        match ensure_not_past("Preferred date", date, ctx.today()) {
            Ok(()) => Vec::new(),
            Err(err) => vec![
                Effect::message(err.to_string()),
                Effect::clear(ServiceRequestField::PreferredDate),
            ],
        }
    }

    fn on_action(
        &self,
        _doc: &ServiceRequest,
        action: Action,
        ctx: &FormContext,
    ) -> Effects<ServiceRequest> {
        match action {
            Action::SubmitRequest => vec![
                Effect::set(
                    ServiceRequestField::Status,
                    ServiceRequestStatus::Submitted.to_string(),
                ),
                Effect::Save,
            ],
            Action::Approve => vec![Effect::Prompt(Prompt {
                kind: PromptKind::ApproveRequest,
                title: "Approve Service Request".to_string(),
                primary_label: "Approve".to_string(),
                fields: vec![PromptField::new("Approval Date", "approved_date", FieldType::Date)
                    .with_default(ctx.today())
                    .required()],
            })],
            Action::Reject => vec![Effect::Prompt(Prompt {
                kind: PromptKind::RejectRequest,
                title: "Reject Service Request".to_string(),
                primary_label: "Reject".to_string(),
                fields: vec![
                    PromptField::new("Rejection Reason", "rejection_reason", FieldType::Text)
                        .required(),
                ],
            })],
            _ => Vec::new(),
        }
    }

    fn on_prompt(
        &self,
        _doc: &ServiceRequest,
        kind: PromptKind,
        values: &PromptValues,
        _ctx: &FormContext,
    ) -> Effects<ServiceRequest> {
        let (status, field, key) = match kind {
            PromptKind::ApproveRequest => (
                ServiceRequestStatus::Approved,
                ServiceRequestField::ApprovedDate,
                "approved_date",
            ),
            PromptKind::RejectRequest => (
                ServiceRequestStatus::Rejected,
                ServiceRequestField::RejectionReason,
                "rejection_reason",
            ),
            _ => return Vec::new(),
        };

        vec![
            Effect::set(ServiceRequestField::Status, status.to_string()),
            Effect::set(field, values.get(key).cloned().unwrap_or_default()),
            Effect::Save,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> FormContext {
        FormContext::new(
            NaiveDate::from_ymd_opt(2024, 6, 3)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        )
    }

    fn with_status(status: ServiceRequestStatus) -> ServiceRequest {
        ServiceRequest {
            status: Some(status),
            request_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            ..Default::default()
        }
    }

    #[test]
    fn new_request_gets_defaults_and_submit_button() {
        let effects = ServiceRequestForm.on_load(&ServiceRequest::default(), &ctx());

        assert_eq!(
            effects,
            vec![
                Effect::set(ServiceRequestField::RequestDate, ctx().today()),
                Effect::set(ServiceRequestField::Status, "Draft"),
                Effect::AddButton(Button::new(Action::SubmitRequest)),
            ]
        );
    }

    #[test]
    fn review_buttons_need_the_admin_role() {
        let doc = with_status(ServiceRequestStatus::UnderReview);

        assert!(ServiceRequestForm.on_load(&doc, &ctx()).is_empty());

        let admin = ctx().with_role(LEGAL_ADMIN_ROLE);
        assert_eq!(
            ServiceRequestForm.on_load(&doc, &admin),
            vec![
                Effect::AddButton(Button::new(Action::Approve).in_group("Actions")),
                Effect::AddButton(Button::new(Action::Reject).in_group("Actions")),
            ]
        );
    }

    #[test]
    fn past_preferred_date_is_cleared() {
        let doc = ServiceRequest {
            preferred_date: NaiveDate::from_ymd_opt(2024, 5, 31),
            ..Default::default()
        };

        let effects = ServiceRequestForm.on_field_change(
            &doc,
            ServiceRequestField::PreferredDate,
            &FieldValue::Empty,
            &ctx(),
        );

        assert_eq!(
            effects,
            vec![
                Effect::message("Preferred date cannot be in the past"),
                Effect::clear(ServiceRequestField::PreferredDate),
            ]
        );
    }

    #[test]
    fn approval_prompt_defaults_to_today() {
        let effects = ServiceRequestForm.on_action(
            &with_status(ServiceRequestStatus::UnderReview),
            Action::Approve,
            &ctx(),
        );

        let [Effect::Prompt(prompt)] = &effects[..] else {
            panic!("expected approval prompt, got {:?}", effects);
        };
        assert_eq!(prompt.fields[0].default, FieldValue::Date(ctx().today()));
    }

    #[test]
    fn rejection_writes_reason_and_saves() {
        let mut values = PromptValues::new();
        values.insert("rejection_reason".to_string(), "Outside our practice areas".into());

        let effects = ServiceRequestForm.on_prompt(
            &with_status(ServiceRequestStatus::UnderReview),
            PromptKind::RejectRequest,
            &values,
            &ctx(),
        );

        assert_eq!(
            effects,
            vec![
                Effect::set(ServiceRequestField::Status, "Rejected"),
                Effect::set(
                    ServiceRequestField::RejectionReason,
                    "Outside our practice areas"
                ),
                Effect::Save,
            ]
        );
    }
}
