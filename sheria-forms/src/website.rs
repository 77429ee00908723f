//! The public booking and contact forms.

use chrono::NaiveDate;
use sheria_client::{
    domain::{ContactRequest, ServiceBookingRequest},
    CallError, RpcClient, SheriaClient,
};

use crate::{
    validation::{is_valid_email, is_valid_phone},
    Alert,
};

pub const BOOKING_SUBMITTED: &str =
    "Service booking submitted successfully! We will contact you soon.";
pub const CONTACT_SUBMITTED: &str = "Thank you for contacting us! We will get back to you soon.";

const BOOKING_BUSY: &str = "Submitting...";
const CONTACT_BUSY: &str = "Sending...";

/// What the page should do in response to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEffect {
    /// Disable the submit button and show `label` on it while in flight.
    DisableSubmit { label: &'static str },
    /// Re-enable the submit button with its original label.
    EnableSubmit,
    Alert(Alert),
    ResetForm,
    ShowSelectedService(String),
    ClearSelectedService,
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct BookingForm {
    pub service_name: String,
    pub service_price: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub preferred_date: Option<NaiveDate>,
    pub description: String,
}

impl BookingForm {
    /// Every problem with the form, in the order the fields appear.
    pub fn validate(&self) -> Vec<&'static str> {
        let mut errors = Vec::new();

        if self.service_name.is_empty() {
            errors.push("Please select a service");
        }
        if self.client_name.is_empty() {
            errors.push("Client name is required");
        }
        if self.client_email.is_empty() {
            errors.push("Email is required");
        }
        if self.client_phone.is_empty() {
            errors.push("Phone number is required");
        }
        if self.preferred_date.is_none() {
            errors.push("Preferred date is required");
        }
        if !self.client_email.is_empty() && !is_valid_email(&self.client_email) {
            errors.push("Please enter a valid email address");
        }
        if !self.client_phone.is_empty() && !is_valid_phone(&self.client_phone) {
            errors.push("Please enter a valid phone number");
        }

        errors
    }

    /// Picks a service card: fills the form and shows the choice.
    pub fn select_service(&mut self, name: &str, price: &str) -> PageEffect {
        self.service_name = name.to_string();
        self.service_price = price.to_string();
        PageEffect::ShowSelectedService(format!("Selected Service: {} - {}", name, price))
    }

    /// What to show before the booking is sent: the busy submit button, or
    /// the validation errors when the form cannot be sent at all.
    pub fn begin_submit(&self) -> Result<PageEffect, PageEffect> {
        begin(self.validate(), BOOKING_BUSY)
    }

    pub fn to_request(&self) -> ServiceBookingRequest {
        ServiceBookingRequest {
            service_name: self.service_name.clone(),
            client_name: self.client_name.clone(),
            client_email: self.client_email.clone(),
            client_phone: self.client_phone.clone(),
            preferred_date: self.preferred_date,
            description: self.description.clone(),
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Vec<&'static str> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push("Name is required");
        }
        if self.email.is_empty() {
            errors.push("Email is required");
        }
        if self.message.is_empty() {
            errors.push("Message is required");
        }
        if !self.email.is_empty() && !is_valid_email(&self.email) {
            errors.push("Please enter a valid email address");
        }

        errors
    }

    pub fn begin_submit(&self) -> Result<PageEffect, PageEffect> {
        begin(self.validate(), CONTACT_BUSY)
    }

    pub fn to_request(&self) -> ContactRequest {
        ContactRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            message: self.message.clone(),
        }
    }
}

fn begin(errors: Vec<&'static str>, busy_label: &'static str) -> Result<PageEffect, PageEffect> {
    if errors.is_empty() {
        Ok(PageEffect::DisableSubmit { label: busy_label })
    } else {
        Err(PageEffect::Alert(Alert::error(errors.join("\n"))))
    }
}

fn settle<T>(
    result: Result<T, CallError>,
    on_success: impl FnOnce() -> Vec<PageEffect>,
) -> Vec<PageEffect> {
    let mut effects = vec![PageEffect::EnableSubmit];
    match result {
        Ok(_) => effects.extend(on_success()),
        Err(err) => {
            tracing::warn!("website submission failed: {}", err);
            effects.push(PageEffect::Alert(Alert::from_call_error(&err)));
        }
    }
    effects
}

/// Sends a booking and reports how it went. Show [`BookingForm::begin_submit`]
/// first; an invalid form never reaches the server.
pub async fn submit_booking<R: RpcClient>(
    client: &SheriaClient<R>,
    form: &BookingForm,
) -> Vec<PageEffect> {
    if let Err(alert) = form.begin_submit() {
        return vec![alert];
    }

    let result = client.submit_service_booking(&form.to_request()).await;
    settle(result, || {
        vec![
            PageEffect::Alert(Alert::success(BOOKING_SUBMITTED)),
            PageEffect::ResetForm,
            PageEffect::ClearSelectedService,
        ]
    })
}

pub async fn submit_contact<R: RpcClient>(
    client: &SheriaClient<R>,
    form: &ContactForm,
) -> Vec<PageEffect> {
    if let Err(alert) = form.begin_submit() {
        return vec![alert];
    }

    let result = client.submit_contact(&form.to_request()).await;
    settle(result, || {
        vec![
            PageEffect::Alert(Alert::success(CONTACT_SUBMITTED)),
            PageEffect::ResetForm,
        ]
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sheria_client::{mock::MockRpcClient, Method};

    use super::*;
    use crate::{AlertKind, GENERIC_ERROR, NETWORK_ERROR};

    fn booking() -> BookingForm {
        let mut form = BookingForm {
            client_name: "Achieng Otieno".to_string(),
            client_email: "achieng@example.co.ke".to_string(),
            client_phone: "+254 712 345 678".to_string(),
            preferred_date: NaiveDate::from_ymd_opt(2024, 7, 1),
            ..Default::default()
        };
        form.select_service("Conveyancing", "KES 25,000");
        form
    }

    #[test]
    fn empty_booking_lists_every_required_field() {
        assert_eq!(
            BookingForm::default().validate(),
            vec![
                "Please select a service",
                "Client name is required",
                "Email is required",
                "Phone number is required",
                "Preferred date is required",
            ]
        );
    }

    #[test]
    fn malformed_contact_details_are_reported() {
        let form = BookingForm {
            client_email: "a@b".to_string(),
            client_phone: "abc".to_string(),
            ..booking()
        };
        assert_eq!(
            form.validate(),
            vec![
                "Please enter a valid email address",
                "Please enter a valid phone number",
            ]
        );
    }

    #[test]
    fn selecting_a_service_fills_the_form() {
        let mut form = BookingForm::default();
        let effect = form.select_service("Will Drafting", "KES 8,000");

        assert_eq!(form.service_name, "Will Drafting");
        assert_eq!(
            effect,
            PageEffect::ShowSelectedService("Selected Service: Will Drafting - KES 8,000".to_string())
        );
    }

    #[test]
    fn contact_requires_name_email_and_message() {
        assert_eq!(
            ContactForm::default().validate(),
            vec!["Name is required", "Email is required", "Message is required"]
        );
    }

    #[tokio::test]
    async fn successful_booking_resets_the_form() {
        let rpc = MockRpcClient::new().with_response(
            Method::SubmitServiceBooking,
            json!({ "success": true, "request_id": "SR-0012" }),
        );
        let client = SheriaClient::with_rpc(rpc.clone());
        let form = booking();

        assert_eq!(
            form.begin_submit(),
            Ok(PageEffect::DisableSubmit {
                label: "Submitting..."
            })
        );
        assert_eq!(rpc.call_count(), 0);

        let effects = submit_booking(&client, &form).await;

        assert_eq!(
            effects,
            vec![
                PageEffect::EnableSubmit,
                PageEffect::Alert(Alert::success(BOOKING_SUBMITTED)),
                PageEffect::ResetForm,
                PageEffect::ClearSelectedService,
            ]
        );
        let args = &rpc.calls_to(Method::SubmitServiceBooking)[0];
        assert_eq!(args["service_name"], json!("Conveyancing"));
        assert_eq!(args["preferred_date"], json!("2024-07-01"));
    }

    #[tokio::test]
    async fn invalid_booking_is_not_sent() {
        let rpc = MockRpcClient::new();
        let client = SheriaClient::with_rpc(rpc.clone());
        let form = BookingForm::default();

        let Err(PageEffect::Alert(alert)) = form.begin_submit() else {
            panic!("expected the validation errors");
        };
        assert_eq!(alert.kind, AlertKind::Error);
        assert!(alert.message.starts_with("Please select a service\nClient name is required"));

        let effects = submit_booking(&client, &form).await;

        assert_eq!(effects, vec![PageEffect::Alert(alert)]);
        assert_eq!(rpc.call_count(), 0);
    }

    #[tokio::test]
    async fn server_error_is_shown_verbatim() {
        let rpc = MockRpcClient::new().with_response(
            Method::SubmitContact,
            json!({ "success": false, "error": "Too many messages today" }),
        );
        let client = SheriaClient::with_rpc(rpc);
        let form = ContactForm {
            name: "Baraka".to_string(),
            email: "baraka@example.com".to_string(),
            message: "I need help with a land dispute.".to_string(),
            ..Default::default()
        };

        assert_eq!(
            form.begin_submit(),
            Ok(PageEffect::DisableSubmit {
                label: "Sending..."
            })
        );

        let effects = submit_contact(&client, &form).await;

        assert_eq!(
            effects,
            vec![
                PageEffect::EnableSubmit,
                PageEffect::Alert(Alert::error("Too many messages today")),
            ]
        );
    }

    #[tokio::test]
    async fn failures_without_detail_fall_back_to_generic_messages() {
        let rpc = MockRpcClient::new()
            .with_response(Method::SubmitServiceBooking, json!({ "success": false }))
            .with_failure(
                Method::SubmitContact,
                CallError::ResponseError("timed out".to_string()),
            );
        let client = SheriaClient::with_rpc(rpc);

        let effects = submit_booking(&client, &booking()).await;
        assert_eq!(
            effects.last(),
            Some(&PageEffect::Alert(Alert::error(GENERIC_ERROR)))
        );

        let form = ContactForm {
            name: "Baraka".to_string(),
            email: "baraka@example.com".to_string(),
            message: "Hello".to_string(),
            ..Default::default()
        };
        let effects = submit_contact(&client, &form).await;
        assert_eq!(
            effects.last(),
            Some(&PageEffect::Alert(Alert::error(NETWORK_ERROR)))
        );
    }
}
