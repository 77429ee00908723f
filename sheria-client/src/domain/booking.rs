use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A service booking made from the public website.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBookingRequest {
    pub service_name: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    pub message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequestCreated {
    pub request_id: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactCreated {
    pub contact_id: String,
}
