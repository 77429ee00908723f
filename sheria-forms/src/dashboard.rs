//! Dashboard and client portal loaders.
//!
//! A section whose call fails is left empty and the failure is kept next to
//! the data, so one bad endpoint never blanks the whole page.

use sheria_client::{
    domain::{CaseStatistics, LegalService, RecentActivity, ServiceRequestSummary, UpcomingHearing},
    CallError, Method, RpcClient, SheriaClient,
};

use crate::{website::PageEffect, Alert};

pub const SERVICE_REQUESTED: &str = "Service request submitted successfully";

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub statistics: Option<CaseStatistics>,
    pub hearings: Vec<UpcomingHearing>,
    pub activities: Vec<RecentActivity>,
    pub failures: Vec<(Method, CallError)>,
}

impl Dashboard {
    pub async fn load<R: RpcClient>(
        client: &SheriaClient<R>,
        hearings_limit: Option<u32>,
        activities_limit: Option<u32>,
    ) -> Self {
        let mut dashboard = Dashboard::default();

        match client.get_case_statistics().await {
            Ok(stats) => dashboard.statistics = Some(stats),
            Err(err) => dashboard.failed(Method::GetCaseStatistics, err),
        }
        match client.get_upcoming_hearings(hearings_limit).await {
            Ok(hearings) => dashboard.hearings = hearings,
            Err(err) => dashboard.failed(Method::GetUpcomingHearings, err),
        }
        match client.get_recent_activities(activities_limit).await {
            Ok(activities) => dashboard.activities = activities,
            Err(err) => dashboard.failed(Method::GetRecentActivities, err),
        }

        dashboard
    }

    fn failed(&mut self, method: Method, err: CallError) {
        tracing::warn!(%method, "dashboard section unavailable: {}", err);
        self.failures.push((method, err));
    }
}

/// What a client sees on the portal: the service catalogue and their own
/// requests.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Portal {
    pub services: Vec<LegalService>,
    pub requests: Vec<ServiceRequestSummary>,
    pub failures: Vec<(Method, CallError)>,
}

impl Portal {
    pub async fn load<R: RpcClient>(client: &SheriaClient<R>, for_client: Option<&str>) -> Self {
        let mut portal = Portal::default();

        match client.get_client_services().await {
            Ok(services) => portal.services = services,
            Err(err) => portal.failed(Method::GetClientServices, err),
        }
        match client.get_service_requests(for_client).await {
            Ok(requests) => portal.requests = requests,
            Err(err) => portal.failed(Method::GetServiceRequests, err),
        }

        portal
    }

    fn failed(&mut self, method: Method, err: CallError) {
        tracing::warn!(%method, "portal section unavailable: {}", err);
        self.failures.push((method, err));
    }
}

/// Requests a service from the portal catalogue.
pub async fn request_service<R: RpcClient>(client: &SheriaClient<R>, service: &str) -> PageEffect {
    match client.request_service(service).await {
        Ok(created) => {
            tracing::info!(request = %created.request_id, "service requested");
            PageEffect::Alert(Alert::success(SERVICE_REQUESTED))
        }
        Err(err) => PageEffect::Alert(Alert::from_call_error(&err)),
    }
}
