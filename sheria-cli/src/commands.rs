use std::future::Future;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveTime};
use sheria_client::{
    domain::{
        LegalService, RecentActivity, ServiceRequestSummary, TransactionType,
        TrustStatementRequest, UpcomingHearing,
    },
    Credentials, HttpRpcClient, SheriaClient,
};
use sheria_forms::{
    billing::{duration_hours, total_amount},
    dashboard::{self, Dashboard, Portal},
    dispatch,
    forms::{Client, ClientForm, Hearing, HearingForm, TimeEntry, TimeEntryList},
    money::format_currency,
    website::{self, BookingForm, ContactForm, PageEffect},
    Action, Alert, Effect, FieldValue, FormContext, FormSession, PromptValues, StatementView,
};

use crate::{
    cli::{BookArgs, ContactArgs, TrustArgs},
    config::{self, Settings},
    render,
};

/// Everything a command needs to talk to the server.
pub struct App {
    pub settings: Settings,
    client: SheriaClient,
}

impl App {
    pub fn new(settings: Settings, credentials: Credentials) -> Self {
        let rpc = HttpRpcClient::new(&settings.server.url, credentials)
            .with_namespace(settings.server.namespace.clone());
        Self {
            settings,
            client: SheriaClient::with_rpc(rpc),
        }
    }

    fn context(&self) -> FormContext {
        FormContext::new(Local::now().naive_local()).with_currency(&self.settings.display.currency)
    }

    fn money(&self, amount: f64) -> String {
        format_currency(amount, &self.settings.display.currency)
    }
}

fn finish(ok: bool) -> Result<()> {
    if !ok {
        bail!("request was not successful");
    }
    Ok(())
}

pub fn hours(
    currency: &str,
    start: NaiveTime,
    end: NaiveTime,
    rate: Option<f64>,
    billable: bool,
) -> Result<()> {
    let hours = duration_hours(start, end);
    println!("Hours: {:.2}", hours);
    println!("Total: {}", format_currency(total_amount(Some(hours), rate, billable), currency));
    Ok(())
}

pub async fn login(settings: &Settings, username: &str) -> Result<()> {
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let credentials = Credentials::login(&settings.server.url, username, &password)
        .await
        .context("Login failed")?;

    if let Credentials::Session { sid } = credentials {
        config::save_session(&sid)?;
    }
    println!("Login successful. Session saved.");
    Ok(())
}

pub async fn balance(app: &App, client: &str) -> Result<()> {
    let balance = app
        .client
        .get_client_trust_balance(client)
        .await
        .context("Failed to fetch trust balance")?;
    println!("Trust Balance: {}", app.money(balance.balance));
    Ok(())
}

pub async fn statement(
    app: &App,
    client: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let request = TrustStatementRequest::new(client).between(from, to);
    let lines = app
        .client
        .get_client_trust_statement(&request)
        .await
        .context("Failed to fetch trust statement")?;

    let view = StatementView::new(&lines, &app.settings.display.currency);
    render::effects::<()>(&[Effect::ShowStatement(view)]);
    Ok(())
}

/// Goes through the same dialog the client form offers.
pub async fn trust_transaction(app: &App, kind: TransactionType, args: TrustArgs) -> Result<()> {
    let doc = Client {
        name: Some(args.client),
        trust_balance: None,
    };
    let mut session = FormSession::new(ClientForm, doc, app.context(), &app.client);

    let action = match kind {
        TransactionType::Withdrawal => Action::AddTrustWithdrawal,
        _ => Action::AddTrustDeposit,
    };
    session.click(action).await?;

    let mut values = PromptValues::new();
    values.insert("amount".to_string(), FieldValue::Number(args.amount));
    values.insert("description".to_string(), args.description.into());
    values.insert("reference".to_string(), args.reference.into());

    let shown = session.submit_prompt(values).await?;
    finish(render::effects(&shown) && session.open_prompt().is_none())
}

pub async fn invoice(app: &App, names: Vec<String>) -> Result<()> {
    let selected: Vec<TimeEntry> = names
        .into_iter()
        .map(|name| TimeEntry {
            name: Some(name),
            ..Default::default()
        })
        .collect();

    let mut ok = true;
    for effect in TimeEntryList::generate_invoice(&selected) {
        match effect {
            Effect::Request(request) => match dispatch(&app.client, &request).await {
                Ok(response) => ok &= render::effects(&TimeEntryList::on_response(response)),
                Err(err) => {
                    ok = false;
                    render::effects::<()>(&[Effect::Alert(Alert::from_call_error(&err))]);
                }
            },
            other => ok &= render::effects(&[other]),
        }
    }
    finish(ok)
}

pub async fn remind(app: &App, hearing: String) -> Result<()> {
    let doc = Hearing {
        name: Some(hearing),
        ..Default::default()
    };
    let mut session = FormSession::new(HearingForm, doc, app.context(), &app.client);

    let shown = session.click(Action::SendReminder).await?;
    finish(render::effects(&shown))
}

pub async fn book(app: &App, args: BookArgs) -> Result<()> {
    let form = BookingForm {
        service_name: args.service,
        client_name: args.name,
        client_email: args.email,
        client_phone: args.phone,
        preferred_date: args.date,
        description: args.description,
        ..Default::default()
    };

    submit_page(
        form.begin_submit(),
        website::submit_booking(&app.client, &form),
    )
    .await
}

pub async fn contact(app: &App, args: ContactArgs) -> Result<()> {
    let form = ContactForm {
        name: args.name,
        email: args.email,
        phone: args.phone,
        address: args.address,
        message: args.message,
    };

    submit_page(
        form.begin_submit(),
        website::submit_contact(&app.client, &form),
    )
    .await
}

/// Shows the busy state, then waits for the submission to settle.
async fn submit_page(
    begin: std::result::Result<PageEffect, PageEffect>,
    submission: impl Future<Output = Vec<PageEffect>>,
) -> Result<()> {
    match begin {
        Ok(busy) => {
            render::page(&[busy]);
            finish(render::page(&submission.await))
        }
        Err(alert) => finish(render::page(&[alert])),
    }
}

pub async fn stats(app: &App, hearings: Option<u32>, activities: Option<u32>) -> Result<()> {
    let dashboard = Dashboard::load(&app.client, hearings, activities).await;

    if let Some(stats) = dashboard.statistics {
        println!(
            "Cases: {} total, {} active, {} pending, {} closed",
            stats.total_cases, stats.active_cases, stats.pending_cases, stats.closed_cases
        );
    }
    print_hearings(&dashboard.hearings);
    print_activities(&dashboard.activities);

    for (method, err) in &dashboard.failures {
        eprintln!("⚠️  {} unavailable: {}", method, err);
    }
    Ok(())
}

fn print_hearings(hearings: &[UpcomingHearing]) {
    println!("Upcoming hearings:");
    if hearings.is_empty() {
        println!("  none");
    }
    for h in hearings {
        println!(
            "  {}  {}  {}{}",
            h.hearing_date.format("%d-%m-%Y"),
            h.hearing_time.as_deref().unwrap_or("--:--"),
            h.case_title,
            h.court
                .as_deref()
                .map(|c| format!(" ({})", c))
                .unwrap_or_default()
        );
    }
}

fn print_activities(activities: &[RecentActivity]) {
    println!("Recent activity:");
    if activities.is_empty() {
        println!("  none");
    }
    for a in activities {
        println!("  {}  {}: {}", a.timestamp, a.case_title, a.description);
    }
}

pub async fn hearings(app: &App, limit: Option<u32>) -> Result<()> {
    let hearings = app
        .client
        .get_upcoming_hearings(limit)
        .await
        .context("Failed to fetch hearings")?;
    print_hearings(&hearings);
    Ok(())
}

pub async fn activities(app: &App, limit: Option<u32>) -> Result<()> {
    let activities = app
        .client
        .get_recent_activities(limit)
        .await
        .context("Failed to fetch activities")?;
    print_activities(&activities);
    Ok(())
}

fn print_services(app: &App, services: &[LegalService]) {
    for s in services {
        println!("{:<12} {:<32} {}", s.name, s.service_name, app.money(s.price));
    }
}

fn print_requests(requests: &[ServiceRequestSummary]) {
    for r in requests {
        println!("{:<16} {:<12} {}", r.name, r.status, r.service_name);
    }
}

pub async fn services(app: &App) -> Result<()> {
    let services = app
        .client
        .get_client_services()
        .await
        .context("Failed to fetch services")?;
    print_services(app, &services);
    Ok(())
}

pub async fn requests(app: &App, client: Option<&str>) -> Result<()> {
    let requests = app
        .client
        .get_service_requests(client)
        .await
        .context("Failed to fetch service requests")?;
    print_requests(&requests);
    Ok(())
}

pub async fn portal(app: &App, client: Option<&str>) -> Result<()> {
    let portal = Portal::load(&app.client, client).await;

    println!("Services:");
    print_services(app, &portal.services);
    println!("Requests:");
    if portal.requests.is_empty() {
        println!("  none");
    }
    print_requests(&portal.requests);

    for (method, err) in &portal.failures {
        eprintln!("⚠️  {} unavailable: {}", method, err);
    }
    Ok(())
}

pub async fn request_service(app: &App, service: &str) -> Result<()> {
    let effect = dashboard::request_service(&app.client, service).await;
    finish(render::page(&[effect]))
}
