use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "sheria")]
#[command(about = "Work with a Sheria legal practice server from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute billable hours and total for a time entry, offline
    Hours {
        /// Start time, e.g. 22:00
        #[arg(value_parser = parse_time)]
        start: NaiveTime,
        /// End time; earlier than start means the next day
        #[arg(value_parser = parse_time)]
        end: NaiveTime,
        /// Hourly billing rate
        #[arg(long)]
        rate: Option<f64>,
        /// Bill the entry
        #[arg(long)]
        billable: bool,
    },
    /// Log in with username and password and save the session
    Login {
        username: String,
    },
    /// Remove the saved session
    Logout,
    /// Show a client's trust account balance
    Balance {
        client: String,
    },
    /// Print a client's trust account statement
    Statement {
        client: String,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Record a trust deposit for a client
    Deposit(TrustArgs),
    /// Record a trust withdrawal for a client
    Withdraw(TrustArgs),
    /// Generate an invoice from approved time entries
    Invoice {
        #[arg(required = true)]
        time_entries: Vec<String>,
    },
    /// Send the reminder email for a hearing
    Remind {
        hearing: String,
    },
    /// Submit a service booking as a website visitor
    Book(BookArgs),
    /// Send the website contact form
    Contact(ContactArgs),
    /// Case statistics, upcoming hearings and recent activity
    Stats {
        #[arg(long)]
        hearings: Option<u32>,
        #[arg(long)]
        activities: Option<u32>,
    },
    /// Upcoming hearings
    Hearings {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Recent case activity
    Activities {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Legal services offered to clients
    Services,
    /// Service requests, optionally for one client
    Requests {
        #[arg(long)]
        client: Option<String>,
    },
    /// Service catalogue and service requests together
    Portal {
        #[arg(long)]
        client: Option<String>,
    },
    /// Request a service from the catalogue
    RequestService {
        service: String,
    },
    /// Print config path and create default file if missing
    ConfigPath,
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("expected HH:MM, got {:?}: {}", s, e))
}

#[derive(Debug, Args)]
pub struct TrustArgs {
    pub client: String,
    pub amount: f64,
    #[arg(long, short)]
    pub description: String,
    #[arg(long, short)]
    pub reference: Option<String>,
}

#[derive(Debug, Args)]
pub struct BookArgs {
    /// Service name as listed on the website
    #[arg(long)]
    pub service: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Debug, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long)]
    pub message: String,
}
