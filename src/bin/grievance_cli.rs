//! Grievance desk command line interface
//!
//! Operator CLI over the complaint service. Reads the API url and the cached
//! login session from the environment (see `grievance_desk::config`).
//!
//! # Usage
//!
//! ```bash
//! # Complaints assigned to the signed-in officer, still open
//! grievance_cli list --status in-progress
//!
//! # Where can an ASSIGNED complaint go next?
//! grievance_cli next-statuses ASSIGNED
//!
//! # Move a complaint on and hand it to an officer
//! grievance_cli update c-42 --status in-progress --assign-to officer-7
//!
//! # Officer registrations awaiting a decision
//! grievance_cli pending
//! grievance_cli approve officer-9
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use grievance_client::{GrievanceApi, HttpClient};
use grievance_core::{allowed_next_statuses_for, status_display, Actor, ComplaintEdits, GrievanceError};
use grievance_desk::{
    AppConfig, CommentThread, ComplaintBoard, ComplaintEditor, OfficerApprovals, SessionStore,
};
use grievance_types::{
    Complaint, ComplaintCategory, ComplaintFilter, ComplaintStatus, Department, NewComplaint,
    Officer, Priority,
};

#[derive(Parser)]
#[command(name = "grievance_cli")]
#[command(version = "0.1.0")]
#[command(about = "Complaint desk CLI for the grievance service")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: json or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,

    /// Complaint service base url
    #[arg(long, global = true, env = "GRIEVANCE_API_URL")]
    api_url: Option<String>,

    /// Cached login session
    #[arg(long, global = true, env = "GRIEVANCE_SESSION_FILE")]
    session_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// List complaints visible to the signed-in user
    List {
        #[arg(long, value_parser = parse_code::<ComplaintStatus>)]
        status: Option<ComplaintStatus>,
        #[arg(long, value_parser = parse_code::<Priority>)]
        priority: Option<Priority>,
        #[arg(long, value_parser = parse_code::<Department>)]
        department: Option<Department>,
        #[arg(long, value_parser = parse_code::<ComplaintCategory>)]
        category: Option<ComplaintCategory>,
        #[arg(long)]
        assigned_to: Option<String>,
        /// Matches subject, description, complaint number or location
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Show one complaint with its history and comments
    Show { id: String },

    /// File a complaint on behalf of a citizen
    File {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, value_parser = parse_code::<ComplaintCategory>)]
        category: Option<ComplaintCategory>,
        #[arg(long, value_parser = parse_code::<Priority>)]
        priority: Option<Priority>,
        /// Defaults to the signed-in user
        #[arg(long)]
        citizen_id: Option<String>,
    },

    /// Statuses a complaint in STATUS may be moved to (no session needed)
    NextStatuses { status: String },

    /// Edit a complaint. Only changed fields are sent.
    Update {
        id: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, value_parser = parse_code::<Priority>)]
        priority: Option<Priority>,
        #[arg(long, value_parser = parse_code::<ComplaintStatus>)]
        status: Option<ComplaintStatus>,
        /// Admin tier only
        #[arg(long, value_parser = parse_code::<Department>)]
        department: Option<Department>,
        #[arg(long, requires = "department")]
        department_remarks: Option<String>,
        /// Officer id; must be an approved officer
        #[arg(long)]
        assign_to: Option<String>,
        #[arg(long, requires = "assign_to")]
        assignment_remarks: Option<String>,
    },

    /// Approved officers available for assignment
    Officers {
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Officer registrations awaiting a decision (admin tier)
    Pending,

    /// Approve a pending officer registration (admin tier)
    Approve { officer_id: String },

    /// Reject a pending officer registration (admin tier)
    Reject { officer_id: String },

    /// Add a comment to a complaint
    Comment { complaint_id: String, text: String },
}

/// Accepts wire codes case-insensitively, with `-` standing in for `_`.
fn parse_code<T: FromStr>(raw: &str) -> std::result::Result<T, String> {
    let code = raw.trim().to_ascii_uppercase().replace('-', "_");
    code.parse::<T>()
        .map_err(|_| format!("unrecognised value '{raw}'"))
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,grievance_desk=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = match e.downcast_ref::<GrievanceError>() {
                Some(grievance) => grievance.user_message(),
                None => format!("{e:#}"),
            };
            if format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": message }));
            } else {
                eprintln!("{}: {}", "error".red().bold(), message);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::NextStatuses { status } = &cli.command {
        return cmd_next_statuses(status, cli.format);
    }

    let mut config = AppConfig::from_env()?;
    if let Some(raw) = &cli.api_url {
        config.api_url = url::Url::parse(raw).with_context(|| format!("Invalid --api-url: {raw}"))?;
    }
    if let Some(path) = cli.session_file.clone() {
        config.session_file = path;
    }
    let (token, actor) = SessionStore::new(&config.session_file).require()?;
    let api = HttpClient::new(config.api_url.as_str(), Some(token), config.http_timeout)?;
    tracing::debug!(api = %config.api_url, actor = %actor.id, role = %actor.role, "session ready");

    match cli.command {
        Commands::List {
            status,
            priority,
            department,
            category,
            assigned_to,
            search,
        } => {
            let filter = ComplaintFilter {
                status,
                priority,
                department,
                category,
                assigned_to_id: assigned_to,
                search,
            };
            cmd_list(&api, &filter, cli.format).await
        }
        Commands::Show { id } => cmd_show(&api, &id, cli.format).await,
        Commands::File {
            subject,
            description,
            location,
            category,
            priority,
            citizen_id,
        } => {
            let complaint = NewComplaint {
                subject,
                description,
                location,
                category,
                priority: priority.unwrap_or_default(),
                citizen_id: citizen_id.unwrap_or_else(|| actor.id.clone()),
            };
            let filed = api.file_complaint(complaint).await?;
            emit(cli.format, &filed, || {
                println!(
                    "{} Filed {} ({})",
                    "OK".green(),
                    filed.complaint_number.bold(),
                    filed.id
                )
            })
        }
        Commands::NextStatuses { .. } => Ok(()),
        Commands::Update {
            id,
            subject,
            description,
            location,
            priority,
            status,
            department,
            department_remarks,
            assign_to,
            assignment_remarks,
        } => {
            let mut edits = ComplaintEdits::default();
            if let Some(v) = subject {
                edits = edits.subject(v);
            }
            if let Some(v) = description {
                edits = edits.description(v);
            }
            if let Some(v) = location {
                edits = edits.location(v);
            }
            if let Some(v) = priority {
                edits = edits.priority(v);
            }
            if let Some(v) = status {
                edits = edits.status(v);
            }
            if let Some(v) = department {
                edits = edits.department(v, department_remarks);
            }
            let officers = match assign_to {
                Some(officer_id) => {
                    edits = edits.assign_to(officer_id, assignment_remarks);
                    api.list_approved_officers(None).await?
                }
                None => Vec::new(),
            };
            cmd_update(&api, &actor, &id, &edits, &officers, cli.format).await
        }
        Commands::Officers { search } => {
            let officers = api.list_approved_officers(search.as_deref()).await?;
            emit(cli.format, &officers, || print_officers(&officers))
        }
        Commands::Pending => {
            let approvals = OfficerApprovals::load(&api, &actor).await?;
            let pending = approvals.pending();
            emit(cli.format, &pending, || {
                if pending.is_empty() {
                    println!("No registrations awaiting a decision");
                } else {
                    print_officers(pending);
                }
            })
        }
        Commands::Approve { officer_id } => {
            let mut approvals = OfficerApprovals::load(&api, &actor).await?;
            approvals.approve(&officer_id).await?;
            emit(cli.format, &serde_json::json!({ "approved": officer_id }), || {
                println!("{} Approved {}", "OK".green(), officer_id)
            })
        }
        Commands::Reject { officer_id } => {
            let mut approvals = OfficerApprovals::load(&api, &actor).await?;
            approvals.reject(&officer_id).await?;
            emit(cli.format, &serde_json::json!({ "rejected": officer_id }), || {
                println!("{} Rejected {}", "OK".yellow(), officer_id)
            })
        }
        Commands::Comment { complaint_id, text } => {
            let complaint = api.fetch_complaint(&complaint_id).await?;
            let mut thread = CommentThread::new(complaint);
            let comment = thread.post(&api, &actor, &text, Vec::new()).await?;
            emit(cli.format, comment, || {
                println!("{} Comment {} added", "OK".green(), comment.id)
            })
        }
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn cmd_next_statuses(raw: &str, format: OutputFormat) -> Result<()> {
    let code = raw.trim().to_ascii_uppercase().replace('-', "_");
    let statuses = allowed_next_statuses_for(&code)?;
    emit(format, &statuses, || {
        println!("From {}:", status_display(&code).bold());
        for (i, status) in statuses.iter().enumerate() {
            let label = status_display(status.as_str());
            if i == 0 {
                println!("  {} (current)", label.dimmed());
            } else {
                println!("  {}", label);
            }
        }
        if statuses.len() == 1 {
            println!("  {}", "terminal: no further moves".yellow());
        }
    })
}

async fn cmd_list(api: &dyn GrievanceApi, filter: &ComplaintFilter, format: OutputFormat) -> Result<()> {
    let board = ComplaintBoard::load(api, filter).await?;
    let complaints = board.visible(filter);
    emit(format, &complaints, || {
        if complaints.is_empty() {
            println!("No complaints");
            return;
        }
        for c in &complaints {
            println!(
                "{:<12} {:<14} {:<8} {}",
                c.complaint_number.bold(),
                colour_status(c.status),
                c.priority.as_str(),
                c.subject
            );
        }
    })
}

async fn cmd_show(api: &dyn GrievanceApi, id: &str, format: OutputFormat) -> Result<()> {
    let c = api.fetch_complaint(id).await?;
    emit(format, &c, || print_complaint(&c))
}

async fn cmd_update(
    api: &dyn GrievanceApi,
    actor: &Actor,
    id: &str,
    edits: &ComplaintEdits,
    officers: &[Officer],
    format: OutputFormat,
) -> Result<()> {
    let current = api
        .fetch_complaint(id)
        .await
        .with_context(|| format!("Failed to load complaint {id}"))?;
    let board = ComplaintBoard::new(vec![current]);
    let updated = ComplaintEditor::new(api, actor)
        .submit(&board, id, edits, officers)
        .await?;
    emit(format, &updated, || {
        println!("{} Updated {}", "OK".green(), updated.complaint_number.bold());
        print_complaint(&updated);
    })
}

// =============================================================================
// OUTPUT
// =============================================================================

fn emit<T: Serialize + ?Sized>(format: OutputFormat, value: &T, pretty: impl FnOnce()) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(value).context("JSON serialization failed")?
            );
        }
        OutputFormat::Pretty => pretty(),
    }
    Ok(())
}

fn colour_status(status: ComplaintStatus) -> colored::ColoredString {
    let label = status_display(status.as_str());
    match status {
        ComplaintStatus::Created | ComplaintStatus::Assigned => label.cyan(),
        ComplaintStatus::InProgress => label.blue(),
        ComplaintStatus::Blocked => label.red(),
        ComplaintStatus::Resolved | ComplaintStatus::Closed => label.green(),
        ComplaintStatus::Rejected | ComplaintStatus::Duplicate => label.dimmed(),
    }
}

fn print_complaint(c: &Complaint) {
    println!("{} {}", c.complaint_number.bold(), c.subject);
    println!("  status:     {}", colour_status(c.status));
    println!("  priority:   {}", c.priority);
    println!("  department: {}", status_display(c.assigned_department.as_str()));
    if let Some(officer) = &c.assigned_to_id {
        println!("  assigned:   {officer}");
    }
    if let Some(location) = &c.location {
        println!("  location:   {location}");
    }
    println!("  filed:      {}", c.created_at.format("%Y-%m-%d %H:%M"));
    println!("\n  {}", c.description);

    if !c.history.is_empty() {
        println!("\n{}", "History".bold());
        for h in &c.history {
            println!(
                "  {} {:<18} {}",
                h.created_at.format("%Y-%m-%d %H:%M"),
                h.action,
                h.remarks.as_deref().unwrap_or("")
            );
        }
    }
    if !c.comments.is_empty() {
        println!("\n{}", "Comments".bold());
        for comment in &c.comments {
            println!(
                "  {} ({}): {}",
                comment.commenter_name,
                comment.commenter_role,
                comment.text
            );
        }
    }
}

fn print_officers(officers: &[Officer]) {
    for o in officers {
        println!(
            "{:<14} {:<24} {:<22} {}",
            o.employee_id.bold(),
            o.name,
            o.designation.as_deref().unwrap_or("-"),
            status_display(o.department.as_str())
        );
    }
}
