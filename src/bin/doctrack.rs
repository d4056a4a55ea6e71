//! doctrack CLI — operator interface to the translation work item store.

use clap::{Parser, Subcommand};
use doctrack::config::Config;
use doctrack::dates::DateParsing;
use doctrack::db::Db;
use doctrack::model::{NewWorkItem, StatusFilter, WorkItem, WorkItemId};
use doctrack::telemetry::{TelemetryConfig, init_telemetry};
use secrecy::ExposeSecret;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doctrack", about = "Government translation work item tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a newly arrived document
    Add {
        /// GO number the document arrived under
        go_number: String,
        /// Arrival date (YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY or MM/DD/YYYY)
        arrival_date: String,
        /// Assigned translators, comma-separated
        #[arg(long, default_value = "")]
        translators: String,
        /// Deputy director overseeing the work
        #[arg(long)]
        deputy_director: Option<String>,
        /// Typist assigned to the final copy
        #[arg(long)]
        typist: Option<String>,
        /// Submission date, if the work is already submitted
        #[arg(long)]
        submission_date: Option<String>,
    },
    /// List work items, newest first
    List {
        /// Substring to match against doc id, GO number and names
        #[arg(long, default_value = "")]
        query: String,
        /// Status filter: all, inprogress or submitted
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Show one work item in full
    Show {
        id: i64,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace the field set of an existing work item
    Edit {
        id: i64,
        /// GO number the document arrived under
        go_number: String,
        /// Arrival date (YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY or MM/DD/YYYY)
        arrival_date: String,
        /// Assigned translators, comma-separated
        #[arg(long, default_value = "")]
        translators: String,
        /// Deputy director overseeing the work
        #[arg(long)]
        deputy_director: Option<String>,
        /// Typist assigned to the final copy
        #[arg(long)]
        typist: Option<String>,
        /// Submission date; omit to keep the item in progress
        #[arg(long)]
        submission_date: Option<String>,
    },
    /// Mark a work item submitted as of today
    Submit { id: i64 },
    /// Delete a work item permanently
    Delete { id: i64 },
    /// Export every work item as CSV
    Export {
        /// Output path; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let _guard = init_telemetry(TelemetryConfig {
        otlp_endpoint: config.otel_endpoint.clone(),
        service_name: "doctrack".to_string(),
    })?;

    let mut db = Db::connect(config.database_url.expose_secret()).await?;
    if config.strict_dates {
        tracing::info!("strict date parsing enabled");
        db = db.with_date_parsing(DateParsing::Strict);
    }
    db.migrate().await?;

    match cli.command {
        Command::Add {
            go_number,
            arrival_date,
            translators,
            deputy_director,
            typist,
            submission_date,
        } => {
            let new = build_fields(
                go_number,
                arrival_date,
                translators,
                deputy_director,
                typist,
                submission_date,
            );
            let item = db.create_work_item(new).await?;
            println!("Created {} ({})", item.doc_id, item.status());
        }
        Command::List { query, status } => cmd_list(&db, &query, status).await?,
        Command::Show { id, json } => {
            let item = db.get_work_item(WorkItemId(id)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&item)?);
            } else {
                print_item(&item);
            }
        }
        Command::Edit {
            id,
            go_number,
            arrival_date,
            translators,
            deputy_director,
            typist,
            submission_date,
        } => {
            let new = build_fields(
                go_number,
                arrival_date,
                translators,
                deputy_director,
                typist,
                submission_date,
            );
            let item = db.update_work_item(WorkItemId(id), new).await?;
            println!("Updated {} ({})", item.doc_id, item.status());
        }
        Command::Submit { id } => {
            db.mark_submitted(WorkItemId(id)).await?;
            println!("Marked {id} submitted");
        }
        Command::Delete { id } => {
            db.delete_work_item(WorkItemId(id)).await?;
            println!("Deleted {id}");
        }
        Command::Export { output } => cmd_export(&db, output).await?,
    }

    Ok(())
}

fn build_fields(
    go_number: String,
    arrival_date: String,
    translators: String,
    deputy_director: Option<String>,
    typist: Option<String>,
    submission_date: Option<String>,
) -> NewWorkItem {
    let mut new = NewWorkItem::new(go_number, arrival_date).translators(translators);
    if let Some(name) = deputy_director {
        new = new.deputy_director(name);
    }
    if let Some(name) = typist {
        new = new.typist(name);
    }
    if let Some(date) = submission_date {
        new = new.submission_date(date);
    }
    new
}

async fn cmd_list(db: &Db, query: &str, status: StatusFilter) -> anyhow::Result<()> {
    let items = db.list_work_items(query, status).await?;

    if items.is_empty() {
        println!("No work items found.");
        return Ok(());
    }

    println!(
        "{:<6}  {:<10}  {:<14}  {:<12}  {:<10}  {:<10}  TRANSLATORS",
        "ID", "DOC ID", "GO NUMBER", "STATUS", "ARRIVED", "SUBMITTED"
    );
    println!("{}", "-".repeat(100));

    for item in &items {
        let go_display = if item.go_number.len() > 14 {
            &item.go_number[..14]
        } else {
            &item.go_number
        };
        let submitted = item
            .submission_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6}  {:<10}  {:<14}  {:<12}  {:<10}  {:<10}  {}",
            item.id,
            item.doc_id,
            go_display,
            item.status().to_string(),
            item.arrival_date.to_string(),
            submitted,
            item.translators,
        );
    }

    println!("\n{} item(s)", items.len());
    Ok(())
}

fn print_item(item: &WorkItem) {
    println!("ID:              {}", item.id);
    println!("Doc ID:          {}", item.doc_id);
    println!("GO Number:       {}", item.go_number);
    println!("Status:          {}", item.status());
    println!("Translators:     {}", item.translators);
    println!(
        "Deputy Director: {}",
        item.deputy_director.as_deref().unwrap_or("-")
    );
    println!("Typist:          {}", item.typist.as_deref().unwrap_or("-"));
    println!("Arrived:         {}", item.arrival_date);
    match item.submission_date {
        Some(date) => println!("Submitted:       {date}"),
        None => println!("Submitted:       -"),
    }
    println!("Created:         {}", item.created_at);
}

async fn cmd_export(db: &Db, output: Option<PathBuf>) -> anyhow::Result<()> {
    let items = db.list_for_export().await?;

    match output {
        Some(path) => {
            let file = std::fs::File::create(&path)?;
            doctrack::export::write_csv(&items, file)?;
            println!("Wrote {} record(s) to {}", items.len(), path.display());
        }
        None => {
            doctrack::export::write_csv(&items, std::io::stdout().lock())?;
        }
    }
    Ok(())
}
