mod answers;
mod display;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use votebymail_core::FieldId;
use votebymail_signup::{SignupForm, SubmitOutcome};
use votebymail_store::FileSessionStore;
use votebymail_sync::RpcClient;

use crate::answers::Answers;

#[derive(Parser)]
#[command(name = "votebymail", version, about = "Vote-by-mail signup rules and submission")]
struct Cli {
    /// Date used for primary-eligibility decisions (YYYY-MM-DD).
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List supported jurisdictions and their form rules.
    States,
    /// Validate an answers file without contacting the server.
    Check {
        /// JSON answers file; needs a resolved `contact`.
        file: PathBuf,
    },
    /// Resolve the address, check registration and submit.
    Signup {
        file: PathBuf,

        /// Sign up even when the registration status is not active.
        #[arg(long)]
        yes: bool,

        #[arg(long, env = "VBM_SERVER_URL")]
        server: String,

        #[arg(long, env = "VBM_TIMEOUT_SECS", default_value_t = 10)]
        timeout_secs: u64,

        #[arg(long, env = "VBM_SESSION_FILE", default_value = ".votebymail/session.json")]
        session_file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match cli.command {
        Command::States => {
            display::print_states(today);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { file } => Ok(if check(&file, today)? {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }),
        Command::Signup {
            file,
            yes,
            server,
            timeout_secs,
            session_file,
        } => {
            let client = RpcClient::new(server, Duration::from_secs(timeout_secs))
                .context("building RPC client")?;
            let mut store = FileSessionStore::open(session_file);
            signup(&file, today, yes, &client, &mut store).await
        }
    }
}

/// Print the validation report; `true` when the answers are ready to submit.
fn check(file: &Path, today: NaiveDate) -> anyhow::Result<bool> {
    let answers = Answers::load(file)?;
    let mut form = match &answers.contact {
        Some(contact) => SignupForm::for_address(contact.clone(), today, &answers.oid)
            .context("resolved address")?,
        None => SignupForm::new(answers.jurisdiction(), today, &answers.oid),
    };
    answers.apply(&mut form)?;

    let report = form.validation_report();
    display::print_notices(&form.take_notices());
    display::print_report(&report);
    // No lookup runs offline, so readiness ignores the status slot.
    Ok(report.is_complete())
}

async fn signup(
    file: &Path,
    today: NaiveDate,
    yes: bool,
    client: &RpcClient,
    store: &mut FileSessionStore,
) -> anyhow::Result<ExitCode> {
    let answers = Answers::load(file)?;
    let voter = match votebymail_store::remember_utm(store, &answers.utm) {
        Ok(voter) => voter,
        Err(e) => {
            warn!(error = %e, path = %store.path().display(), "campaign tags not saved");
            votebymail_store::voter(store)
        }
    };
    info!(uid = %voter.uid, state = %answers.jurisdiction(), "starting signup");

    let mut form = SignupForm::new(answers.jurisdiction(), today, &answers.oid);
    if answers.confirm_email.is_some() {
        form = form.require_confirm_email();
    }
    let address = answers
        .address
        .as_ref()
        .context("answers need an `address` to resolve")?;
    let resolved = form.resolve_address(client, address).await;
    display::print_notices(&form.take_notices());
    resolved.context("resolving registration address")?;

    answers.apply(&mut form)?;
    let ticket = [FieldId::FirstName, FieldId::LastName, FieldId::Birthdate]
        .into_iter()
        .filter_map(|field| form.blur_field(field))
        .last();
    if let Some(ticket) = ticket {
        form.check_registration(client, ticket).await;
    }
    info!(status = form.status().label(), "registration status");

    let mut outcome = form.press_submit(client, &voter).await?;
    if let SubmitOutcome::NeedsConfirmation(modal) = &outcome {
        display::print_modal(modal);
        if !yes {
            form.recheck_fields();
            display::print_notices(&form.take_notices());
            eprintln!("Re-run with --yes to sign up anyway.");
            return Ok(ExitCode::FAILURE);
        }
        if let Some(next) = form.submit_anyway(client, &voter).await? {
            outcome = next;
        }
    }

    display::print_notices(&form.take_notices());
    display::print_outcome(&outcome);
    Ok(match form.phase().confirmation_id() {
        Some(_) => ExitCode::SUCCESS,
        None => ExitCode::FAILURE,
    })
}
