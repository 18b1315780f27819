//! Plain-text rendering of the registry, validation reports and outcomes.

use chrono::NaiveDate;
use votebymail_core::states::{self, FieldDescriptor, Requirement, SignupMethod};
use votebymail_core::{Jurisdiction, SignatureMode, State};
use votebymail_signup::{Notice, NoticeLevel, StatusModal, SubmitOutcome, ValidationReport};

const LABEL_WIDTH: usize = 18;

fn signature_mode(mode: SignatureMode) -> &'static str {
    match mode {
        SignatureMode::DrawnOnly => "drawn only",
        SignatureMode::UploadedOnly => "upload only",
        SignatureMode::Either => "drawn or upload",
        SignatureMode::None => "not required",
    }
}

fn requirement(req: Requirement) -> &'static str {
    match req {
        Requirement::Always => "required",
        Requirement::DuringPrimary => "primary only",
        Requirement::Conditional => "conditional",
        Requirement::Optional => "optional",
    }
}

fn row(label: &str, value: impl std::fmt::Display) {
    println!("  {label:<LABEL_WIDTH$} {value}");
}

fn field_line(field: &FieldDescriptor) -> String {
    let mut line = format!("{} ({})", field.label, requirement(field.requirement));
    if !field.options.is_empty() {
        line.push_str(": ");
        line.push_str(&field.options.join(" | "));
    }
    line
}

/// One card per in-app jurisdiction, then the states routed elsewhere.
pub fn print_states(today: NaiveDate) {
    println!("In-app signup ({} states, as of {today}):", Jurisdiction::ALL.len());
    for j in Jurisdiction::ALL {
        println!();
        println!("{j}");
        row("abbreviation", j.state().abbr());
        row("signature", signature_mode(j.signature_mode()));
        match j.primary_cutoff() {
            Some(cutoff) => {
                let open = if states::primary_eligible(j, today) { "open" } else { "closed" };
                row("primary cutoff", format!("{cutoff} ({open})"));
            }
            None => row("primary cutoff", "none"),
        }
        for field in j.extra_fields() {
            row("field", field_line(field));
        }
    }

    let elsewhere: Vec<&str> = State::all()
        .filter(|s| matches!(states::signup_method(*s), SignupMethod::VoteDotOrg))
        .map(|s| s.abbr())
        .collect();
    println!();
    println!("Signup through vote.org: {}", elsewhere.join(", "));
}

pub fn print_report(report: &ValidationReport) {
    println!("Validation:");
    row("address", if report.address_resolved { "resolved" } else { "missing" });
    if report.invalid_fields.is_empty() {
        row("base fields", "ok");
    } else {
        let labels: Vec<&str> = report.invalid_fields.iter().map(|f| f.label()).collect();
        row("base fields", format!("invalid: {}", labels.join(", ")));
    }
    let check = |err: &Option<votebymail_core::EnrichError>| match err {
        Some(e) => e.to_string(),
        None => "ok".to_string(),
    };
    row("mailing address", check(&report.mailing));
    row("state fields", check(&report.state_fields));
    row("signature", check(&report.signature));
    row("status", report.status);
    row("ready", if report.is_complete() { "yes" } else { "no" });
}

pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        let tag = match notice.level {
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        eprintln!("{tag}: {}", notice.message);
    }
}

pub fn print_modal(modal: &StatusModal) {
    println!("{}", StatusModal::TITLE);
    println!("  {}", modal.message);
    println!("  {}", StatusModal::ADVICE);
    println!(
        "  [{}] [{}]",
        StatusModal::RECHECK_LABEL,
        modal.confirm_label()
    );
}

pub fn print_outcome(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Submitted { confirmation_id } => {
            println!("Signed up. Confirmation id: {confirmation_id}");
        }
        SubmitOutcome::Blocked(reason) => println!("Not submitted: {reason}"),
        SubmitOutcome::NeedsConfirmation(modal) => print_modal(modal),
        SubmitOutcome::Failed(kind) => println!("Submission failed: {}", kind.user_message()),
    }
}
