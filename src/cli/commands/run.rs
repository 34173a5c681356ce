use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Local};

use crate::adapters::audit::text_audit_log::TextAuditLog;
use crate::adapters::credentials::static_credentials::StaticCredentials;
use crate::adapters::storage::csv_employee_store::CsvEmployeeStore;
use crate::cli::{output, prompt};
use crate::config::app_config::AppConfig;
use crate::core::errors::{Result, RosterError};
use crate::core::models::audit_entry::{AuditAction, AuditEntry, AuditRecord};
use crate::core::models::employee::Employee;
use crate::core::services::employee_service::EmployeeService;
use crate::core::traits::audit::AuditLog;
use crate::core::traits::credentials::CredentialVerifier;
use crate::core::traits::storage::EmployeeStore;

/// Exit status after an external termination signal (128 + SIGINT).
const SIGNAL_EXIT_CODE: i32 = 130;

/// What the menu loop should do after a choice completes.
enum Flow {
    Continue,
    Exit,
}

/// One-shot session-end event. Whichever of the main session path or
/// the signal handler gets here first appends the shutdown entry; the
/// other side sees the flag already set and does nothing.
#[derive(Clone)]
struct SessionEnd {
    fired: Arc<AtomicBool>,
}

impl SessionEnd {
    fn new() -> Self {
        Self {
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    fn complete(&self, audit: &TextAuditLog) {
        if !self.fired.swap(true, Ordering::SeqCst) {
            record_or_warn(audit, AuditEntry::new(AuditAction::ProgramShutdown));
        }
    }
}

/// Audit decorator injected into the store: append failures are warned
/// to the operator and swallowed here, so nothing in the core layer
/// touches the console and no mutation fails on audit trouble.
struct BestEffortAudit<A: AuditLog> {
    inner: A,
}

impl<A: AuditLog> BestEffortAudit<A> {
    fn new(inner: A) -> Self {
        Self { inner }
    }
}

impl<A: AuditLog> AuditLog for BestEffortAudit<A> {
    fn record(&self, entry: &AuditEntry) -> Result<()> {
        record_or_warn(&self.inner, entry.clone());
        Ok(())
    }

    fn query(&self, since: Option<DateTime<Local>>) -> Result<Vec<AuditRecord>> {
        self.inner.query(since)
    }
}

/// Run the interactive session: authenticate, replay the records file
/// into memory, then serve the menu until the operator exits.
pub fn execute(file: Option<&Path>, config_path: Option<&Path>) -> Result<()> {
    let config = AppConfig::load(config_path)?;

    let audit = TextAuditLog::new(config.audit.log_file.clone());
    let storage = CsvEmployeeStore::new(config.records_path(file));
    let verifier = StaticCredentials::from_config(&config.auth);

    let session_end = install_termination_hook(&audit)?;
    record_or_warn(&audit, AuditEntry::new(AuditAction::ProgramStarted));

    // However the session ends from here on, the trail gets its
    // shutdown entry: menu exit, end of input, a rejected login, or a
    // signal. Completing after the handler has fired is a no-op.
    let outcome = run_session(&verifier, &storage, &audit);
    session_end.complete(&audit);
    outcome
}

fn run_session(
    verifier: &impl CredentialVerifier,
    storage: &impl EmployeeStore,
    audit: &TextAuditLog,
) -> Result<()> {
    authenticate(verifier, audit)?;

    let mut service = EmployeeService::new(BestEffortAudit::new(audit.clone()));
    load_existing_records(storage, &mut service);

    run_menu_loop(&mut service, storage, audit)
}

/// Register the signal handler that appends the shutdown entry before
/// the process dies. The handler gets its own clone of the audit log;
/// the in-memory roster stays on the main thread and is not saved.
fn install_termination_hook(audit: &TextAuditLog) -> Result<SessionEnd> {
    let session_end = SessionEnd::new();
    let handler_end = session_end.clone();
    let handler_audit = audit.clone();

    ctrlc::set_handler(move || {
        handler_end.complete(&handler_audit);
        std::process::exit(SIGNAL_EXIT_CODE);
    })
    .map_err(|e| RosterError::ShutdownHook {
        detail: e.to_string(),
    })?;

    Ok(session_end)
}

/// Single username/password challenge. A wrong answer is recorded with
/// a password fingerprint, never the password itself, and ends the run.
fn authenticate(verifier: &impl CredentialVerifier, audit: &TextAuditLog) -> Result<()> {
    output::header("Employee Management System");
    println!("  Please log in to continue.\n");

    let username = prompt::line("Username: ")?.unwrap_or_default();
    let password = prompt::password("Password: ")?.unwrap_or_default();

    if !verifier.verify(&username, &password) {
        record_or_warn(audit, AuditEntry::login_failed(&username, &password));
        return Err(RosterError::AuthenticationFailed);
    }

    record_or_warn(
        audit,
        AuditEntry::new(AuditAction::LoginSucceeded {
            username: username.clone(),
        }),
    );
    output::success(&format!("Logged in as {username}."));
    Ok(())
}

/// Replay the records file into the in-memory roster. A missing file is
/// a fresh start; a corrupt one is reported and the session continues
/// with whatever was already loaded.
fn load_existing_records<A: AuditLog>(
    storage: &impl EmployeeStore,
    service: &mut EmployeeService<A>,
) {
    if !storage.exists() {
        return;
    }
    match storage.load() {
        Ok(employees) => {
            let count = employees.len();
            for employee in employees {
                service.add(employee);
            }
            output::success(&format!("Loaded {count} employee(s) from file."));
        }
        Err(e) => output::error(&format!("Error loading data from file: {e}")),
    }
}

fn run_menu_loop<A: AuditLog>(
    service: &mut EmployeeService<A>,
    storage: &impl EmployeeStore,
    audit: &TextAuditLog,
) -> Result<()> {
    loop {
        print_menu();
        // End of input is treated like choosing Exit, so piped sessions
        // still save and close their audit trail.
        let Some(choice) = prompt::read_line()? else {
            return exit_session(service, storage, audit);
        };

        let flow = match choice.trim() {
            "1" => add_employee(service)?,
            "2" => remove_employee(service)?,
            "3" => {
                view_all(service, audit);
                Flow::Continue
            }
            "4" => Flow::Exit,
            _ => {
                output::error("Invalid choice, please try again.");
                Flow::Continue
            }
        };

        if let Flow::Exit = flow {
            return exit_session(service, storage, audit);
        }
    }
}

fn print_menu() {
    println!();
    println!("Choose an option:");
    output::menu_item(1, "Add employee");
    output::menu_item(2, "Remove employee");
    output::menu_item(3, "View all employees");
    output::menu_item(4, "Exit");
}

fn add_employee<A: AuditLog>(service: &mut EmployeeService<A>) -> Result<Flow> {
    let Some(name) = prompt::line("Enter name: ")? else {
        return Ok(Flow::Exit);
    };
    let Some(last_name) = prompt::line("Enter last name: ")? else {
        return Ok(Flow::Exit);
    };
    let Some(age) = read_age()? else {
        return Ok(Flow::Exit);
    };

    service.add(Employee::new(name, last_name, age));
    output::success("Employee added.");
    Ok(Flow::Continue)
}

/// Re-prompt until the operator types an integer. The range is
/// deliberately unchecked; the roster stores whatever was entered.
fn read_age() -> Result<Option<i32>> {
    loop {
        let Some(raw) = prompt::line("Enter age: ")? else {
            return Ok(None);
        };
        match raw.trim().parse() {
            Ok(age) => return Ok(Some(age)),
            Err(_) => output::error("Age must be a whole number, please try again."),
        }
    }
}

fn remove_employee<A: AuditLog>(service: &mut EmployeeService<A>) -> Result<Flow> {
    let Some(last_name) = prompt::line("Enter last name of employee to remove: ")? else {
        return Ok(Flow::Exit);
    };

    match service.remove(&last_name) {
        Some(removed) => output::success(&format!("Removed {removed}.")),
        None => output::warning(&format!("No employee with last name '{last_name}'.")),
    }
    Ok(Flow::Continue)
}

/// Print the current roster and record that it was viewed. The view
/// entry carries no employee subject, even when the roster is empty.
fn view_all<A: AuditLog>(service: &EmployeeService<A>, audit: &TextAuditLog) {
    let employees = service.list_all();
    if employees.is_empty() {
        output::warning("No employees on the roster.");
    } else {
        println!();
        for employee in &employees {
            println!("  {employee}");
        }
    }
    record_or_warn(audit, AuditEntry::new(AuditAction::EmployeeViewed));
}

/// Save the roster and record the exit. The shutdown entry is appended
/// by the session-end guard once the session unwinds to `execute`.
fn exit_session<A: AuditLog>(
    service: &EmployeeService<A>,
    storage: &impl EmployeeStore,
    audit: &TextAuditLog,
) -> Result<()> {
    match storage.save(&service.list_all()) {
        Ok(()) => output::success(&format!("Saved {} employee(s).", service.len())),
        Err(e) => output::error(&format!("Error saving data to file: {e}")),
    }

    record_or_warn(audit, AuditEntry::new(AuditAction::ProgramExited));
    println!("  Goodbye.");
    Ok(())
}

/// Append an audit entry, warning instead of propagating on failure.
/// Audit trouble must never take the session down with it.
fn record_or_warn(audit: &impl AuditLog, entry: AuditEntry) {
    if let Err(e) = audit.record(&entry) {
        output::warning(&format!("Could not write audit log: {e}"));
    }
}
