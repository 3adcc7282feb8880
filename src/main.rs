use clap::Parser;
use staffhub::app::export::{render, render_one, OutputFormat};
use staffhub::config::cli::{AttendanceCommand, Command, EmployeeCommand, LeaveCommand};
use staffhub::utils::error::ErrorSeverity;
use staffhub::utils::{logger, validation::Validate};
use staffhub::{
    AppConfig, ApperStore, AttendanceStatus, Cli, ConsoleNotifier, HrError, LeaveStatus,
    LogNotifier, Notifier, StaffHub,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::from_env(),
    };
    let config = match config.and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if config.json_logging() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI arguments: {:?}", cli);

    let store = match ApperStore::new(config.store.clone()) {
        Ok(store) => store,
        Err(e) => exit_with(e),
    };
    // Notifications follow the log format.
    let notifier: Arc<dyn Notifier> = if config.json_logging() {
        Arc::new(LogNotifier)
    } else {
        Arc::new(ConsoleNotifier)
    };
    let hub = StaffHub::new(store, notifier);

    match run(&hub, cli.command, cli.format).await {
        Ok(output) => println!("{}", output),
        Err(e) => exit_with(e),
    }
}

fn exit_with(e: HrError) -> ! {
    tracing::error!(
        "❌ staffhub failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn not_found(entity: &str, id: i64) -> HrError {
    HrError::NotFoundError {
        entity: entity.to_string(),
        id,
    }
}

async fn run(
    hub: &StaffHub<ApperStore>,
    command: Command,
    format: OutputFormat,
) -> staffhub::Result<String> {
    match command {
        Command::Employees(cmd) => match cmd {
            EmployeeCommand::List => render(&hub.employees.list_all().await, format),
            EmployeeCommand::Get { id } => match hub.employees.get_by_id(id).await {
                Some(employee) => render_one(&employee, format),
                None => Err(not_found("Employee", id)),
            },
            EmployeeCommand::Search { query } => render(&hub.employees.search(&query).await, format),
            EmployeeCommand::Department { name } => {
                render(&hub.employees.get_by_department(&name).await, format)
            }
            EmployeeCommand::Delete { id } => {
                if hub.employees.delete(id).await {
                    Ok(format!("Deleted employee {}", id))
                } else {
                    Err(HrError::StoreError {
                        message: format!("Employee {} was not deleted", id),
                    })
                }
            }
        },
        Command::Attendance(cmd) => match cmd {
            AttendanceCommand::List => render(&hub.attendance.list_all().await, format),
            AttendanceCommand::Date { date } => {
                let date = date.unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());
                render(&hub.attendance.get_by_date(&date).await, format)
            }
            AttendanceCommand::Employee { employee_id } => {
                render(&hub.attendance.get_by_employee(&employee_id).await, format)
            }
            AttendanceCommand::Status { id, status } => {
                let updated = hub
                    .attendance
                    .update_status(id, AttendanceStatus::from(status))
                    .await?;
                render_one(&updated, format)
            }
        },
        Command::Leave(cmd) => match cmd {
            LeaveCommand::List => render(&hub.leave.list_all().await, format),
            LeaveCommand::Get { id } => match hub.leave.get_by_id(id).await {
                Some(request) => render_one(&request, format),
                None => Err(not_found("Leave request", id)),
            },
            LeaveCommand::Employee { employee_id } => {
                render(&hub.leave.get_by_employee(&employee_id).await, format)
            }
            LeaveCommand::Status { status } => {
                render(&hub.leave.get_by_status(&LeaveStatus::from(status)).await, format)
            }
            LeaveCommand::Approve { id, approver } => {
                render_one(&hub.leave.approve(id, &approver).await?, format)
            }
            LeaveCommand::Reject { id, approver } => {
                render_one(&hub.leave.reject(id, &approver).await?, format)
            }
        },
    }
}
