use crate::app::export::OutputFormat;
use crate::domain::model::RecordId;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "staffhub")]
#[command(about = "Employee, attendance and leave records from the command line")]
pub struct Cli {
    /// TOML config file; STAFFHUB_* environment variables are used when absent
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(subcommand)]
    Employees(EmployeeCommand),
    #[command(subcommand)]
    Attendance(AttendanceCommand),
    #[command(subcommand)]
    Leave(LeaveCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum EmployeeCommand {
    List,
    Get { id: RecordId },
    /// Substring match on name, email, department or role
    Search { query: String },
    Department { name: String },
    Delete { id: RecordId },
}

#[derive(Debug, Clone, Subcommand)]
pub enum AttendanceCommand {
    List,
    /// Records for one day (defaults to today, UTC)
    Date { date: Option<String> },
    Employee { employee_id: String },
    Status { id: RecordId, status: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum LeaveCommand {
    List,
    Get {
        id: RecordId,
    },
    Employee {
        employee_id: String,
    },
    Status {
        status: String,
    },
    Approve {
        id: RecordId,
        #[arg(long = "by")]
        approver: String,
    },
    Reject {
        id: RecordId,
        #[arg(long = "by")]
        approver: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leave_approve() {
        let cli = Cli::try_parse_from(["staffhub", "leave", "approve", "42", "--by", "mgr_jane"])
            .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Leave(LeaveCommand::Approve { id, approver }) => {
                assert_eq!(id, 42);
                assert_eq!(approver, "mgr_jane");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_csv_search() {
        let cli = Cli::try_parse_from([
            "staffhub",
            "--format",
            "csv",
            "employees",
            "search",
            "Engineering",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Csv);
        assert!(matches!(
            cli.command,
            Command::Employees(EmployeeCommand::Search { .. })
        ));
    }
}
