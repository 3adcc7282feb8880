use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identity assigned by the record store.
pub type RecordId = i64;

/// A row as the record store sees it: suffixed field names mapped to raw
/// JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn insert(&mut self, field: &str, value: impl Into<Value>) {
        self.data.insert(field.to_string(), value.into());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.data.contains_key(field)
    }

    pub fn id(&self) -> Option<RecordId> {
        self.data.get("Id").and_then(Value::as_i64)
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(data) => Record { data },
            _ => Record::default(),
        }
    }
}

/// An unset foreign key reads as `""`; a patch leaves it out rather than
/// writing it back.
fn known_key(key: &str) -> Option<String> {
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A value the store holds that this crate has no variant for.
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $text,)+
                    $name::Other(value) => value,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($text => $name::$variant,)+
                    _ => $name::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

status_enum!(
    /// Employment lifecycle.
    EmployeeStatus, default = Active, {
        Active => "active",
        Inactive => "inactive",
    }
);

status_enum!(
    AttendanceStatus, default = Present, {
        Present => "present",
        Absent => "absent",
        Late => "late",
    }
);

status_enum!(
    /// `Pending` is the only state with outgoing transitions.
    LeaveStatus, default = Pending, {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub join_date: Option<String>,
    pub status: EmployeeStatus,
    pub photo_url: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub join_date: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub photo_url: Option<String>,
}

/// Fields left as `None` are not sent, so the stored value is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub join_date: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub photo_url: Option<String>,
}

impl From<NewEmployee> for EmployeePatch {
    fn from(input: NewEmployee) -> Self {
        EmployeePatch {
            first_name: Some(input.first_name),
            last_name: Some(input.last_name),
            email: input.email,
            phone: input.phone,
            role: input.role,
            department: input.department,
            join_date: input.join_date,
            status: Some(input.status.unwrap_or_default()),
            photo_url: input.photo_url,
        }
    }
}

impl From<&Employee> for EmployeePatch {
    fn from(employee: &Employee) -> Self {
        EmployeePatch {
            first_name: Some(employee.first_name.clone()),
            last_name: Some(employee.last_name.clone()),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            role: employee.role.clone(),
            department: employee.department.clone(),
            join_date: employee.join_date.clone(),
            status: Some(employee.status.clone()),
            photo_url: employee.photo_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(rename = "Id")]
    pub id: RecordId,
    /// Always the string form of the employee's `Id`.
    pub employee_id: String,
    pub employee_name: String,
    pub department: Option<String>,
    pub date: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendance {
    pub employee_id: String,
    pub employee_name: String,
    pub department: Option<String>,
    pub date: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendancePatch {
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    pub department: Option<String>,
    pub date: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
}

impl From<NewAttendance> for AttendancePatch {
    fn from(input: NewAttendance) -> Self {
        AttendancePatch {
            employee_id: Some(input.employee_id),
            employee_name: Some(input.employee_name),
            department: input.department,
            date: Some(input.date),
            check_in: input.check_in,
            check_out: input.check_out,
            status: Some(input.status.unwrap_or_default()),
            notes: input.notes,
        }
    }
}

impl From<&AttendanceRecord> for AttendancePatch {
    fn from(record: &AttendanceRecord) -> Self {
        AttendancePatch {
            employee_id: known_key(&record.employee_id),
            employee_name: Some(record.employee_name.clone()),
            department: record.department.clone(),
            date: Some(record.date.clone()),
            check_in: record.check_in.clone(),
            check_out: record.check_out.clone(),
            status: Some(record.status.clone()),
            notes: record.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub employee_id: String,
    pub employee_name: String,
    #[serde(rename = "type")]
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    pub approved_by: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLeaveRequest {
    pub employee_id: String,
    pub employee_name: String,
    #[serde(rename = "type")]
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: Option<String>,
    pub status: Option<LeaveStatus>,
    pub approved_by: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeavePatch {
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    #[serde(rename = "type")]
    pub leave_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub reason: Option<String>,
    pub status: Option<LeaveStatus>,
    pub approved_by: Option<String>,
    pub created_at: Option<String>,
}

impl From<NewLeaveRequest> for LeavePatch {
    fn from(input: NewLeaveRequest) -> Self {
        LeavePatch {
            employee_id: Some(input.employee_id),
            employee_name: Some(input.employee_name),
            leave_type: Some(input.leave_type),
            start_date: Some(input.start_date),
            end_date: Some(input.end_date),
            reason: input.reason,
            status: Some(input.status.unwrap_or_default()),
            approved_by: input.approved_by,
            created_at: Some(
                input
                    .created_at
                    .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            ),
        }
    }
}

impl From<&LeaveRequest> for LeavePatch {
    fn from(request: &LeaveRequest) -> Self {
        LeavePatch {
            employee_id: known_key(&request.employee_id),
            employee_name: Some(request.employee_name.clone()),
            leave_type: Some(request.leave_type.clone()),
            start_date: Some(request.start_date.clone()),
            end_date: Some(request.end_date.clone()),
            reason: request.reason.clone(),
            status: Some(request.status.clone()),
            approved_by: request.approved_by.clone(),
            created_at: request.created_at.clone(),
        }
    }
}
