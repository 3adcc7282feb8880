use crate::core::mapper::{put, record_id, start_patch, text, text_or_empty, Entity, NAME};
use crate::core::repository::Repository;
use crate::domain::model::{Employee, EmployeePatch, EmployeeStatus, NewEmployee, Record, RecordId};
use crate::domain::ports::RecordStore;
use crate::utils::error::Result;
use crate::utils::validation::{require_text, Validate};

pub const TABLE: &str = "employee_c";

const FIRST_NAME: &str = "first_name_c";
const LAST_NAME: &str = "last_name_c";
const EMAIL: &str = "email_c";
const PHONE: &str = "phone_c";
const ROLE: &str = "role_c";
const DEPARTMENT: &str = "department_c";
const JOIN_DATE: &str = "join_date_c";
const STATUS: &str = "status_c";
const PHOTO_URL: &str = "photo_url_c";

const SEARCH_FIELDS: &[&str] = &[FIRST_NAME, LAST_NAME, EMAIL, DEPARTMENT, ROLE];

pub type EmployeeRepository<S> = Repository<Employee, S>;

impl Entity for Employee {
    const TABLE: &'static str = TABLE;
    const LABEL: &'static str = "employee";
    const FIELDS: &'static [&'static str] = &[
        NAME, FIRST_NAME, LAST_NAME, EMAIL, PHONE, ROLE, DEPARTMENT, JOIN_DATE, STATUS, PHOTO_URL,
    ];

    type New = NewEmployee;
    type Patch = EmployeePatch;

    fn from_wire(record: &Record) -> Result<Self> {
        Ok(Employee {
            id: record_id(record)?,
            first_name: text_or_empty(record, FIRST_NAME),
            last_name: text_or_empty(record, LAST_NAME),
            email: text(record, EMAIL),
            phone: text(record, PHONE),
            role: text(record, ROLE),
            department: text(record, DEPARTMENT),
            join_date: text(record, JOIN_DATE),
            status: text(record, STATUS)
                .map(EmployeeStatus::from)
                .unwrap_or_default(),
            photo_url: text(record, PHOTO_URL),
        })
    }

    fn to_wire_patch(id: Option<RecordId>, patch: &EmployeePatch) -> Result<Record> {
        let mut wire = start_patch(id)?;

        if patch.first_name.is_some() || patch.last_name.is_some() {
            let name = format!(
                "{} {}",
                patch.first_name.as_deref().unwrap_or(""),
                patch.last_name.as_deref().unwrap_or("")
            );
            if id.is_some() {
                wire.insert(NAME, name.trim());
            } else {
                wire.insert(NAME, name);
            }
        }
        put(&mut wire, FIRST_NAME, patch.first_name.clone());
        put(&mut wire, LAST_NAME, patch.last_name.clone());
        put(&mut wire, EMAIL, patch.email.clone());
        put(&mut wire, PHONE, patch.phone.clone());
        put(&mut wire, ROLE, patch.role.clone());
        put(&mut wire, DEPARTMENT, patch.department.clone());
        put(&mut wire, JOIN_DATE, patch.join_date.clone());
        put(&mut wire, STATUS, patch.status.as_ref().map(EmployeeStatus::as_str));
        put(&mut wire, PHOTO_URL, patch.photo_url.clone());

        Ok(wire)
    }
}

impl Validate for NewEmployee {
    fn validate(&self) -> Result<()> {
        require_text("firstName", &self.first_name)?;
        require_text("lastName", &self.last_name)?;
        Ok(())
    }
}

impl<S: RecordStore> Repository<Employee, S> {
    pub async fn get_by_department(&self, department: &str) -> Vec<Employee> {
        let query = Employee::select().where_equal(DEPARTMENT, department);
        self.list_where(query, "by department").await
    }

    /// Substring match over first name, last name, email, department and
    /// role, OR-combined. Case handling is the store's `Contains` semantics.
    pub async fn search(&self, needle: &str) -> Vec<Employee> {
        let query = Employee::select().where_any_contains(SEARCH_FIELDS, needle);
        self.list_where(query, "by search").await
    }
}
