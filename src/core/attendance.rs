use crate::core::mapper::{
    foreign_key, foreign_key_to_wire, put, record_id, start_patch, text, text_or_empty, Entity, NAME,
};
use crate::core::repository::Repository;
use crate::domain::model::{
    AttendancePatch, AttendanceRecord, AttendanceStatus, NewAttendance, Record, RecordId,
};
use crate::domain::ports::RecordStore;
use crate::utils::error::Result;
use crate::utils::validation::{parse_record_id, require_text, Validate};

pub const TABLE: &str = "attendance_c";

const EMPLOYEE_ID: &str = "employee_id_c";
const EMPLOYEE_NAME: &str = "employee_name_c";
const DEPARTMENT: &str = "department_c";
const DATE: &str = "date_c";
const CHECK_IN: &str = "check_in_c";
const CHECK_OUT: &str = "check_out_c";
const STATUS: &str = "status_c";
const NOTES: &str = "notes_c";

pub type AttendanceRepository<S> = Repository<AttendanceRecord, S>;

impl Entity for AttendanceRecord {
    const TABLE: &'static str = TABLE;
    const LABEL: &'static str = "attendance record";
    const FIELDS: &'static [&'static str] = &[
        NAME, EMPLOYEE_ID, EMPLOYEE_NAME, DEPARTMENT, DATE, CHECK_IN, CHECK_OUT, STATUS, NOTES,
    ];

    type New = NewAttendance;
    type Patch = AttendancePatch;

    fn from_wire(record: &Record) -> Result<Self> {
        Ok(AttendanceRecord {
            id: record_id(record)?,
            employee_id: foreign_key(record, EMPLOYEE_ID),
            employee_name: text_or_empty(record, EMPLOYEE_NAME),
            department: text(record, DEPARTMENT),
            date: text_or_empty(record, DATE),
            check_in: text(record, CHECK_IN),
            check_out: text(record, CHECK_OUT),
            status: text(record, STATUS)
                .map(AttendanceStatus::from)
                .unwrap_or_default(),
            notes: text(record, NOTES),
        })
    }

    fn to_wire_patch(id: Option<RecordId>, patch: &AttendancePatch) -> Result<Record> {
        let mut wire = start_patch(id)?;

        if patch.employee_name.is_some() || patch.date.is_some() {
            let name = format!(
                "{} - {}",
                patch.employee_name.as_deref().unwrap_or(""),
                patch.date.as_deref().unwrap_or("")
            );
            wire.insert(NAME, name);
        }
        if let Some(employee_id) = &patch.employee_id {
            wire.insert(EMPLOYEE_ID, foreign_key_to_wire("employeeId", employee_id)?);
        }
        put(&mut wire, EMPLOYEE_NAME, patch.employee_name.clone());
        put(&mut wire, DEPARTMENT, patch.department.clone());
        put(&mut wire, DATE, patch.date.clone());
        put(&mut wire, CHECK_IN, patch.check_in.clone());
        put(&mut wire, CHECK_OUT, patch.check_out.clone());
        put(&mut wire, STATUS, patch.status.as_ref().map(AttendanceStatus::as_str));
        put(&mut wire, NOTES, patch.notes.clone());

        Ok(wire)
    }
}

impl Validate for NewAttendance {
    fn validate(&self) -> Result<()> {
        parse_record_id("employeeId", &self.employee_id)?;
        require_text("employeeName", &self.employee_name)?;
        require_text("date", &self.date)?;
        Ok(())
    }
}

impl<S: RecordStore> Repository<AttendanceRecord, S> {
    pub async fn get_by_date(&self, date: &str) -> Vec<AttendanceRecord> {
        let query = AttendanceRecord::select().where_equal(DATE, date);
        self.list_where(query, "by date").await
    }

    pub async fn get_by_employee(&self, employee_id: &str) -> Vec<AttendanceRecord> {
        let id = match parse_record_id("employeeId", employee_id) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Not querying attendance: {}", e);
                return Vec::new();
            }
        };
        let query = AttendanceRecord::select().where_equal(EMPLOYEE_ID, id);
        self.list_where(query, "by employee").await
    }

    pub async fn update_status(
        &self,
        id: RecordId,
        status: AttendanceStatus,
    ) -> Result<AttendanceRecord> {
        let patch = AttendancePatch {
            status: Some(status),
            ..Default::default()
        };
        self.update(id, patch).await
    }
}
