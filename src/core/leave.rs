use crate::core::mapper::{
    foreign_key, foreign_key_to_wire, put, record_id, start_patch, text, text_or_empty, Entity, NAME,
};
use crate::core::repository::Repository;
use crate::domain::model::{LeavePatch, LeaveRequest, LeaveStatus, NewLeaveRequest, Record, RecordId};
use crate::domain::ports::RecordStore;
use crate::utils::error::{HrError, Result};
use crate::utils::validation::{parse_record_id, require_text, Validate};

pub const TABLE: &str = "leave_request_c";

const EMPLOYEE_ID: &str = "employee_id_c";
const EMPLOYEE_NAME: &str = "employee_name_c";
const LEAVE_TYPE: &str = "type_c";
const START_DATE: &str = "start_date_c";
const END_DATE: &str = "end_date_c";
const REASON: &str = "reason_c";
const STATUS: &str = "status_c";
const APPROVED_BY: &str = "approved_by_c";
const CREATED_AT: &str = "created_at_c";

pub type LeaveRepository<S> = Repository<LeaveRequest, S>;

impl Entity for LeaveRequest {
    const TABLE: &'static str = TABLE;
    const LABEL: &'static str = "leave request";
    const FIELDS: &'static [&'static str] = &[
        NAME,
        EMPLOYEE_NAME,
        LEAVE_TYPE,
        START_DATE,
        END_DATE,
        REASON,
        STATUS,
        APPROVED_BY,
        CREATED_AT,
        EMPLOYEE_ID,
    ];

    type New = NewLeaveRequest;
    type Patch = LeavePatch;

    fn from_wire(record: &Record) -> Result<Self> {
        Ok(LeaveRequest {
            id: record_id(record)?,
            employee_id: foreign_key(record, EMPLOYEE_ID),
            employee_name: text_or_empty(record, EMPLOYEE_NAME),
            leave_type: text_or_empty(record, LEAVE_TYPE),
            start_date: text_or_empty(record, START_DATE),
            end_date: text_or_empty(record, END_DATE),
            reason: text(record, REASON),
            status: text(record, STATUS).map(LeaveStatus::from).unwrap_or_default(),
            approved_by: text(record, APPROVED_BY),
            created_at: text(record, CREATED_AT),
        })
    }

    fn to_wire_patch(id: Option<RecordId>, patch: &LeavePatch) -> Result<Record> {
        let mut wire = start_patch(id)?;

        if patch.employee_name.is_some() || patch.leave_type.is_some() {
            let name = format!(
                "{} - {} Leave",
                patch.employee_name.as_deref().unwrap_or(""),
                patch.leave_type.as_deref().unwrap_or("")
            );
            wire.insert(NAME, name);
        }
        if let Some(employee_id) = &patch.employee_id {
            wire.insert(EMPLOYEE_ID, foreign_key_to_wire("employeeId", employee_id)?);
        }
        put(&mut wire, EMPLOYEE_NAME, patch.employee_name.clone());
        put(&mut wire, LEAVE_TYPE, patch.leave_type.clone());
        put(&mut wire, START_DATE, patch.start_date.clone());
        put(&mut wire, END_DATE, patch.end_date.clone());
        put(&mut wire, REASON, patch.reason.clone());
        put(&mut wire, STATUS, patch.status.as_ref().map(LeaveStatus::as_str));
        put(&mut wire, APPROVED_BY, patch.approved_by.clone());
        put(&mut wire, CREATED_AT, patch.created_at.clone());

        Ok(wire)
    }
}

impl Validate for NewLeaveRequest {
    fn validate(&self) -> Result<()> {
        parse_record_id("employeeId", &self.employee_id)?;
        require_text("employeeName", &self.employee_name)?;
        require_text("type", &self.leave_type)?;
        require_text("startDate", &self.start_date)?;
        require_text("endDate", &self.end_date)?;
        Ok(())
    }
}

impl<S: RecordStore> Repository<LeaveRequest, S> {
    pub async fn get_by_employee(&self, employee_id: &str) -> Vec<LeaveRequest> {
        let id = match parse_record_id("employeeId", employee_id) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Not querying leave requests: {}", e);
                return Vec::new();
            }
        };
        let query = LeaveRequest::select().where_equal(EMPLOYEE_ID, id);
        self.list_where(query, "by employee").await
    }

    pub async fn get_by_status(&self, status: &LeaveStatus) -> Vec<LeaveRequest> {
        let query = LeaveRequest::select().where_equal(STATUS, status.as_str());
        self.list_where(query, "by status").await
    }

    pub async fn approve(&self, id: RecordId, approver: &str) -> Result<LeaveRequest> {
        self.decide(id, approver, LeaveStatus::Approved).await
    }

    pub async fn reject(&self, id: RecordId, approver: &str) -> Result<LeaveRequest> {
        self.decide(id, approver, LeaveStatus::Rejected).await
    }

    /// Moves a pending request to a terminal state, recording who decided.
    /// Anything other than `pending -> approved|rejected` is refused before
    /// the write.
    async fn decide(
        &self,
        id: RecordId,
        approver: &str,
        outcome: LeaveStatus,
    ) -> Result<LeaveRequest> {
        let action = match outcome {
            LeaveStatus::Approved => "approve",
            _ => "reject",
        };

        require_text("approvedBy", approver).map_err(|e| self.report(action, e))?;

        let current = self
            .find(id)
            .await
            .map_err(|e| self.report(action, e))?
            .ok_or_else(|| {
                self.report(
                    action,
                    HrError::NotFoundError {
                        entity: "Leave request".to_string(),
                        id,
                    },
                )
            })?;

        if current.status != LeaveStatus::Pending {
            return Err(self.report(
                action,
                HrError::InvalidTransitionError {
                    id,
                    from: current.status.to_string(),
                    to: outcome.to_string(),
                },
            ));
        }

        let patch = LeavePatch {
            status: Some(outcome),
            approved_by: Some(approver.to_string()),
            ..Default::default()
        };
        let decided = self.update(id, patch).await?;
        tracing::info!("Leave request {} {}d by {}", id, action, approver);
        Ok(decided)
    }
}
