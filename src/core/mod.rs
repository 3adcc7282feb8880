pub mod attendance;
pub mod employees;
pub mod hub;
pub mod leave;
pub mod mapper;
pub mod repository;

pub use crate::domain::model::{
    AttendancePatch, AttendanceRecord, AttendanceStatus, Employee, EmployeePatch, EmployeeStatus,
    LeavePatch, LeaveRequest, LeaveStatus, NewAttendance, NewEmployee, NewLeaveRequest, Record,
    RecordId,
};
pub use crate::domain::ports::{Notifier, RecordStore};
pub use crate::utils::error::Result;
pub use mapper::Entity;
pub use repository::{BatchFailure, BatchOutcome, Repository};
