use crate::core::repository::Repository;
use crate::domain::model::{AttendanceRecord, Employee, LeaveRequest};
use crate::domain::ports::{Notifier, RecordStore};
use std::sync::Arc;

/// The three HR repositories wired to one store and one notifier.
pub struct StaffHub<S: RecordStore> {
    pub employees: Repository<Employee, Arc<S>>,
    pub attendance: Repository<AttendanceRecord, Arc<S>>,
    pub leave: Repository<LeaveRequest, Arc<S>>,
}

impl<S: RecordStore> StaffHub<S> {
    pub fn new(store: S, notifier: Arc<dyn Notifier>) -> Self {
        let store = Arc::new(store);
        Self {
            employees: Repository::new(Arc::clone(&store), Arc::clone(&notifier)),
            attendance: Repository::new(Arc::clone(&store), Arc::clone(&notifier)),
            leave: Repository::new(store, notifier),
        }
    }
}
