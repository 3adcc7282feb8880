use anyhow::Result;
use serde_json::json;
use staffhub::core::leave::TABLE as LEAVE;
use staffhub::{
    HrError, InMemoryStore, LeaveRequest, LeaveStatus, NewLeaveRequest, Record, RecordId,
    RecordingNotifier, StaffHub,
};
use std::sync::Arc;

fn hub() -> (StaffHub<InMemoryStore>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    (StaffHub::new(InMemoryStore::new(), notifier.clone()), notifier)
}

async fn seed_request(hub: &StaffHub<InMemoryStore>, status: &str) -> RecordId {
    let row = json!({
        "Name": "Grace Hopper - Annual Leave",
        "employee_id_c": {"Id": 7, "Name": "Grace Hopper"},
        "employee_name_c": "Grace Hopper",
        "type_c": "Annual",
        "start_date_c": "2024-05-01",
        "end_date_c": "2024-05-03",
        "reason_c": "Family visit",
        "status_c": status,
        "created_at_c": "2024-04-20T08:00:00.000Z"
    });
    hub.leave.store().seed(LEAVE, Record::from(row)).await
}

#[tokio::test]
async fn test_approve_pending_request() -> Result<()> {
    let (hub, notifier) = hub();
    let id = seed_request(&hub, "pending").await;
    let before = hub.leave.find(id).await?.unwrap();

    let approved = hub.leave.approve(id, "mgr_jane").await?;

    assert_eq!(approved.status, LeaveStatus::Approved);
    assert_eq!(approved.approved_by.as_deref(), Some("mgr_jane"));
    assert_eq!(
        LeaveRequest {
            status: LeaveStatus::Pending,
            approved_by: None,
            ..approved
        },
        before
    );
    assert!(notifier.messages().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_reject_pending_request() -> Result<()> {
    let (hub, _notifier) = hub();
    let id = seed_request(&hub, "pending").await;

    let rejected = hub.leave.reject(id, "mgr_omar").await?;

    assert_eq!(rejected.status, LeaveStatus::Rejected);
    assert_eq!(rejected.approved_by.as_deref(), Some("mgr_omar"));
    let raw = hub.leave.store().raw(LEAVE, id).await.unwrap();
    assert_eq!(raw.get("status_c"), Some(&json!("rejected")));
    Ok(())
}

#[tokio::test]
async fn test_decided_request_cannot_be_decided_again() -> Result<()> {
    let (hub, notifier) = hub();
    let id = seed_request(&hub, "approved").await;

    let err = hub.leave.reject(id, "mgr_jane").await.unwrap_err();

    assert!(matches!(
        err,
        HrError::InvalidTransitionError { ref from, ref to, .. } if from == "approved" && to == "rejected"
    ));
    assert_eq!(notifier.messages().len(), 1);
    let raw = hub.leave.store().raw(LEAVE, id).await.unwrap();
    assert_eq!(raw.get("status_c"), Some(&json!("approved")));
    Ok(())
}

#[tokio::test]
async fn test_missing_request_is_not_found() -> Result<()> {
    let (hub, notifier) = hub();

    let err = hub.leave.approve(42, "mgr_jane").await.unwrap_err();

    assert!(matches!(err, HrError::NotFoundError { id: 42, .. }));
    assert_eq!(notifier.messages().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_blank_approver_is_refused() -> Result<()> {
    let (hub, _notifier) = hub();
    let id = seed_request(&hub, "pending").await;

    let err = hub.leave.approve(id, "   ").await.unwrap_err();

    assert!(matches!(err, HrError::ValidationError { ref field, .. } if field == "approvedBy"));
    assert_eq!(hub.leave.find(id).await?.unwrap().status, LeaveStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn test_filters_by_status_and_employee() -> Result<()> {
    let (hub, _notifier) = hub();
    seed_request(&hub, "pending").await;
    seed_request(&hub, "approved").await;
    seed_request(&hub, "pending").await;

    assert_eq!(hub.leave.get_by_status(&LeaveStatus::Pending).await.len(), 2);
    assert_eq!(hub.leave.get_by_status(&LeaveStatus::Rejected).await.len(), 0);

    let for_grace = hub.leave.get_by_employee("7").await;
    assert_eq!(for_grace.len(), 3);
    assert!(for_grace.iter().all(|r| r.employee_id == "7"));
    assert!(hub.leave.get_by_employee("8").await.is_empty());
    assert!(hub.leave.get_by_employee("not-a-number").await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_new_request_starts_pending_with_timestamp() -> Result<()> {
    let (hub, _notifier) = hub();

    let created = hub
        .leave
        .create(NewLeaveRequest {
            employee_id: "7".to_string(),
            employee_name: "Grace Hopper".to_string(),
            leave_type: "Sick".to_string(),
            start_date: "2024-06-10".to_string(),
            end_date: "2024-06-11".to_string(),
            ..Default::default()
        })
        .await?;

    assert_eq!(created.status, LeaveStatus::Pending);
    assert_eq!(created.employee_id, "7");
    assert!(created.created_at.is_some());
    let raw = hub.leave.store().raw(LEAVE, created.id).await.unwrap();
    assert_eq!(raw.get("Name"), Some(&json!("Grace Hopper - Sick Leave")));
    assert_eq!(raw.get("employee_id_c"), Some(&json!(7)));
    Ok(())
}
