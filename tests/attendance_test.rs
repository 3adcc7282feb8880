use anyhow::Result;
use serde_json::json;
use staffhub::core::attendance::TABLE as ATTENDANCE;
use staffhub::{
    AttendanceStatus, HrError, InMemoryStore, NewAttendance, Record, RecordingNotifier, StaffHub,
};
use std::sync::Arc;

fn hub() -> (StaffHub<InMemoryStore>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    (StaffHub::new(InMemoryStore::new(), notifier.clone()), notifier)
}

async fn seed_day(hub: &StaffHub<InMemoryStore>) {
    let rows = [
        json!({"employee_id_c": {"Id": 7, "Name": "Ada Lovelace"}, "employee_name_c": "Ada Lovelace",
               "date_c": "2024-03-01", "check_in_c": "09:02", "status_c": "present"}),
        json!({"employee_id_c": 8, "employee_name_c": "Alan Turing",
               "date_c": "2024-03-01", "status_c": "absent"}),
        json!({"employee_id_c": 7, "employee_name_c": "Ada Lovelace",
               "date_c": "2024-03-02", "check_in_c": "09:40", "status_c": "late"}),
    ];
    for row in rows {
        hub.attendance
            .store()
            .seed(ATTENDANCE, Record::from(row))
            .await;
    }
}

#[tokio::test]
async fn test_get_by_date() -> Result<()> {
    let (hub, _notifier) = hub();
    seed_day(&hub).await;

    let first_day = hub.attendance.get_by_date("2024-03-01").await;
    assert_eq!(first_day.len(), 2);
    assert!(hub.attendance.get_by_date("2024-03-03").await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_get_by_employee_handles_both_key_forms() -> Result<()> {
    let (hub, _notifier) = hub();
    seed_day(&hub).await;

    let ada = hub.attendance.get_by_employee("7").await;
    assert_eq!(ada.len(), 2);
    assert!(ada.iter().all(|r| r.employee_id == "7"));

    let alan = hub.attendance.get_by_employee("8").await;
    assert_eq!(alan.len(), 1);
    assert_eq!(alan[0].status, AttendanceStatus::Absent);
    Ok(())
}

#[tokio::test]
async fn test_update_status_changes_only_status() -> Result<()> {
    let (hub, notifier) = hub();
    seed_day(&hub).await;
    let record = hub.attendance.get_by_date("2024-03-02").await.remove(0);

    let updated = hub
        .attendance
        .update_status(record.id, AttendanceStatus::Present)
        .await?;

    assert_eq!(updated.status, AttendanceStatus::Present);
    assert_eq!(updated.check_in, record.check_in);
    assert_eq!(updated.employee_id, "7");
    assert!(notifier.messages().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_update_status_of_missing_record_fails() -> Result<()> {
    let (hub, notifier) = hub();

    let err = hub
        .attendance
        .update_status(55, AttendanceStatus::Late)
        .await
        .unwrap_err();

    assert!(matches!(err, HrError::RecordRejectedError { .. }));
    assert_eq!(notifier.messages(), vec!["Record 55 not found".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_create_derives_name_and_defaults_status() -> Result<()> {
    let (hub, _notifier) = hub();

    let created = hub
        .attendance
        .create(NewAttendance {
            employee_id: "7".to_string(),
            employee_name: "Ada Lovelace".to_string(),
            date: "2024-03-04".to_string(),
            check_in: Some("08:55".to_string()),
            ..Default::default()
        })
        .await?;

    assert_eq!(created.status, AttendanceStatus::Present);
    let raw = hub
        .attendance
        .store()
        .raw(ATTENDANCE, created.id)
        .await
        .unwrap();
    assert_eq!(raw.get("Name"), Some(&json!("Ada Lovelace - 2024-03-04")));
    assert_eq!(raw.get("employee_id_c"), Some(&json!(7)));
    Ok(())
}

#[tokio::test]
async fn test_non_numeric_employee_rejected_before_store() -> Result<()> {
    let (hub, notifier) = hub();

    let err = hub
        .attendance
        .create(NewAttendance {
            employee_id: "ada".to_string(),
            employee_name: "Ada Lovelace".to_string(),
            date: "2024-03-04".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, HrError::ValidationError { ref field, .. } if field == "employeeId"));
    assert_eq!(notifier.messages().len(), 1);
    assert!(hub.attendance.list_all().await.is_empty());
    Ok(())
}
