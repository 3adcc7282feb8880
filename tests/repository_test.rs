use anyhow::Result;
use serde_json::json;
use staffhub::core::employees::TABLE as EMPLOYEES;
use staffhub::{
    Employee, EmployeePatch, EmployeeStatus, HrError, InMemoryStore, NewEmployee, Record,
    RecordingNotifier, Repository,
};
use std::sync::Arc;

fn repository() -> (
    Repository<Employee, Arc<InMemoryStore>>,
    Arc<InMemoryStore>,
    Arc<RecordingNotifier>,
) {
    let store = Arc::new(InMemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let repo = Repository::new(Arc::clone(&store), notifier.clone());
    (repo, store, notifier)
}

fn ada() -> NewEmployee {
    NewEmployee {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: Some("ada@x.co".to_string()),
        department: Some("Engineering".to_string()),
        join_date: Some("2024-01-10".to_string()),
        ..Default::default()
    }
}

async fn seed_staff(store: &InMemoryStore) {
    let rows = [
        json!({"first_name_c": "Grace", "last_name_c": "Hopper", "email_c": "grace@x.co",
               "department_c": "Research", "role_c": "Engineering Lead", "status_c": "active"}),
        json!({"first_name_c": "Alan", "last_name_c": "Turing", "email_c": "alan@x.co",
               "department_c": "Engineering", "role_c": "Analyst", "status_c": "active"}),
        json!({"first_name_c": "Mary", "last_name_c": "Jackson", "email_c": "mary@x.co",
               "department_c": "Finance", "role_c": "Controller", "status_c": "inactive"}),
    ];
    for row in rows {
        store.seed(EMPLOYEES, Record::from(row)).await;
    }
}

#[tokio::test]
async fn test_create_applies_default_status_and_wire_name() -> Result<()> {
    let (repo, store, notifier) = repository();

    let created = repo.create(ada()).await?;

    assert_eq!(created.status, EmployeeStatus::Active);
    assert_eq!(created.first_name, "Ada");
    let raw = store.raw(EMPLOYEES, created.id).await.unwrap();
    assert_eq!(raw.get("Name"), Some(&json!("Ada Lovelace")));
    assert!(notifier.messages().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_missing_name_before_remote_call() -> Result<()> {
    let (repo, _store, notifier) = repository();

    let input = NewEmployee {
        last_name: String::new(),
        ..ada()
    };
    let err = repo.create(input).await.unwrap_err();

    assert!(matches!(err, HrError::ValidationError { ref field, .. } if field == "lastName"));
    assert!(repo.list_all().await.is_empty());
    assert_eq!(notifier.messages().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_partial_update_preserves_other_fields() -> Result<()> {
    let (repo, _store, _notifier) = repository();
    let created = repo.create(ada()).await?;

    let patch = EmployeePatch {
        status: Some(EmployeeStatus::Inactive),
        ..Default::default()
    };
    repo.update(created.id, patch).await?;

    let reloaded = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(reloaded.status, EmployeeStatus::Inactive);
    assert_eq!(
        Employee {
            status: EmployeeStatus::Active,
            ..reloaded
        },
        created
    );
    Ok(())
}

#[tokio::test]
async fn test_update_of_missing_record_surfaces_store_message() -> Result<()> {
    let (repo, _store, notifier) = repository();

    let patch = EmployeePatch {
        phone: Some("555-0199".to_string()),
        ..Default::default()
    };
    let err = repo.update(404, patch).await.unwrap_err();

    assert!(err.to_string().contains("Record 404 not found"));
    assert_eq!(notifier.messages(), vec!["Record 404 not found".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_delete_returns_false_for_unknown_identity() -> Result<()> {
    let (repo, _store, _notifier) = repository();
    let created = repo.create(ada()).await?;

    assert!(repo.delete(created.id).await);
    assert!(!repo.delete(created.id).await);
    assert!(!repo.delete(0).await);
    assert!(repo.get_by_id(created.id).await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_search_matches_any_field() -> Result<()> {
    let (repo, store, _notifier) = repository();
    seed_staff(&store).await;

    let mut names: Vec<String> = repo
        .search("Engineering")
        .await
        .iter()
        .map(Employee::full_name)
        .collect();
    names.sort();

    assert_eq!(names, vec!["Alan Turing", "Grace Hopper"]);
    assert_eq!(repo.search("mary@").await.len(), 1);
    assert!(repo.search("nobody").await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_get_by_department_is_exact() -> Result<()> {
    let (repo, store, _notifier) = repository();
    seed_staff(&store).await;

    let engineering = repo.get_by_department("Engineering").await;
    assert_eq!(engineering.len(), 1);
    assert_eq!(engineering[0].last_name, "Turing");
    Ok(())
}

#[tokio::test]
async fn test_list_all_degrades_to_empty_and_notifies() -> Result<()> {
    let (repo, store, notifier) = repository();
    seed_staff(&store).await;

    store.fail_next("service unavailable").await;
    assert!(repo.list_all().await.is_empty());
    assert_eq!(notifier.messages(), vec!["service unavailable".to_string()]);

    assert_eq!(repo.list_all().await.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_filtered_reads_fail_silently() -> Result<()> {
    let (repo, store, notifier) = repository();
    seed_staff(&store).await;

    store.fail_next("service unavailable").await;
    assert!(repo.get_by_department("Finance").await.is_empty());
    assert!(notifier.messages().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_strict_reads_distinguish_failure_from_absence() -> Result<()> {
    let (repo, store, _notifier) = repository();

    assert!(repo.find(99).await?.is_none());

    store.fail_next("service unavailable").await;
    assert!(matches!(
        repo.find(99).await,
        Err(HrError::StoreError { .. })
    ));

    store.fail_next("service unavailable").await;
    assert!(repo.get_by_id(99).await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_update_many_reports_partial_failure() -> Result<()> {
    let (repo, _store, notifier) = repository();
    let created = repo.create(ada()).await?;

    let role = |r: &str| EmployeePatch {
        role: Some(r.to_string()),
        ..Default::default()
    };
    let outcome = repo
        .update_many(vec![(created.id, role("Architect")), (77, role("Ghost"))])
        .await?;

    assert_eq!(outcome.succeeded.len(), 1);
    assert_eq!(outcome.succeeded[0].role.as_deref(), Some("Architect"));
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].index, 1);
    assert_eq!(notifier.messages(), vec!["Record 77 not found".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_top_level_write_failure_is_an_error() -> Result<()> {
    let (repo, store, notifier) = repository();

    store.fail_next("quota exceeded").await;
    let err = repo.create(ada()).await.unwrap_err();

    assert!(matches!(err, HrError::StoreError { ref message } if message == "quota exceeded"));
    assert_eq!(notifier.messages(), vec!["quota exceeded".to_string()]);
    Ok(())
}
