use crate::core::mapper::Entity;
use crate::domain::model::{Record, RecordId};
use crate::domain::ports::{Notifier, RecordStore};
use crate::domain::query::{BatchResponse, Query, RecordResult};
use crate::utils::error::{HrError, Result};
use crate::utils::validation::{validate_record_id, Validate};
use std::marker::PhantomData;
use std::sync::Arc;

const NO_RESULT: &str = "store returned no result for this record";

/// One failed record in a batch write, by its position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    pub index: usize,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome<T> {
    pub succeeded: Vec<T>,
    pub failed: Vec<BatchFailure>,
}

impl<T> Default for BatchOutcome<T> {
    fn default() -> Self {
        BatchOutcome {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T> BatchOutcome<T> {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum WriteKind {
    Create,
    Update,
}

impl WriteKind {
    fn verb(self) -> &'static str {
        match self {
            WriteKind::Create => "create",
            WriteKind::Update => "update",
        }
    }
}

/// Remote-backed collection of one entity type.
///
/// Nothing is cached: every read goes to the store, and the store may be
/// eventually consistent, so a `list_all` right after a `create` is not
/// guaranteed to include the new record.
///
/// Reads never fail from the caller's point of view (`list_all`, `get_by_id`
/// and the filtered reads degrade to empty results). Use [`query`] and
/// [`find`] when the failure itself matters. Writes return `Err` carrying the
/// store's message and notify the user once per failure.
///
/// [`query`]: Repository::query
/// [`find`]: Repository::find
pub struct Repository<E, S> {
    store: S,
    notifier: Arc<dyn Notifier>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity, S: RecordStore> Repository<E, S> {
    pub fn new(store: S, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetches and maps rows, reporting store failures as `Err`.
    pub async fn query(&self, query: &Query) -> Result<Vec<E>> {
        tracing::debug!("Fetching {} records from {}", E::LABEL, E::TABLE);
        let response = self.store.fetch(E::TABLE, query).await?;

        if !response.success {
            return Err(HrError::StoreError {
                message: response
                    .message
                    .unwrap_or_else(|| format!("Failed to fetch {} records", E::LABEL)),
            });
        }

        Ok(self.map_rows(response.data.unwrap_or_default()))
    }

    /// Looks up one record. `Ok(None)` is a genuine absence; store or
    /// transport failures are `Err`.
    pub async fn find(&self, id: RecordId) -> Result<Option<E>> {
        let id = validate_record_id(id)?;
        let response = self.store.fetch_by_id(E::TABLE, id, &E::select()).await?;

        if !response.success {
            return Err(HrError::StoreError {
                message: response
                    .message
                    .unwrap_or_else(|| format!("Failed to fetch {} {}", E::LABEL, id)),
            });
        }

        response.data.as_ref().map(E::from_wire).transpose()
    }

    pub async fn list_all(&self) -> Vec<E> {
        match self.query(&E::select()).await {
            Ok(entities) => entities,
            Err(e) => {
                tracing::error!("Error fetching {} records: {}", E::LABEL, e);
                self.notifier.error(&e.user_friendly_message());
                Vec::new()
            }
        }
    }

    /// Filtered read used by the entity workflows. Failures are logged only.
    pub async fn list_where(&self, query: Query, context: &str) -> Vec<E> {
        match self.query(&query).await {
            Ok(entities) => entities,
            Err(e) => {
                tracing::error!("Error fetching {} records {}: {}", E::LABEL, context, e);
                Vec::new()
            }
        }
    }

    pub async fn get_by_id(&self, id: RecordId) -> Option<E> {
        match self.find(id).await {
            Ok(found) => found,
            Err(e) => {
                tracing::error!("Error fetching {} {}: {}", E::LABEL, id, e);
                None
            }
        }
    }

    pub async fn create(&self, input: E::New) -> Result<E> {
        let outcome = self.create_many(vec![input]).await?;
        self.single(WriteKind::Create, outcome)
    }

    /// Creates several records in one call. Every input is validated first;
    /// one invalid input fails the whole call before anything is sent.
    pub async fn create_many(&self, inputs: Vec<E::New>) -> Result<BatchOutcome<E>> {
        let records = inputs
            .into_iter()
            .map(|input| {
                input.validate()?;
                E::to_wire_patch(None, &input.into())
            })
            .collect::<Result<Vec<_>>>();
        let records = self.surface(WriteKind::Create.verb(), records)?;

        self.submit(WriteKind::Create, records).await
    }

    pub async fn update(&self, id: RecordId, patch: E::Patch) -> Result<E> {
        let outcome = self.update_many(vec![(id, patch)]).await?;
        self.single(WriteKind::Update, outcome)
    }

    pub async fn update_many(&self, patches: Vec<(RecordId, E::Patch)>) -> Result<BatchOutcome<E>> {
        let records = patches
            .iter()
            .map(|(id, patch)| E::to_wire_patch(Some(*id), patch))
            .collect::<Result<Vec<_>>>();
        let records = self.surface(WriteKind::Update.verb(), records)?;

        self.submit(WriteKind::Update, records).await
    }

    /// Returns `false` on any failure, including an id the store does not
    /// know. Never errors.
    pub async fn delete(&self, id: RecordId) -> bool {
        match self.delete_many(vec![id]).await {
            Ok(outcome) => outcome.is_complete(),
            Err(_) => false,
        }
    }

    pub async fn delete_many(&self, ids: Vec<RecordId>) -> Result<BatchOutcome<RecordId>> {
        let ids = ids
            .into_iter()
            .map(validate_record_id)
            .collect::<Result<Vec<_>>>();
        let ids = self.surface("delete", ids)?;

        let response = self.store.delete_batch(E::TABLE, ids.clone()).await;
        let response = self.surface("delete", response)?;
        self.check_envelope("delete", &response)?;

        let mut outcome = BatchOutcome::default();
        let results = response.results.unwrap_or_default();
        let returned = results.len();
        for (index, result) in results.into_iter().enumerate() {
            match ids.get(index) {
                Some(id) if result.success => outcome.succeeded.push(*id),
                Some(_) => outcome.failed.push(self.record_failure("delete", index, result)),
                None => tracing::warn!("Ignoring extra delete result #{}", index),
            }
        }
        self.fail_unanswered("delete", returned, ids.len(), &mut outcome);

        tracing::info!(
            "Deleted {} {} record(s), {} failed",
            outcome.succeeded.len(),
            E::LABEL,
            outcome.failed.len()
        );
        Ok(outcome)
    }

    async fn submit(&self, kind: WriteKind, records: Vec<Record>) -> Result<BatchOutcome<E>> {
        let submitted = records.len();
        tracing::debug!(
            "Submitting {} {} record(s) to {} for {}",
            submitted,
            E::LABEL,
            E::TABLE,
            kind.verb()
        );

        let response = match kind {
            WriteKind::Create => self.store.create_batch(E::TABLE, records).await,
            WriteKind::Update => self.store.update_batch(E::TABLE, records).await,
        };
        let response = self.surface(kind.verb(), response)?;
        self.check_envelope(kind.verb(), &response)?;

        let mut outcome = BatchOutcome::default();
        let results = response.results.unwrap_or_default();
        let returned = results.len();
        for (index, result) in results.into_iter().enumerate() {
            if index >= submitted {
                tracing::warn!("Ignoring extra {} result #{}", kind.verb(), index);
                continue;
            }
            if !result.success {
                outcome.failed.push(self.record_failure(kind.verb(), index, result));
                continue;
            }

            let mapped = match &result.data {
                Some(row) => E::from_wire(row),
                None => Err(HrError::MappingError {
                    message: format!("store returned no data for the {}d record", kind.verb()),
                }),
            };
            match mapped {
                Ok(entity) => outcome.succeeded.push(entity),
                Err(e) => {
                    outcome
                        .failed
                        .push(self.record_failure(kind.verb(), index, RecordResult::failed(e.to_string())));
                }
            }
        }
        self.fail_unanswered(kind.verb(), returned, submitted, &mut outcome);

        tracing::info!(
            "{} of {} {} record(s) {}d",
            outcome.succeeded.len(),
            submitted,
            E::LABEL,
            kind.verb()
        );
        Ok(outcome)
    }

    fn check_envelope(&self, action: &str, response: &BatchResponse) -> Result<()> {
        if response.success {
            return Ok(());
        }
        let message = response
            .message
            .clone()
            .unwrap_or_else(|| format!("Failed to {} {}", action, E::LABEL));
        Err(self.report(action, HrError::StoreError { message }))
    }

    fn record_failure(&self, action: &str, index: usize, result: RecordResult) -> BatchFailure {
        tracing::error!(
            "Failed to {} {} record #{}: {}",
            action,
            E::LABEL,
            index,
            result.message.as_deref().unwrap_or("no message")
        );
        if let Some(message) = &result.message {
            self.notifier.error(message);
        }
        BatchFailure {
            index,
            message: result.message,
        }
    }

    /// Every submitted record the store gave no result for counts as failed.
    fn fail_unanswered<T>(
        &self,
        action: &str,
        returned: usize,
        submitted: usize,
        outcome: &mut BatchOutcome<T>,
    ) {
        for index in returned..submitted {
            outcome.failed.push(self.record_failure(
                action,
                index,
                RecordResult::failed(NO_RESULT),
            ));
        }
    }

    /// Collapses a one-record outcome. Failure messages were already
    /// notified per record.
    fn single(&self, kind: WriteKind, mut outcome: BatchOutcome<E>) -> Result<E> {
        if !outcome.succeeded.is_empty() {
            return Ok(outcome.succeeded.remove(0));
        }

        let messages: Vec<String> = outcome.failed.into_iter().filter_map(|f| f.message).collect();
        if messages.is_empty() {
            let message = format!("Failed to {} {}", kind.verb(), E::LABEL);
            self.notifier.error(&message);
            return Err(HrError::RecordRejectedError { message });
        }
        Err(HrError::RecordRejectedError {
            message: messages.join("; "),
        })
    }

    fn surface<T>(&self, action: &str, result: Result<T>) -> Result<T> {
        result.map_err(|e| self.report(action, e))
    }

    /// Logs a failed user-initiated operation and notifies the user.
    pub(crate) fn report(&self, action: &str, err: HrError) -> HrError {
        tracing::error!("Error trying to {} {}: {}", action, E::LABEL, err);
        self.notifier.error(&err.user_friendly_message());
        err
    }

    fn map_rows(&self, rows: Vec<Record>) -> Vec<E> {
        rows.iter()
            .filter_map(|row| match E::from_wire(row) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    tracing::warn!("Skipping {} row: {}", E::LABEL, e);
                    None
                }
            })
            .collect()
    }
}
