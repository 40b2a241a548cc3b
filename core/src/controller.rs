//! Request handling for to-do items.
//!
//! # Design
//! `ItemController` is the only place that decides what a repository result
//! means for the caller. Every operation runs its repository work through
//! [`contain`], which turns both `Err` values and panics into
//! `Outcome::InternalFailure` after logging them, so no storage fault ever
//! escapes to the transport.
//!
//! Update and delete always check existence first. That keeps "no such item"
//! and "the write failed" apart and guarantees that a missing id never
//! reaches a repository write.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, instrument};

use crate::error::RepoResult;
use crate::repository::ToDoItemRepository;
use crate::types::{
    ItemId, NewToDoItem, ToDoItemCreateRequest, ToDoItemGetResponse, ToDoItemUpdateRequest,
};

/// Transport-neutral result of a controller operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Created(T),
    NoContent,
    NotFound,
    /// The request was rejected before touching storage.
    Invalid(String),
    /// An unanticipated fault; details are logged, never returned.
    InternalFailure,
}

/// CRUD operations over a shared repository.
#[derive(Clone)]
pub struct ItemController {
    repository: Arc<dyn ToDoItemRepository>,
}

impl ItemController {
    pub fn new(repository: Arc<dyn ToDoItemRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn read_all(&self) -> Outcome<Vec<ToDoItemGetResponse>> {
        contain("read_all", self.try_read_all()).await
    }

    #[instrument(skip(self))]
    pub async fn read_by_id(&self, id: ItemId) -> Outcome<ToDoItemGetResponse> {
        contain("read_by_id", self.try_read_by_id(id)).await
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, request: ToDoItemCreateRequest) -> Outcome<ToDoItemGetResponse> {
        if let Err(reason) = request.validate() {
            return Outcome::Invalid(reason);
        }
        contain("create", self.try_create(request)).await
    }

    #[instrument(skip(self, request))]
    pub async fn update_by_id(&self, id: ItemId, request: ToDoItemUpdateRequest) -> Outcome<()> {
        if let Err(reason) = request.validate() {
            return Outcome::Invalid(reason);
        }
        contain("update_by_id", self.try_update_by_id(id, request)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: ItemId) -> Outcome<()> {
        contain("delete_by_id", self.try_delete_by_id(id)).await
    }

    async fn try_read_all(&self) -> RepoResult<Outcome<Vec<ToDoItemGetResponse>>> {
        let items = self.repository.read_all().await?;
        Ok(Outcome::Success(items.into_iter().map(Into::into).collect()))
    }

    async fn try_read_by_id(&self, id: ItemId) -> RepoResult<Outcome<ToDoItemGetResponse>> {
        Ok(match self.repository.read_by_id(id).await? {
            Some(item) => Outcome::Success(item.into()),
            None => not_found(id),
        })
    }

    async fn try_create(
        &self,
        request: ToDoItemCreateRequest,
    ) -> RepoResult<Outcome<ToDoItemGetResponse>> {
        let item = self.repository.create(NewToDoItem::from(request)).await?;
        debug!(id = item.id, "created to-do item");
        Ok(Outcome::Created(item.into()))
    }

    async fn try_update_by_id(
        &self,
        id: ItemId,
        request: ToDoItemUpdateRequest,
    ) -> RepoResult<Outcome<()>> {
        let Some(existing) = self.repository.read_by_id(id).await? else {
            return Ok(not_found(id));
        };
        let updated = self.repository.update(request.apply_to(existing)).await?;
        Ok(if updated { Outcome::NoContent } else { not_found(id) })
    }

    async fn try_delete_by_id(&self, id: ItemId) -> RepoResult<Outcome<()>> {
        if self.repository.read_by_id(id).await?.is_none() {
            return Ok(not_found(id));
        }
        let deleted = self.repository.delete(id).await?;
        Ok(if deleted { Outcome::NoContent } else { not_found(id) })
    }
}

fn not_found<T>(id: ItemId) -> Outcome<T> {
    debug!(id, "to-do item not found");
    Outcome::NotFound
}

/// Run `work`, converting repository errors and panics into
/// `Outcome::InternalFailure`.
async fn contain<T, F>(operation: &'static str, work: F) -> Outcome<T>
where
    F: Future<Output = RepoResult<Outcome<T>>>,
{
    match AssertUnwindSafe(work).catch_unwind().await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(err)) => {
            error!(operation, error = %err, "repository call failed");
            Outcome::InternalFailure
        }
        Err(_) => {
            error!(operation, "repository call panicked");
            Outcome::InternalFailure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoError;
    use crate::repository::{InMemoryRepository, MockToDoItemRepository, SqliteRepository};
    use crate::types::ToDoItem;
    use mockall::predicate::eq;

    fn stored(id: ItemId) -> ToDoItem {
        ToDoItem {
            id,
            name: "Jmeno".to_string(),
            description: Some("Popis".to_string()),
            is_completed: false,
            category: Some("HouseTasks".to_string()),
        }
    }

    fn update_request() -> ToDoItemUpdateRequest {
        ToDoItemUpdateRequest {
            name: "Jmeno".to_string(),
            description: Some("Popis".to_string()),
            is_completed: true,
            category: Some("HouseTasks".to_string()),
        }
    }

    fn controller(mock: MockToDoItemRepository) -> ItemController {
        ItemController::new(Arc::new(mock))
    }

    fn in_memory() -> ItemController {
        ItemController::new(Arc::new(InMemoryRepository::new()))
    }

    // --- update ---

    #[tokio::test]
    async fn update_existing_item_returns_no_content() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_read_by_id()
            .with(eq(1))
            .times(1)
            .returning(|id| Ok(Some(stored(id))));
        mock.expect_update()
            .withf(|item| item.id == 1 && item.is_completed)
            .times(1)
            .returning(|_| Ok(true));

        let outcome = controller(mock).update_by_id(1, update_request()).await;
        assert_eq!(outcome, Outcome::NoContent);
    }

    #[tokio::test]
    async fn update_missing_item_returns_not_found_without_writing() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_read_by_id().times(1).returning(|_| Ok(None));
        mock.expect_update().never();

        let outcome = controller(mock).update_by_id(1, update_request()).await;
        assert_eq!(outcome, Outcome::NotFound);
    }

    #[tokio::test]
    async fn update_failure_returns_internal_failure() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_read_by_id().times(1).returning(|id| Ok(Some(stored(id))));
        mock.expect_update()
            .times(1)
            .returning(|_| Err(RepoError::InvalidData("disk on fire".to_string())));

        let outcome = controller(mock).update_by_id(1, update_request()).await;
        assert_eq!(outcome, Outcome::InternalFailure);
    }

    #[tokio::test]
    async fn update_panic_returns_internal_failure() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_read_by_id().times(1).returning(|id| Ok(Some(stored(id))));
        mock.expect_update()
            .times(1)
            .returning(|_| panic!("driver bug"));

        let outcome = controller(mock).update_by_id(1, update_request()).await;
        assert_eq!(outcome, Outcome::InternalFailure);
    }

    #[tokio::test]
    async fn update_read_failure_returns_internal_failure() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_read_by_id()
            .times(1)
            .returning(|_| Err(RepoError::InvalidData("connection reset".to_string())));
        mock.expect_update().never();

        let outcome = controller(mock).update_by_id(1, update_request()).await;
        assert_eq!(outcome, Outcome::InternalFailure);
    }

    #[tokio::test]
    async fn update_with_blank_name_is_rejected_before_storage() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_read_by_id().never();
        mock.expect_update().never();

        let mut request = update_request();
        request.name = " ".to_string();
        let outcome = controller(mock).update_by_id(1, request).await;
        assert!(matches!(outcome, Outcome::Invalid(_)));
    }

    #[tokio::test]
    async fn update_of_item_deleted_after_check_returns_not_found() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_read_by_id().times(1).returning(|id| Ok(Some(stored(id))));
        mock.expect_update().times(1).returning(|_| Ok(false));

        let outcome = controller(mock).update_by_id(1, update_request()).await;
        assert_eq!(outcome, Outcome::NotFound);
    }

    /// SQLite store whose update worker panics on the blocking pool.
    struct CrashingUpdates(SqliteRepository);

    #[async_trait::async_trait]
    impl ToDoItemRepository for CrashingUpdates {
        async fn create(&self, item: NewToDoItem) -> RepoResult<ToDoItem> {
            self.0.create(item).await
        }

        async fn read_all(&self) -> RepoResult<Vec<ToDoItem>> {
            self.0.read_all().await
        }

        async fn read_by_id(&self, id: ItemId) -> RepoResult<Option<ToDoItem>> {
            self.0.read_by_id(id).await
        }

        async fn update(&self, _item: ToDoItem) -> RepoResult<bool> {
            self.0
                .run(|_| -> RepoResult<bool> { panic!("driver bug") })
                .await
        }

        async fn delete(&self, id: ItemId) -> RepoResult<bool> {
            self.0.delete(id).await
        }
    }

    #[tokio::test]
    async fn update_worker_panic_returns_internal_failure_and_store_recovers() {
        let controller = ItemController::new(Arc::new(CrashingUpdates(
            SqliteRepository::open_in_memory().unwrap(),
        )));
        let Outcome::Created(created) = controller
            .create(ToDoItemCreateRequest {
                name: "Jmeno".to_string(),
                description: None,
                is_completed: false,
                category: None,
            })
            .await
        else {
            panic!("create failed");
        };

        let outcome = controller.update_by_id(created.id, update_request()).await;
        assert_eq!(outcome, Outcome::InternalFailure);

        assert_eq!(controller.read_by_id(created.id).await, Outcome::Success(created));
        assert_eq!(controller.delete_by_id(1).await, Outcome::NoContent);
    }

    // --- delete ---

    #[tokio::test]
    async fn delete_missing_item_returns_not_found_without_writing() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_read_by_id().times(1).returning(|_| Ok(None));
        mock.expect_delete().never();

        let outcome = controller(mock).delete_by_id(5).await;
        assert_eq!(outcome, Outcome::NotFound);
    }

    #[tokio::test]
    async fn delete_existing_item_returns_no_content() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_read_by_id()
            .with(eq(5))
            .times(1)
            .returning(|id| Ok(Some(stored(id))));
        mock.expect_delete().with(eq(5)).times(1).returning(|_| Ok(true));

        let outcome = controller(mock).delete_by_id(5).await;
        assert_eq!(outcome, Outcome::NoContent);
    }

    #[tokio::test]
    async fn delete_read_failure_returns_internal_failure() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_read_by_id()
            .times(1)
            .returning(|_| Err(RepoError::InvalidData("connection reset".to_string())));
        mock.expect_delete().never();

        let outcome = controller(mock).delete_by_id(5).await;
        assert_eq!(outcome, Outcome::InternalFailure);
    }

    #[tokio::test]
    async fn delete_failure_returns_internal_failure() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_read_by_id().times(1).returning(|id| Ok(Some(stored(id))));
        mock.expect_delete()
            .with(eq(5))
            .times(1)
            .returning(|_| Err(RepoError::InvalidData("connection reset".to_string())));

        let outcome = controller(mock).delete_by_id(5).await;
        assert_eq!(outcome, Outcome::InternalFailure);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found_the_second_time() {
        let controller = in_memory();
        let created = match controller
            .create(ToDoItemCreateRequest {
                name: "Once".to_string(),
                description: None,
                is_completed: false,
                category: None,
            })
            .await
        {
            Outcome::Created(item) => item,
            other => panic!("unexpected outcome: {other:?}"),
        };

        assert_eq!(controller.delete_by_id(created.id).await, Outcome::NoContent);
        assert_eq!(controller.delete_by_id(created.id).await, Outcome::NotFound);
    }

    // --- read ---

    #[tokio::test]
    async fn read_missing_item_returns_not_found() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_read_by_id().with(eq(3)).times(1).returning(|_| Ok(None));

        assert_eq!(controller(mock).read_by_id(3).await, Outcome::NotFound);
    }

    #[tokio::test]
    async fn read_maps_item_to_response() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_read_by_id().returning(|id| Ok(Some(stored(id))));

        let outcome = controller(mock).read_by_id(3).await;
        assert_eq!(
            outcome,
            Outcome::Success(ToDoItemGetResponse {
                id: 3,
                name: "Jmeno".to_string(),
                description: Some("Popis".to_string()),
                is_completed: false,
            })
        );
    }

    #[tokio::test]
    async fn read_all_on_empty_store_is_success() {
        assert_eq!(in_memory().read_all().await, Outcome::Success(Vec::new()));
    }

    #[tokio::test]
    async fn read_all_failure_returns_internal_failure() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_read_all()
            .returning(|| Err(RepoError::InvalidData("bad row".to_string())));

        assert_eq!(controller(mock).read_all().await, Outcome::InternalFailure);
    }

    // --- create ---

    #[tokio::test]
    async fn create_with_blank_name_never_reaches_storage() {
        let mut mock = MockToDoItemRepository::new();
        mock.expect_create().never();

        let outcome = controller(mock)
            .create(ToDoItemCreateRequest {
                name: String::new(),
                description: None,
                is_completed: false,
                category: None,
            })
            .await;
        assert!(matches!(outcome, Outcome::Invalid(_)));
    }

    #[tokio::test]
    async fn created_ids_are_unique() {
        let controller = in_memory();
        let mut seen = std::collections::HashSet::new();
        for n in 0..5 {
            let outcome = controller
                .create(ToDoItemCreateRequest {
                    name: format!("item {n}"),
                    description: None,
                    is_completed: false,
                    category: None,
                })
                .await;
            let Outcome::Created(item) = outcome else {
                panic!("unexpected outcome: {outcome:?}");
            };
            assert!(seen.insert(item.id), "id {} reused", item.id);
        }
    }

    #[tokio::test]
    async fn buy_milk_scenario() {
        let controller = in_memory();

        let outcome = controller
            .create(ToDoItemCreateRequest {
                name: "Buy milk".to_string(),
                description: None,
                is_completed: false,
                category: None,
            })
            .await;
        let expected = ToDoItemGetResponse {
            id: 1,
            name: "Buy milk".to_string(),
            description: None,
            is_completed: false,
        };
        assert_eq!(outcome, Outcome::Created(expected.clone()));
        assert_eq!(controller.read_by_id(1).await, Outcome::Success(expected));

        let outcome = controller
            .update_by_id(
                1,
                ToDoItemUpdateRequest {
                    name: "Buy milk".to_string(),
                    description: None,
                    is_completed: true,
                    category: None,
                },
            )
            .await;
        assert_eq!(outcome, Outcome::NoContent);
        let Outcome::Success(fetched) = controller.read_by_id(1).await else {
            panic!("item 1 should exist");
        };
        assert!(fetched.is_completed);

        assert_eq!(controller.delete_by_id(1).await, Outcome::NoContent);
        assert_eq!(controller.read_by_id(1).await, Outcome::NotFound);
    }
}
