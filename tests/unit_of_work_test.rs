use std::sync::Arc;

use tokio_test::assert_ok;

use catalog_admin_lib::modules::category::Category;
use catalog_admin_lib::shared::application::{within, TransactionState, UnitOfWork};
use catalog_admin_lib::shared::domain::{Identifier, Repository};
use catalog_admin_lib::shared::infrastructure::{
    InMemoryRepository, InMemoryUnitOfWork, TransactionParticipant,
};
use catalog_admin_lib::{AppError, AppResult};

fn category(name: &str) -> Category {
    Category::new(name.to_string(), None).unwrap()
}

fn uow_over(repo: &Arc<InMemoryRepository<Category>>) -> InMemoryUnitOfWork {
    InMemoryUnitOfWork::new(vec![repo.clone() as Arc<dyn TransactionParticipant>])
}

#[tokio::test]
async fn successful_scope_commits_all_writes() {
    let repo = Arc::new(InMemoryRepository::<Category>::new());
    let uow = uow_over(&repo);

    let first = category("first");
    let second = category("second");
    within(&uow, || async {
        repo.insert(&first).await?;
        repo.insert(&second).await?;
        Ok(())
    })
    .await
    .unwrap();

    assert_eq!(uow.state(), TransactionState::Committed);
    assert!(repo.find_by_id(&first.id).await.unwrap().is_some());
    assert!(repo.find_by_id(&second.id).await.unwrap().is_some());
}

#[tokio::test]
async fn failing_scope_rolls_back_and_reraises_the_original_error() {
    let repo = Arc::new(InMemoryRepository::<Category>::new());
    let kept = category("kept");
    repo.insert(&kept).await.unwrap();
    let uow = uow_over(&repo);

    let discarded = category("discarded");
    let err = within(&uow, || async {
        repo.insert(&discarded).await?;
        Err::<(), AppError>(AppError::Validation("boom".to_string()))
    })
    .await
    .unwrap_err();

    assert_eq!(err, AppError::Validation("boom".to_string()));
    assert_eq!(uow.state(), TransactionState::RolledBack);
    assert!(repo.find_by_id(&discarded.id).await.unwrap().is_none());
    assert!(repo.find_by_id(&kept.id).await.unwrap().is_some());
}

#[tokio::test]
async fn a_unit_of_work_is_reusable_after_a_terminal_state() {
    let repo = Arc::new(InMemoryRepository::<Category>::new());
    let uow = uow_over(&repo);

    within(&uow, || async { Ok(()) }).await.unwrap();

    let late = category("late");
    let outcome: AppResult<()> = within(&uow, || async {
        repo.insert(&late).await?;
        Ok(())
    })
    .await;
    tokio_test::assert_ok!(outcome);
    assert!(repo.find_by_id(&late.id).await.unwrap().is_some());
}

#[tokio::test]
async fn starting_twice_without_finishing_is_rejected() {
    let repo = Arc::new(InMemoryRepository::<Category>::new());
    let uow = uow_over(&repo);

    uow.start().await.unwrap();
    let err = uow.start().await.unwrap_err();
    assert!(matches!(err, AppError::TransactionState(_)));
    uow.rollback().await.unwrap();
}

#[tokio::test]
async fn exists_partitions_requested_ids_exactly() {
    let repo = Arc::new(InMemoryRepository::<Category>::new());
    let present = category("present");
    repo.insert(&present).await.unwrap();
    let absent = Identifier::new();

    let result = repo.exists_by_id(&[present.id, absent]).await.unwrap();
    assert_eq!(result.exists, vec![present.id]);
    assert_eq!(result.not_exists, vec![absent]);
}

#[tokio::test]
async fn find_by_id_is_idempotent() {
    let repo = Arc::new(InMemoryRepository::<Category>::new());
    let item = category("stable");
    repo.insert(&item).await.unwrap();

    let reads = futures::future::join_all((0..3).map(|_| repo.find_by_id(&item.id))).await;
    for read in reads {
        assert_eq!(read.unwrap().unwrap().name, "stable");
    }
}
