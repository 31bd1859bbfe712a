use std::sync::Arc;

use catalog_admin_lib::modules::category::Category;
use catalog_admin_lib::shared::domain::{Repository, SearchParams};
use catalog_admin_lib::shared::infrastructure::InMemoryRepository;

fn category(name: &str) -> Category {
    Category::new(name.to_string(), None).unwrap()
}

async fn seeded(names: &[&str]) -> InMemoryRepository<Category> {
    let repo = InMemoryRepository::new();
    let items: Vec<Category> = names.iter().map(|name| category(name)).collect();
    repo.bulk_insert(&items).await.unwrap();
    repo
}

#[tokio::test]
async fn second_page_of_five_items_sorted_by_name_holds_items_three_and_four() {
    let repo = seeded(&["echo", "alpha", "delta", "bravo", "charlie"]).await;

    let params = SearchParams::new(2, 2, Some("name".to_string()), "asc", None);
    let page = repo.search(params).await.unwrap();

    let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["charlie", "delta"]);
    assert_eq!(page.total, 5);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.last_page(), 3);
}

#[tokio::test]
async fn page_size_bounds_the_returned_items() {
    let repo = seeded(&["a", "b", "c", "d", "e"]).await;

    let page = repo
        .search(SearchParams::new(1, 3, None, "asc", None))
        .await
        .unwrap();
    assert!(page.items.len() <= 3);
    assert_eq!(page.last_page(), 2);
}

#[tokio::test]
async fn total_reflects_the_filtered_set_not_the_page() {
    let repo = seeded(&["rock", "jazz", "rockabilly", "pop"]).await;

    let params = SearchParams::new(1, 1, None, "asc", Some("rock".to_string()));
    let page = repo.search(params).await.unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.last_page(), 2);
}

#[tokio::test]
async fn out_of_range_page_is_empty_but_keeps_the_total() {
    let repo = seeded(&["a", "b"]).await;

    let page = repo
        .search(SearchParams::new(9, 2, None, "asc", None))
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn invalid_paging_input_falls_back_to_defaults() {
    let repo = seeded(&["a"]).await;

    let page = repo
        .search(SearchParams::new(0, 0, None, "desc", None))
        .await
        .unwrap();
    assert_eq!(page.current_page, 1);
    assert_eq!(page.per_page, 15);
}
