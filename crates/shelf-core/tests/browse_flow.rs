//! End-to-end browsing through the public API

use shelf_core::analytics::NoopReporter;
use shelf_core::{
    category_from_slug, slugify, Book, BookId, Dataset, FileStorage, KeyValueStore,
    MemoryStorage, Page, Session, FAVORITES_STORAGE_KEY,
};
use tempfile::TempDir;

fn two_book_dataset() -> Dataset {
    Dataset::from_books(vec![Book::new("a", "A", "UX"), Book::new("b", "B", "UI")]).unwrap()
}

fn visible_ids<S: KeyValueStore>(session: &Session<S>) -> Vec<String> {
    session
        .visible_books()
        .iter()
        .map(|b| b.id.to_string())
        .collect()
}

#[test]
fn favorite_then_category_then_favorites_view() {
    let mut session = Session::new(
        two_book_dataset(),
        MemoryStorage::new(),
        FAVORITES_STORAGE_KEY,
        Box::new(NoopReporter),
    );

    session.toggle_favorite(&BookId::new("a")).unwrap();
    assert_eq!(session.favorites().len(), 1);

    session.view_mut().set_category("UI");
    assert!(!session.state().show_favorites);
    assert_eq!(visible_ids(&session), vec!["b"]);

    session.view_mut().show_favorites_view();
    assert_eq!(visible_ids(&session), vec!["a"]);

    session.view_mut().show_all_view();
    assert_eq!(visible_ids(&session), vec!["a", "b"]);
}

#[test]
fn favorites_survive_restart_on_disk() {
    let temp_dir = TempDir::new().unwrap();

    let mut first = Session::new(
        two_book_dataset(),
        FileStorage::new(temp_dir.path()),
        FAVORITES_STORAGE_KEY,
        Box::new(NoopReporter),
    );
    first.toggle_favorite(&BookId::new("b")).unwrap();
    first.toggle_favorite(&BookId::new("a")).unwrap();
    first.toggle_favorite(&BookId::new("b")).unwrap();
    drop(first);

    let second = Session::new(
        two_book_dataset(),
        FileStorage::new(temp_dir.path()),
        FAVORITES_STORAGE_KEY,
        Box::new(NoopReporter),
    );
    let favorites: Vec<&str> = second.favorites().iter().map(|id| id.as_str()).collect();
    assert_eq!(favorites, vec!["a"]);
}

#[test]
fn legacy_titles_are_migrated_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let mut storage = FileStorage::new(temp_dir.path());
    storage
        .set(FAVORITES_STORAGE_KEY, r#"["B", "Gone Title"]"#)
        .unwrap();

    let session = Session::new(
        two_book_dataset(),
        storage,
        FAVORITES_STORAGE_KEY,
        Box::new(NoopReporter),
    );
    assert!(session.is_favorite(&BookId::new("b")));
    assert_eq!(session.favorites().len(), 1);

    let persisted = FileStorage::new(temp_dir.path())
        .get(FAVORITES_STORAGE_KEY)
        .unwrap();
    assert_eq!(persisted.as_deref(), Some(r#"["b"]"#));
}

#[test]
fn bundled_catalog_deep_links_resolve() {
    let mut session = Session::new(
        Dataset::bundled().unwrap(),
        MemoryStorage::new(),
        FAVORITES_STORAGE_KEY,
        Box::new(NoopReporter),
    );

    let categories = session.categories().to_vec();
    assert_eq!(categories[0], "All");
    for category in categories.iter().skip(1) {
        let slug = slugify(category);
        assert_eq!(
            category_from_slug(&slug, &categories).as_deref(),
            Some(category.as_str())
        );

        let page = session.navigate(&format!("/category/{}", slug));
        assert_eq!(page, Page::Books);
        assert!(session
            .visible_books()
            .iter()
            .all(|b| &b.category == category));
        assert!(!session.visible_books().is_empty());
    }

    assert_eq!(
        session.navigate("/category/nonexistent-slug"),
        Page::CategoryNotFound("nonexistent-slug".to_string())
    );
}
