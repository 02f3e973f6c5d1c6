use rusqlite::Connection;
use seminarhub_core::db::open_db_in_memory;
use seminarhub_core::{CategoryService, RepoError, SqliteCategoryRepository};

#[test]
fn list_returns_seeded_categories_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let catalog = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    let names: Vec<(i64, String)> = catalog
        .list()
        .unwrap()
        .into_iter()
        .map(|category| (category.id, category.name))
        .collect();
    assert_eq!(
        names,
        vec![
            (1, "Technology".to_string()),
            (2, "Business".to_string()),
            (3, "Science".to_string()),
            (4, "Arts".to_string()),
        ]
    );
}

#[test]
fn get_and_name_of_resolve_by_id() {
    let conn = open_db_in_memory().unwrap();
    let catalog = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    assert_eq!(catalog.get(3).unwrap().unwrap().name, "Science");
    assert_eq!(catalog.name_of(2).unwrap().as_deref(), Some("Business"));
    assert!(catalog.get(99).unwrap().is_none());
    assert!(catalog.name_of(99).unwrap().is_none());
}

#[test]
fn category_names_are_unique_in_store() {
    let conn = open_db_in_memory().unwrap();
    let err = conn
        .execute("INSERT INTO categories (name) VALUES ('Technology');", [])
        .unwrap_err();
    assert!(err.to_string().contains("UNIQUE"));
}

#[test]
fn category_name_length_is_checked_in_store() {
    let conn = open_db_in_memory().unwrap();
    assert!(conn
        .execute("INSERT INTO categories (name) VALUES ('AI');", [])
        .is_err());
    let too_long = "x".repeat(51);
    assert!(conn
        .execute("INSERT INTO categories (name) VALUES (?1);", [too_long])
        .is_err());
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteCategoryRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}
