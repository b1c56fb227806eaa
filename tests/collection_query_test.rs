use scatterdb::fields::WriteData;
use scatterdb::{Condition, Database, Direction, StoreConfig};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, Database) {
    let root = TempDir::new().unwrap();
    let db = Database::new(StoreConfig::new().root(root.path()).max_depth(2).seed(7));
    (root, db)
}

fn payload(value: Value) -> WriteData {
    WriteData::from(value.as_object().cloned().unwrap())
}

fn seed_users(db: &Database) {
    for (id, name, age) in [
        ("u1", "ada", 36),
        ("u2", "bob", 17),
        ("u3", "cleo", 25),
        ("u4", "dan", 52),
        ("u5", "eve", 17),
    ] {
        db.document(&format!("users/{id}"))
            .unwrap()
            .set(payload(json!({ "name": name, "age": age })))
            .unwrap();
    }
}

fn names(collection: &scatterdb::Collection) -> Vec<String> {
    collection
        .iter()
        .map(|doc| doc.data["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn collection_get_returns_documents_under_the_prefix() {
    let (_root, db) = setup();
    seed_users(&db);
    db.document("rooms/r1")
        .unwrap()
        .set(payload(json!({ "name": "lobby" })))
        .unwrap();

    let users = db.collection("users").unwrap().get().unwrap();
    assert_eq!(users.len(), 5);
    assert!(names(&users).iter().all(|n| n != "lobby"));
    assert_eq!(users.path, "/users");
}

#[test]
fn prefix_match_includes_nested_subcollections() {
    let (_root, db) = setup();
    db.document("users/ada")
        .unwrap()
        .set(payload(json!({ "name": "ada" })))
        .unwrap();
    db.document("users/ada/posts/p1")
        .unwrap()
        .set(payload(json!({ "name": "post" })))
        .unwrap();

    // Prefix matching is literal: descendants count as members too.
    let users = db.collection("users").unwrap().get().unwrap();
    assert_eq!(users.len(), 2);

    let posts = db
        .document("users/ada")
        .unwrap()
        .collection("posts")
        .unwrap()
        .get()
        .unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts.documents[0].metadata.path, "/users/ada/posts/p1");
}

#[test]
fn filters_are_a_conjunction_over_the_scan() {
    let (_root, db) = setup();
    seed_users(&db);

    let teens = db
        .collection("users")
        .unwrap()
        .filter("age", Condition::Eq, 17)
        .get()
        .unwrap();
    let mut found = names(&teens);
    found.sort();
    assert_eq!(found, vec!["bob", "eve"]);

    let none = db
        .collection("users")
        .unwrap()
        .filter("age", Condition::Eq, 17)
        .filter("name", Condition::StartsWith, "z")
        .get()
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn order_limit_offset_window() {
    let (_root, db) = setup();
    seed_users(&db);

    let page = db
        .collection("users")
        .unwrap()
        .filter("age", Condition::Ge, 17)
        .order_by("age", Direction::Ascending)
        .offset(1)
        .limit(2)
        .get()
        .unwrap();

    // Sorted ages: 17, 17, 25, 36, 52 → window [1, 3).
    let ages: Vec<i64> = page
        .iter()
        .map(|doc| doc.data["age"].as_i64().unwrap())
        .collect();
    assert_eq!(ages, vec![17, 25]);
}

#[test]
fn order_by_descending() {
    let (_root, db) = setup();
    seed_users(&db);

    let oldest_first = db
        .collection("users")
        .unwrap()
        .order_by("age", Direction::Descending)
        .limit(2)
        .get()
        .unwrap();
    assert_eq!(names(&oldest_first), vec!["dan", "ada"]);
}

#[test]
fn window_without_order_by_is_a_subset_of_matches() {
    let (_root, db) = setup();
    seed_users(&db);

    let window = db
        .collection("users")
        .unwrap()
        .filter("age", Condition::Lt, 40)
        .offset(1)
        .limit(2)
        .get()
        .unwrap();

    // Scan order is filesystem-defined; assert membership, not order.
    assert_eq!(window.len(), 2);
    for name in names(&window) {
        assert!(["ada", "bob", "cleo", "eve"].contains(&name.as_str()));
    }
}

#[test]
fn collection_delete_removes_exactly_the_matches() {
    let (_root, db) = setup();
    seed_users(&db);

    let removed = db
        .collection("users")
        .unwrap()
        .filter("age", Condition::Eq, 17)
        .delete()
        .unwrap();
    assert_eq!(removed, 2);

    let left = db.collection("users").unwrap().get().unwrap();
    let mut found = names(&left);
    found.sort();
    assert_eq!(found, vec!["ada", "cleo", "dan"]);
}

#[test]
fn add_creates_a_document_under_a_fresh_id() {
    let (_root, db) = setup();

    let doc = db
        .collection("users")
        .unwrap()
        .add(payload(json!({ "name": "new" })))
        .unwrap();

    let id = doc.metadata.path.strip_prefix("/users/").unwrap();
    assert_eq!(id.len(), 25);
    assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));

    let users = db.collection("users").unwrap().get().unwrap();
    assert_eq!(users.len(), 1);

    let again = db
        .collection("users")
        .unwrap()
        .add(payload(json!({ "name": "another" })))
        .unwrap();
    assert_ne!(again.metadata.path, doc.metadata.path);
}

#[test]
fn documents_beyond_the_depth_bound_are_out_of_scope() {
    let (root, db) = setup();
    db.document("users/near")
        .unwrap()
        .set(payload(json!({ "name": "near" })))
        .unwrap();

    // Hand-place a well-formed document file deeper than the scan bound.
    let deep_dir = root.path().join("a/b/c/d");
    fs::create_dir_all(&deep_dir).unwrap();
    let deep_file = deep_dir.join("1700000000000.00c0ffee.sdb");
    let record = json!({
        "location": deep_file,
        "metadata": {
            "path": "/users/far",
            "created": "2026-01-01T00:00:00Z",
            "lastModified": "2026-01-01T00:00:00Z"
        },
        "data": { "name": "far" }
    });
    fs::write(&deep_file, serde_json::to_string_pretty(&record).unwrap()).unwrap();

    let users = db.collection("users").unwrap().get().unwrap();
    assert_eq!(names(&users), vec!["near"]);
    assert!(db.document("users/far").unwrap().get().unwrap().is_none());
}

#[test]
fn collection_ref_document_builds_child_paths() {
    let (_root, db) = setup();
    let users = db.collection("users").unwrap();
    let doc = users.document("ada").unwrap();
    assert_eq!(doc.path(), "/users/ada");

    doc.set(payload(json!({ "name": "ada" }))).unwrap();
    assert_eq!(users.get().unwrap().len(), 1);
}
