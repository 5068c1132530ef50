//! Document creation workflow tests

use std::sync::OnceLock;

use docacl::permission::{ADMINISTRATION, READ};
use docacl::{
    clear_all, document, eval, identity_for, init, store, test_lock, AclError, Element, Sid,
};
use tempfile::TempDir;

static TEST_DIR: OnceLock<TempDir> = OnceLock::new();

fn setup() -> std::sync::MutexGuard<'static, ()> {
    let lock = test_lock();
    let dir = TEST_DIR.get_or_init(|| TempDir::new().unwrap());
    init(dir.path().to_str().unwrap()).unwrap();
    clear_all().unwrap();
    lock
}

#[test]
fn test_create_root_document() {
    let _lock = setup();
    let alice = Sid::principal("alice");
    let doc = Element::new("report.txt", Some("doc-1".into()));

    let acl = document::create_document(&doc, &alice).unwrap();

    assert!(acl.parent().is_none());
    assert_eq!(acl.entries().len(), 1);
    let ace = &acl.entries()[0];
    assert_eq!(ace.mask, ADMINISTRATION);
    assert_eq!(ace.sid, alice);
    assert!(ace.granting);
    assert_eq!(ace.position, 0);
}

#[test]
fn test_creator_has_administration() {
    let _lock = setup();
    let alice = Sid::principal("alice");
    let doc = Element::new("report.txt", Some("doc-1".into()));
    document::create_document(&doc, &alice).unwrap();

    let identity = identity_for(&doc).unwrap();
    assert!(eval::has_permission(&[alice], &identity, ADMINISTRATION).unwrap());
}

#[test]
fn test_other_principal_denied() {
    let _lock = setup();
    let alice = Sid::principal("alice");
    let doc = Element::new("report.txt", Some("doc-1".into()));
    document::create_document(&doc, &alice).unwrap();

    let identity = identity_for(&doc).unwrap();
    let bob = Sid::principal("bob");
    assert!(!eval::has_permission(&[bob], &identity, ADMINISTRATION).unwrap());
    assert!(!eval::has_permission(&[Sid::role("editor")], &identity, READ).unwrap());
}

#[test]
fn test_create_child_links_parent_acl() {
    let _lock = setup();
    let alice = Sid::principal("alice");
    let folder = Element::new("home", Some("folder-1".into()));
    document::create_document(&folder, &alice).unwrap();

    let doc = Element::child_of("report.txt", Some("doc-1".into()), folder.clone());
    let acl = document::create_document(&doc, &alice).unwrap();

    let parent_identity = identity_for(&folder).unwrap();
    let parent_acl = store::read_acl_by_id(&parent_identity).unwrap();
    assert_eq!(acl.parent(), Some(parent_acl.identity()));
}

#[test]
fn test_create_child_before_parent_fails() {
    let _lock = setup();
    let alice = Sid::principal("alice");
    // the parent element exists in memory but was never created in the store
    let folder = Element::new("home", Some("folder-1".into()));
    let doc = Element::child_of("report.txt", Some("doc-1".into()), folder);

    assert!(matches!(
        document::create_document(&doc, &alice),
        Err(AclError::NotFound(_))
    ));
}

#[test]
fn test_create_unsaved_element_fails() {
    let _lock = setup();
    let alice = Sid::principal("alice");
    let doc = Element::new("draft.txt", None);

    assert!(matches!(
        document::create_document(&doc, &alice),
        Err(AclError::InvalidObject(_))
    ));
}

#[test]
fn test_create_same_document_twice_fails() {
    let _lock = setup();
    let alice = Sid::principal("alice");
    let doc = Element::new("report.txt", Some("doc-1".into()));
    document::create_document(&doc, &alice).unwrap();

    assert!(matches!(
        document::create_document(&doc, &alice),
        Err(AclError::DuplicateAcl(_))
    ));
}

#[test]
fn test_element_record_persisted() {
    let _lock = setup();
    let alice = Sid::principal("alice");
    let folder = Element::new("home", Some("folder-1".into()));
    document::create_document(&folder, &alice).unwrap();
    let doc = Element::child_of("report.txt", Some("doc-1".into()), folder.clone());
    document::create_document(&doc, &alice).unwrap();

    let record = document::find_element(&identity_for(&doc).unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(record.name, "report.txt");
    assert_eq!(record.parent.as_deref(), Some("element:folder-1"));

    let all = document::list_elements().unwrap();
    assert_eq!(all.len(), 2);
}
