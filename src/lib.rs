//! docacl - Embedded document ACL store
//!
//! Persistent access-control lists for a document-management application,
//! backed by LMDB. Each securable object maps to a stable (type, key)
//! identity; its ACL owns an ordered entry sequence and an optional parent
//! link. Evaluation is first-match-wins over the entries, falling through to
//! the parent chain, deny-by-default.
//!
//! ```no_run
//! use docacl::{db, document, eval, permission, Element, Sid};
//!
//! db::init("/tmp/docacl")?;
//! let root = Element::new("home", Some("home".into()));
//! let alice = Sid::principal("alice");
//! document::create_document(&root, &alice)?;
//! assert!(eval::has_permission(
//!     &[alice],
//!     &docacl::identity_for(&root)?,
//!     permission::ADMINISTRATION,
//! )?);
//! # Ok::<(), docacl::AclError>(())
//! ```

pub mod acl;
pub mod db;
pub mod document;
pub mod error;
pub mod eval;
pub mod identity;
pub mod permission;
pub mod sid;
pub mod store;
mod tx;

pub use acl::{Ace, Acl};
pub use db::{clear_all, init, test_lock};
pub use document::{Element, ElementRecord};
pub use error::{AclError, Result};
pub use identity::{identity_for, ObjectIdentity, Securable};
pub use sid::Sid;
