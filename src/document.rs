//! Document elements and the creation workflow
//!
//! `create_document` is the orchestration point: persist the element, create
//! its ACL, link the parent's ACL, grant the creator ADMINISTRATION, persist.
//! The element write and the ACL writes are separate transactions; a failure
//! partway through leaves earlier steps committed, and compensating cleanup
//! is the caller's responsibility.

use log::info;
use serde::{Deserialize, Serialize};

use crate::acl::Acl;
use crate::db::read;
use crate::error::Result;
use crate::identity::{identity_for, ObjectIdentity, Securable};
use crate::permission::ADMINISTRATION;
use crate::sid::Sid;
use crate::store;
use crate::tx::transact;

/// Type name all elements carry in their ACL identity.
pub const ELEMENT_TYPE: &str = "element";

/// A document element: a file or folder node in the document tree.
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    key: Option<String>,
    parent: Option<Box<Element>>,
}

impl Element {
    /// A root-level element. `key` is the assigned primary key, or `None`
    /// for an element not yet saved by the application layer.
    pub fn new(name: impl Into<String>, key: Option<String>) -> Self {
        Element {
            name: name.into(),
            key,
            parent: None,
        }
    }

    /// An element nested under `parent`.
    pub fn child_of(name: impl Into<String>, key: Option<String>, parent: Element) -> Self {
        Element {
            name: name.into(),
            key,
            parent: Some(Box::new(parent)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Securable for Element {
    fn type_name(&self) -> &str {
        ELEMENT_TYPE
    }

    fn primary_key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn parent(&self) -> Option<&dyn Securable> {
        self.parent.as_deref().map(|p| p as &dyn Securable)
    }
}

/// Stored form of an element; the parent survives as an identity string only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub name: String,
    pub parent: Option<String>,
}

fn record_for(element: &Element) -> Result<ElementRecord> {
    let parent = match Securable::parent(element) {
        Some(p) => Some(identity_for(p)?.to_string()),
        None => None,
    };
    Ok(ElementRecord {
        name: element.name.clone(),
        parent,
    })
}

/// Fetch a stored element record.
pub fn find_element(identity: &ObjectIdentity) -> Result<Option<ElementRecord>> {
    read(|d, tx| match d.elements.get(tx, identity.as_bytes())? {
        Some(json) => Ok(Some(serde_json::from_str(json)?)),
        None => Ok(None),
    })
}

/// List all stored elements with their identities.
pub fn list_elements() -> Result<Vec<(ObjectIdentity, ElementRecord)>> {
    read(|d, tx| {
        let mut r = Vec::new();
        for item in d.elements.iter(tx)? {
            let (k, v) = item?;
            r.push((ObjectIdentity::from_bytes(k)?, serde_json::from_str(v)?));
        }
        Ok(r)
    })
}

/// Create a document element and its ACL.
///
/// 1. persist the element record
/// 2. create an empty ACL for the element's identity
/// 3. if the element has a parent, link the parent's ACL (the parent must
///    have been created first; a missing parent ACL is `NotFound`)
/// 4. append one granting ADMINISTRATION entry for `creator`
/// 5. persist the ACL
///
/// The first error surfaces verbatim; completed steps are not rolled back.
pub fn create_document(element: &Element, creator: &Sid) -> Result<Acl> {
    let identity = identity_for(element)?;
    let record = record_for(element)?;
    let json = serde_json::to_string(&record)?;
    transact(|tx| tx.put_element(&identity, &json))?;

    let mut acl = store::create_acl(&identity)?;

    if let Some(parent) = Securable::parent(element) {
        let parent_identity = identity_for(parent)?;
        let parent_acl = store::read_acl_by_id(&parent_identity)?;
        acl.set_parent(Some(parent_acl.identity().clone()));
    }

    let position = acl.entries().len();
    acl.insert_ace(position, ADMINISTRATION, creator.clone(), true)?;

    let acl = store::update_acl(&acl)?;
    info!("created document {} with ACL owned by {}", identity, creator);
    Ok(acl)
}
