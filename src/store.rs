//! ACL persistence: create, read, update
//!
//! One ACL per identity. Updates are whole-record writes guarded by an
//! optimistic version stamp, so a lost race surfaces as `Conflict` instead of
//! silently dropping entries. Every write happens inside one LMDB transaction;
//! readers see the pre- or post-commit state, never a partial entry sequence.

use std::collections::HashSet;

use heed::RoTxn;
use log::debug;

use crate::acl::Acl;
use crate::db::{read, Dbs};
use crate::error::{AclError, Result};
use crate::identity::ObjectIdentity;
use crate::tx::{transact, Tx};

/// Decode the stored ACL for an identity, if any.
pub(crate) fn get_acl(d: &Dbs, tx: &RoTxn, identity: &ObjectIdentity) -> Result<Option<Acl>> {
    match d.acls.get(tx, identity.as_bytes())? {
        Some(json) => Ok(Some(serde_json::from_str(json)?)),
        None => Ok(None),
    }
}

/// Create an empty ACL for `identity`.
///
/// Fails with `DuplicateAcl` if one already exists; the store is left
/// untouched in that case.
pub fn create_acl(identity: &ObjectIdentity) -> Result<Acl> {
    transact(|tx| {
        if tx.get_version(identity)?.is_some() {
            return Err(AclError::DuplicateAcl(identity.clone()));
        }
        let acl = Acl::new(identity.clone());
        tx.put_acl(&acl)?;
        debug!("created ACL for {}", identity);
        Ok(acl)
    })
}

/// Read the ACL for `identity`, failing with `NotFound` if absent.
pub fn read_acl_by_id(identity: &ObjectIdentity) -> Result<Acl> {
    read(|d, tx| get_acl(d, tx, identity)?.ok_or_else(|| AclError::NotFound(identity.clone())))
}

/// Whether an ACL exists for `identity`.
pub fn acl_exists(identity: &ObjectIdentity) -> Result<bool> {
    read(|d, tx| Ok(d.versions.get(tx, identity.as_bytes())?.is_some()))
}

/// Reject a parent link that would make `identity` its own ancestor.
///
/// Walks the stored chain from the proposed parent inside the write
/// transaction. A parent without a stored ACL is allowed here; evaluation
/// reports it as `NotFound`.
fn no_cycle(tx: &mut Tx, identity: &ObjectIdentity, parent: &ObjectIdentity) -> Result<()> {
    let mut seen = HashSet::new();
    let mut current = parent.clone();
    loop {
        if current == *identity {
            return Err(AclError::CircularParent(identity.clone()));
        }
        if !seen.insert(current.clone()) {
            // upstream loop that never reaches `identity`
            return Err(AclError::CircularParent(current));
        }
        match tx.get_acl(&current)?.and_then(|a| a.parent().cloned()) {
            Some(p) => current = p,
            None => return Ok(()),
        }
    }
}

/// Persist the full current state (entries + parent link) of an ACL.
///
/// The caller's copy must carry the version it was read at; a mismatch means
/// another writer committed in between, and the call fails with `Conflict`
/// without writing. A parent link that closes a cycle fails with
/// `CircularParent`. On success the stored and returned ACL have version + 1.
pub fn update_acl(acl: &Acl) -> Result<Acl> {
    transact(|tx| {
        let identity = acl.identity();
        let found = tx
            .get_version(identity)?
            .ok_or_else(|| AclError::NotFound(identity.clone()))?;
        if found != acl.version() {
            return Err(AclError::Conflict {
                identity: identity.clone(),
                expected: acl.version(),
                found,
            });
        }
        if let Some(parent) = acl.parent() {
            no_cycle(tx, identity, parent)?;
        }
        let mut next = acl.clone();
        next.set_version(acl.version() + 1);
        tx.put_acl(&next)?;
        debug!(
            "updated ACL for {}: {} entries, parent {:?}, version {}",
            identity,
            next.entries().len(),
            next.parent().map(|p| p.to_string()),
            next.version()
        );
        Ok(next)
    })
}
