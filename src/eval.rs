//! Permission evaluation (first match wins, then the parent chain)

use std::collections::HashSet;

use log::debug;

use crate::db::read;
use crate::error::{AclError, Result};
use crate::identity::ObjectIdentity;
use crate::sid::Sid;
use crate::store::get_acl;

/// Decide whether any of `sids` holds `mask` on `identity`.
///
/// The object's own entries are scanned in position order; the first ACE
/// matching a sid with an overlapping mask wins, and its granting flag is the
/// answer. With no local match the parent chain is consulted the same way,
/// however deep it runs. No match anywhere denies.
///
/// A missing ACL (for `identity` or for a linked parent) is `NotFound`, not a
/// deny: every securable object is expected to have an ACL from creation.
/// The store rejects circular parent links at write time; hitting one here
/// means the store is corrupted and is `CircularParent`.
pub fn has_permission(sids: &[Sid], identity: &ObjectIdentity, mask: u64) -> Result<bool> {
    read(|d, tx| {
        let mut seen = HashSet::new();
        let mut current = identity.clone();
        loop {
            if !seen.insert(current.clone()) {
                return Err(AclError::CircularParent(current));
            }
            let acl =
                get_acl(d, tx, &current)?.ok_or_else(|| AclError::NotFound(current.clone()))?;
            if let Some(granting) = acl.decide(sids, mask) {
                debug!(
                    "{} on {}: {} via {}",
                    mask,
                    identity,
                    if granting { "grant" } else { "deny" },
                    current
                );
                return Ok(granting);
            }
            match acl.parent() {
                Some(p) => current = p.clone(),
                None => {
                    debug!("{} on {}: deny by default", mask, identity);
                    return Ok(false);
                }
            }
        }
    })
}
