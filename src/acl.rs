//! ACL and ACE model types
//!
//! An `Acl` owns an ordered sequence of entries and an optional parent link.
//! The parent link is an identity reference resolved through the store, never
//! an owned sub-tree. Entry positions are contiguous from 0 and evaluation
//! precedence follows position order.

use serde::{Deserialize, Serialize};

use crate::error::{AclError, Result};
use crate::identity::ObjectIdentity;
use crate::sid::Sid;

/// One access-control entry: a grant or deny of a permission mask to a sid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ace {
    pub mask: u64,
    pub sid: Sid,
    pub granting: bool,
    pub position: usize,
}

/// An access-control list for one securable object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acl {
    identity: ObjectIdentity,
    entries: Vec<Ace>,
    parent: Option<ObjectIdentity>,
    version: u64,
}

impl Acl {
    /// A fresh ACL: no entries, no parent, version 0.
    pub(crate) fn new(identity: ObjectIdentity) -> Self {
        Acl {
            identity,
            entries: Vec::new(),
            parent: None,
            version: 0,
        }
    }

    #[inline]
    pub fn identity(&self) -> &ObjectIdentity {
        &self.identity
    }

    #[inline]
    pub fn entries(&self) -> &[Ace] {
        &self.entries
    }

    #[inline]
    pub fn parent(&self) -> Option<&ObjectIdentity> {
        self.parent.as_ref()
    }

    /// Optimistic concurrency stamp; bumped by the store on each update.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    /// Link (or unlink) the parent ACL by identity.
    pub fn set_parent(&mut self, parent: Option<ObjectIdentity>) {
        self.parent = parent;
    }

    /// Insert an ACE at `position`, shifting later entries down.
    ///
    /// Positions are renumbered so they stay contiguous from 0.
    pub fn insert_ace(
        &mut self,
        position: usize,
        mask: u64,
        sid: Sid,
        granting: bool,
    ) -> Result<()> {
        if position > self.entries.len() {
            return Err(AclError::InvalidAce(format!(
                "position {} out of range (len {})",
                position,
                self.entries.len()
            )));
        }
        self.entries.insert(
            position,
            Ace {
                mask,
                sid,
                granting,
                position,
            },
        );
        self.renumber();
        Ok(())
    }

    /// Remove the ACE at `position`, shifting later entries up.
    pub fn remove_ace(&mut self, position: usize) -> Result<Ace> {
        if position >= self.entries.len() {
            return Err(AclError::InvalidAce(format!(
                "position {} out of range (len {})",
                position,
                self.entries.len()
            )));
        }
        let ace = self.entries.remove(position);
        self.renumber();
        Ok(ace)
    }

    fn renumber(&mut self) {
        for (i, ace) in self.entries.iter_mut().enumerate() {
            ace.position = i;
        }
    }

    /// First-match decision over this ACL's own entries.
    ///
    /// Scans in position order; the first ACE whose sid is in `sids` and whose
    /// mask overlaps `mask` wins, and its `granting` flag is the verdict.
    /// `None` means no local match (caller falls through to the parent chain).
    /// Entries are never re-sorted by specificity.
    pub fn decide(&self, sids: &[Sid], mask: u64) -> Option<bool> {
        self.entries
            .iter()
            .find(|ace| ace.mask & mask != 0 && sids.contains(&ace.sid))
            .map(|ace| ace.granting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::{ADMINISTRATION, READ, WRITE};

    fn acl() -> Acl {
        Acl::new(ObjectIdentity::new("doc", "1").unwrap())
    }

    #[test]
    fn test_new_is_empty() {
        let a = acl();
        assert!(a.entries().is_empty());
        assert!(a.parent().is_none());
        assert_eq!(a.version(), 0);
    }

    #[test]
    fn test_append_positions_contiguous() {
        let mut a = acl();
        a.insert_ace(0, READ, Sid::principal("alice"), true).unwrap();
        a.insert_ace(1, WRITE, Sid::principal("bob"), true).unwrap();
        let positions: Vec<usize> = a.entries().iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![0, 1]);
    }

    #[test]
    fn test_insert_middle_renumbers() {
        let mut a = acl();
        a.insert_ace(0, READ, Sid::principal("alice"), true).unwrap();
        a.insert_ace(1, WRITE, Sid::principal("bob"), true).unwrap();
        a.insert_ace(1, READ, Sid::principal("carol"), false).unwrap();

        assert_eq!(a.entries()[1].sid, Sid::principal("carol"));
        let positions: Vec<usize> = a.entries().iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_insert_out_of_range() {
        let mut a = acl();
        assert!(matches!(
            a.insert_ace(1, READ, Sid::principal("alice"), true),
            Err(AclError::InvalidAce(_))
        ));
    }

    #[test]
    fn test_remove_renumbers() {
        let mut a = acl();
        a.insert_ace(0, READ, Sid::principal("alice"), true).unwrap();
        a.insert_ace(1, WRITE, Sid::principal("bob"), true).unwrap();
        let removed = a.remove_ace(0).unwrap();
        assert_eq!(removed.sid, Sid::principal("alice"));
        assert_eq!(a.entries()[0].position, 0);
        assert_eq!(a.entries()[0].sid, Sid::principal("bob"));
    }

    #[test]
    fn test_decide_first_match_wins() {
        let mut a = acl();
        a.insert_ace(0, READ, Sid::principal("alice"), false).unwrap();
        a.insert_ace(1, READ, Sid::principal("alice"), true).unwrap();
        // the deny at position 0 shadows the grant behind it
        assert_eq!(a.decide(&[Sid::principal("alice")], READ), Some(false));
    }

    #[test]
    fn test_decide_mask_overlap() {
        let mut a = acl();
        a.insert_ace(0, READ | WRITE, Sid::principal("alice"), true)
            .unwrap();
        // overlap, not superset: asking for READ matches a READ|WRITE entry
        assert_eq!(a.decide(&[Sid::principal("alice")], READ), Some(true));
        assert_eq!(a.decide(&[Sid::principal("alice")], ADMINISTRATION), None);
    }

    #[test]
    fn test_decide_no_match() {
        let mut a = acl();
        a.insert_ace(0, READ, Sid::principal("alice"), true).unwrap();
        assert_eq!(a.decide(&[Sid::principal("bob")], READ), None);
    }

    #[test]
    fn test_decide_role_sid() {
        let mut a = acl();
        a.insert_ace(0, WRITE, Sid::role("editor"), true).unwrap();
        let sids = [Sid::principal("bob"), Sid::role("editor")];
        assert_eq!(a.decide(&sids, WRITE), Some(true));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut a = acl();
        a.set_parent(Some(ObjectIdentity::new("folder", "root").unwrap()));
        a.insert_ace(0, ADMINISTRATION, Sid::principal("alice"), true)
            .unwrap();
        let json = serde_json::to_string(&a).unwrap();
        let back: Acl = serde_json::from_str(&json).unwrap();
        assert_eq!(back.identity(), a.identity());
        assert_eq!(back.entries(), a.entries());
        assert_eq!(back.parent(), a.parent());
        assert_eq!(back.version(), a.version());
    }
}
