//! Transaction wrapper for atomic writes

use heed::RwTxn;

use crate::acl::Acl;
use crate::db::{dbs, env, Dbs};
use crate::error::Result;
use crate::identity::ObjectIdentity;

/// Write-transaction wrapper; commits on success, aborts on error.
pub(crate) struct Tx {
    txn: Option<RwTxn<'static>>,
    dbs: &'static Dbs,
}

impl Tx {
    #[inline]
    pub(crate) fn new() -> Result<Self> {
        Ok(Tx {
            txn: Some(env()?.write_txn()?),
            dbs: dbs()?,
        })
    }

    #[inline]
    pub(crate) fn tx(&mut self) -> &mut RwTxn<'static> {
        self.txn.as_mut().unwrap()
    }

    #[inline]
    pub(crate) fn dbs(&self) -> &'static Dbs {
        self.dbs
    }

    #[inline]
    pub(crate) fn commit(mut self) -> Result<()> {
        self.txn.take().unwrap().commit()?;
        Ok(())
    }

    /// Version stamp for an identity, `None` if no ACL was ever created.
    pub(crate) fn get_version(&mut self, identity: &ObjectIdentity) -> Result<Option<u64>> {
        let dbs = self.dbs;
        Ok(dbs.versions.get(self.tx(), identity.as_bytes())?)
    }

    /// Decode the stored ACL for an identity within this transaction, if any.
    pub(crate) fn get_acl(&mut self, identity: &ObjectIdentity) -> Result<Option<Acl>> {
        let dbs = self.dbs;
        match dbs.acls.get(self.tx(), identity.as_bytes())? {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    /// Write the ACL record and its version stamp together.
    pub(crate) fn put_acl(&mut self, acl: &Acl) -> Result<()> {
        let json = serde_json::to_string(acl)?;
        let dbs = self.dbs;
        let key = acl.identity().as_bytes().to_vec();
        dbs.acls.put(self.tx(), &key, &json)?;
        dbs.versions.put(self.tx(), &key, &acl.version())?;
        Ok(())
    }

    pub(crate) fn put_element(&mut self, identity: &ObjectIdentity, json: &str) -> Result<()> {
        let dbs = self.dbs;
        let key = identity.as_bytes().to_vec();
        dbs.elements.put(self.tx(), &key, json)?;
        Ok(())
    }
}

/// Run multiple operations in a single transaction
#[inline]
pub(crate) fn transact<T, F: FnOnce(&mut Tx) -> Result<T>>(f: F) -> Result<T> {
    let mut tx = Tx::new()?;
    let r = f(&mut tx)?;
    tx.commit()?;
    Ok(r)
}
