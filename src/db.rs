//! Database types and global state

use std::path::Path;
use std::sync::{Mutex, OnceLock};

use heed::types::{Bytes, Str, U64};
use heed::{Database, Env, EnvOpenOptions, RoTxn};

use crate::error::{AclError, Result};

// Database type aliases
pub type DbJson = Database<Bytes, Str>;
pub type DbU64 = Database<Bytes, U64<byteorder::BigEndian>>;

/// All database handles
pub struct Dbs {
    /// identity bytes -> JSON ACL record
    pub acls: DbJson,
    /// identity bytes -> version stamp (existence + conflict check without decode)
    pub versions: DbU64,
    /// identity bytes -> JSON element record
    pub elements: DbJson,
}

// Global state
pub static ENV: OnceLock<Env> = OnceLock::new();
pub static DBS: OnceLock<Dbs> = OnceLock::new();
pub static TEST_LOCK: Mutex<()> = Mutex::new(());
pub static INIT_PATH: OnceLock<String> = OnceLock::new();

/// Get the database handles, or error if not initialized
#[inline]
pub fn dbs() -> Result<&'static Dbs> {
    DBS.get().ok_or(AclError::Uninitialized)
}

/// Get the environment, or error if not initialized
#[inline]
pub fn env() -> Result<&'static Env> {
    ENV.get().ok_or(AclError::Uninitialized)
}

/// Execute a read-only operation
#[inline]
pub fn read<T, F: FnOnce(&Dbs, &RoTxn) -> Result<T>>(f: F) -> Result<T> {
    f(dbs()?, &env()?.read_txn()?)
}

/// Initialize the database
pub fn init(path: &str) -> Result<()> {
    if let Some(p) = INIT_PATH.get() {
        return if p == path {
            Ok(())
        } else {
            Err(AclError::AlreadyInitialized(p.clone()))
        };
    }
    std::fs::create_dir_all(path)?;
    // SAFETY: LMDB requires no other processes access this path concurrently during open.
    let e = unsafe {
        EnvOpenOptions::new()
            .map_size(1 << 30)
            .max_dbs(3)
            .open(Path::new(path))?
    };
    let mut tx = e.write_txn()?;
    let d = Dbs {
        acls: e.create_database(&mut tx, Some("acls"))?,
        versions: e.create_database(&mut tx, Some("versions"))?,
        elements: e.create_database(&mut tx, Some("elements"))?,
    };
    tx.commit()?;
    let _ = (ENV.set(e), DBS.set(d), INIT_PATH.set(path.to_string()));
    Ok(())
}

/// Clear all databases (for testing)
pub fn clear_all() -> Result<()> {
    crate::tx::transact(|tx| {
        tx.dbs().acls.clear(tx.tx())?;
        tx.dbs().versions.clear(tx.tx())?;
        tx.dbs().elements.clear(tx.tx())?;
        Ok(())
    })
}

/// Get the test lock (for single-threaded tests)
pub fn test_lock() -> std::sync::MutexGuard<'static, ()> {
    TEST_LOCK.lock().unwrap_or_else(|p| p.into_inner())
}
