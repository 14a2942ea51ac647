//! SQLite-backed known-accounts registry.
//!
//! Two tables: `aliases` holds user-assigned names, `registry` caches the
//! last successfully fetched remote registry so aliases survive offline
//! starts. Both are returned in insertion order.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::domain::account::KnownAccount;

#[derive(Debug)]
pub struct KnownAccountStore {
    conn: Connection,
}

impl KnownAccountStore {
    /// Open or create the database, creating its parent directory first.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create data dir {}", parent.display()))?;
        }
        let conn = Connection::open(path).with_context(|| format!("open db {}", path.display()))?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init()?;
        Ok(store)
    }

    // === User aliases ===

    pub fn load_aliases(&self) -> Result<Vec<KnownAccount>> {
        self.load_table("SELECT account, alias FROM aliases ORDER BY seq")
    }

    pub fn set_alias(&self, account: &str, alias: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO aliases(account, alias) VALUES (?1, ?2)
             ON CONFLICT(account) DO UPDATE SET alias=excluded.alias",
            params![account, alias],
        )?;
        Ok(())
    }

    pub fn remove_alias(&self, account: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM aliases WHERE account = ?1", params![account])?;
        Ok(removed > 0)
    }

    // === Cached registry ===

    pub fn load_registry(&self) -> Result<Vec<KnownAccount>> {
        self.load_table("SELECT account, alias FROM registry ORDER BY seq")
    }

    /// Replace the cached registry. Duplicate accounts keep their first alias.
    pub fn replace_registry(&mut self, accounts: &[KnownAccount]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM registry", [])?;
        {
            let mut stmt =
                tx.prepare("INSERT OR IGNORE INTO registry(account, alias) VALUES (?1, ?2)")?;
            for known in accounts {
                stmt.execute(params![known.account, known.alias])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_table(&self, sql: &str) -> Result<Vec<KnownAccount>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(KnownAccount {
                account: row.get(0)?,
                alias: row.get(1)?,
            });
        }
        Ok(out)
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS aliases (
                seq     INTEGER PRIMARY KEY AUTOINCREMENT,
                account TEXT NOT NULL UNIQUE,
                alias   TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS registry (
                seq     INTEGER PRIMARY KEY AUTOINCREMENT,
                account TEXT NOT NULL UNIQUE,
                alias   TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}
