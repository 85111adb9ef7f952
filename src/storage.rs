// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::timestamp::Timestamp;

pub const STORAGE_FILE_NAME: &str = "coursenav.db";

/// A string key-value store with the semantics of browser local storage:
/// reads and writes are synchronous and the last writer wins.
#[derive(Clone)]
pub struct Storage {
    conn: Arc<Mutex<Connection>>,
}

impl Storage {
    pub fn open(path: &Path) -> Fallible<Self> {
        log::debug!("Opening storage at {}", path.display());
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(mut conn: Connection) -> Fallible<Self> {
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    pub fn get_item(&self, key: &str) -> Fallible<Option<String>> {
        let conn = self.acquire()?;
        let sql = "select value from storage where key = ?;";
        let value: Option<String> = conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    pub fn set_item(&self, key: &str, value: &str) -> Fallible<()> {
        let conn = self.acquire()?;
        let sql = "insert into storage (key, value, updated_at) values (?, ?, ?) on conflict (key) do update set value = excluded.value, updated_at = excluded.updated_at;";
        conn.execute(sql, (key, value, Timestamp::now()))?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Fallible<()> {
        let conn = self.acquire()?;
        conn.execute("delete from storage where key = ?;", [key])?;
        Ok(())
    }

    /// When the entry under `key` was last written.
    pub fn updated_at(&self, key: &str) -> Fallible<Option<Timestamp>> {
        let conn = self.acquire()?;
        let sql = "select updated_at from storage where key = ?;";
        let ts: Option<Timestamp> = conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(ts)
    }

    fn acquire(&self) -> Fallible<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ErrorReport::new("storage lock poisoned"))
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["storage"], |row| row.get(0))?;
    Ok(count > 0)
}
