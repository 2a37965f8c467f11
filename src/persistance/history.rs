use std::{
    fmt::{Display, Write as _},
    hash::Hash,
    io::Error,
    path::{Path, PathBuf},
    str::FromStr,
};

use tokio::{
    fs::OpenOptions,
    io::{AsyncReadExt, AsyncWriteExt},
};
use tracing::warn;

use crate::storage::memo::MemoCache;

use super::split_entry;

/// One history file per cache, `key=value` per line in canonical decimal
/// form. Restored on startup, rewritten whole at shutdown.
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every well-formed line into the cache and returns the number of
    /// restored entries. An absent file is created empty. Malformed lines
    /// are skipped with a diagnostic; only I/O failures abort the restore.
    pub async fn restore<K, V>(&self, cache: &MemoCache<K, V>) -> Result<u64, Error>
    where
        K: FromStr + Eq + Hash + Clone,
        V: FromStr + Clone,
    {
        let mut fr = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)
            .await?;

        let mut raw = Vec::new();
        fr.read_to_end(&mut raw).await?;
        // Non-UTF-8 garbage degrades to replacement characters, which then
        // fail numeric parsing line by line instead of aborting the restore.
        let contents = String::from_utf8_lossy(&raw);

        let mut result = 0u64;
        for line in contents.lines() {
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = split_entry(line) else {
                warn!(path = %self.path.display(), "invalid line format: {}", line);
                continue;
            };
            let Ok(key) = key.parse::<K>() else {
                warn!(path = %self.path.display(), "invalid key format: {}", key);
                continue;
            };
            let Ok(value) = value.parse::<V>() else {
                warn!(path = %self.path.display(), "invalid value format: {}", value);
                continue;
            };

            cache.write(key, value);
            result += 1;
        }

        Ok(result)
    }

    /// Truncates the file and writes the cache's current entries, one per
    /// line, in unspecified order. Returns the number written.
    pub async fn snapshot<K, V>(&self, cache: &MemoCache<K, V>) -> Result<u64, Error>
    where
        K: Display + Eq + Hash + Clone,
        V: Display + Clone,
    {
        let mut fw = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .await?;

        let entries = cache.entries();
        let mut buf = String::new();
        for (key, value) in entries.iter() {
            let _ = writeln!(buf, "{}={}", key, value);
        }

        fw.write_all(buf.as_bytes()).await?;
        fw.flush().await?;

        Ok(entries.len() as u64)
    }
}
