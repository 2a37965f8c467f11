use std::{io::Error, path::PathBuf};

use num_bigint::BigInt;
use tokio::task::JoinError;
use tracing::{error, info};

use crate::{persistance::history::HistoryFile, storage::memo::MemoCache};

/// Owns the three memo caches and their history files for the process
/// lifetime. Caches are populated by `restore` at startup, filled by the
/// compute functions while serving, and written back once by `flush` when
/// shutdown begins.
#[derive(Debug, Clone)]
pub struct Application {
    fact_cache: MemoCache<i64, i64>,
    fib_cache: MemoCache<i64, i64>,
    big_fact_cache: MemoCache<BigInt, BigInt>,
    fact_history: HistoryFile,
    fib_history: HistoryFile,
    big_fact_history: HistoryFile,
}

impl Application {
    pub fn new(
        fib_history: impl Into<PathBuf>,
        fact_history: impl Into<PathBuf>,
        big_fact_history: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fact_cache: MemoCache::new(),
            fib_cache: MemoCache::new(),
            big_fact_cache: MemoCache::new(),
            fact_history: HistoryFile::new(fact_history),
            fib_history: HistoryFile::new(fib_history),
            big_fact_history: HistoryFile::new(big_fact_history),
        }
    }

    pub fn fact_cache(&self) -> &MemoCache<i64, i64> {
        &self.fact_cache
    }

    pub fn fib_cache(&self) -> &MemoCache<i64, i64> {
        &self.fib_cache
    }

    pub fn big_fact_cache(&self) -> &MemoCache<BigInt, BigInt> {
        &self.big_fact_cache
    }

    /// Loads all three caches from their history files. Any I/O failure is
    /// propagated so the caller can abort before serving; absent files are
    /// created empty and restore nothing.
    pub async fn restore(&self) -> Result<(), Error> {
        let n = self.fib_history.restore(&self.fib_cache).await?;
        info!(
            entries = n,
            "restored fibonacci history from {}",
            self.fib_history.path().display()
        );

        let n = self.fact_history.restore(&self.fact_cache).await?;
        info!(
            entries = n,
            "restored factorial history from {}",
            self.fact_history.path().display()
        );

        let n = self.big_fact_history.restore(&self.big_fact_cache).await?;
        info!(
            entries = n,
            "restored big factorial history from {}",
            self.big_fact_history.path().display()
        );

        Ok(())
    }

    /// Writes all three caches to disk concurrently and waits for every save
    /// to finish. Save failures are logged and do not stop the others; the
    /// return value is the total number of entries written.
    pub async fn flush(&self) -> u64 {
        let fib = {
            let history = self.fib_history.clone();
            let cache = self.fib_cache.clone();
            tokio::spawn(async move { history.snapshot(&cache).await })
        };
        let fact = {
            let history = self.fact_history.clone();
            let cache = self.fact_cache.clone();
            tokio::spawn(async move { history.snapshot(&cache).await })
        };
        let big_fact = {
            let history = self.big_fact_history.clone();
            let cache = self.big_fact_cache.clone();
            tokio::spawn(async move { history.snapshot(&cache).await })
        };

        let (fib, fact, big_fact) = tokio::join!(fib, fact, big_fact);

        report("fibonacci", &self.fib_history, fib)
            + report("factorial", &self.fact_history, fact)
            + report("big factorial", &self.big_fact_history, big_fact)
    }
}

fn report(name: &str, history: &HistoryFile, res: Result<Result<u64, Error>, JoinError>) -> u64 {
    match res {
        Ok(Ok(n)) => {
            info!(
                entries = n,
                "saved {} history to {}",
                name,
                history.path().display()
            );
            n
        }
        Ok(Err(e)) => {
            error!("failed to save {} history: {}", name, e);
            0
        }
        Err(e) => {
            error!("{} history save task failed: {}", name, e);
            0
        }
    }
}
