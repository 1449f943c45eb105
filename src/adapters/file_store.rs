use crate::config::StoreConfig;
use crate::domain::model::{ParticipantRecord, RecordFormat, HEADER_LINE};
use crate::domain::ports::ParticipantStore;
use crate::utils::error::{FormError, Result};
use async_trait::async_trait;
use std::fs::{self, File, OpenOptions, TryLockError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Flat-file store: one line per record, appended under an exclusive file lock.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    format: RecordFormat,
    header: bool,
    lock_timeout: Duration,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: RecordFormat::Raw,
            header: false,
            lock_timeout: Duration::from_millis(StoreConfig::DEFAULT_LOCK_TIMEOUT_MS),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.path)
            .with_format(config.format)
            .with_header(config.header)
            .with_lock_timeout(Duration::from_millis(config.lock_timeout_ms))
    }

    pub fn with_format(mut self, format: RecordFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the directory the store lives in, if it is missing.
    pub fn prepare(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| self.write_failure(source))?;
            }
        }
        Ok(())
    }

    fn write_failure(&self, source: std::io::Error) -> FormError {
        FormError::StorageWriteFailure {
            path: self.path.clone(),
            source,
        }
    }

    fn append_blocking(&self, line: &[u8]) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.write_failure(source))?;

        let mut lock = StoreLock::acquire(file, &self.path, self.lock_timeout)?;

        if self.header {
            let len = lock
                .file()
                .metadata()
                .map_err(|source| self.write_failure(source))?
                .len();
            if len == 0 {
                lock.write_all(HEADER_LINE)
                    .map_err(|source| self.write_failure(source))?;
            }
        }

        lock.write_all(line)
            .map_err(|source| self.write_failure(source))?;
        Ok(())
    }
}

#[async_trait]
impl ParticipantStore for FileStore {
    async fn append(&self, record: &ParticipantRecord) -> Result<()> {
        let line = record.to_line(self.format)?;
        let store = self.clone();

        tokio::task::spawn_blocking(move || store.append_blocking(&line))
            .await
            .map_err(|e| FormError::Io(std::io::Error::other(e)))??;

        tracing::debug!(path = %self.path.display(), "record appended");
        Ok(())
    }
}

/// Exclusive lock on the store file, released when dropped.
struct StoreLock {
    file: File,
}

impl StoreLock {
    fn acquire(file: File, path: &Path, timeout: Duration) -> Result<Self> {
        let started = Instant::now();
        loop {
            match file.try_lock() {
                Ok(()) => return Ok(Self { file }),
                Err(TryLockError::WouldBlock) => {
                    let waited = started.elapsed();
                    if waited >= timeout {
                        return Err(FormError::LockTimeout {
                            path: path.to_path_buf(),
                            waited,
                        });
                    }
                    std::thread::sleep(LOCK_POLL_INTERVAL);
                }
                Err(TryLockError::Error(source)) => {
                    return Err(FormError::StorageWriteFailure {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            }
        }
    }

    fn file(&self) -> &File {
        &self.file
    }

    /// The whole line goes out in a single write so readers never see half a record.
    fn write_all(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.file.write_all(bytes)?;
        self.file.flush()
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!("Failed to release store lock: {}", e);
        }
    }
}
