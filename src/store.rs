// Reservation store: the in-memory reservations and their file mirror
use crate::codec::{self, DecodeError, RECORD_SIZE};
use crate::reservation::Reservation;
use bytes::Bytes;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        StoreError::IoError {
            path: path.to_path_buf(),
            source,
        }
    }
}

// A record skipped while loading; the rest of the file still loads
#[derive(Debug, Clone, PartialEq)]
pub struct LoadIssue {
    pub index: usize,
    pub error: DecodeError,
}

#[derive(Debug, Default)]
pub struct ReservationStore {
    path: Option<PathBuf>,
    reservations: Vec<Reservation>,
    load_issues: Vec<LoadIssue>,
}

impl ReservationStore {
    // Store without a backing file; persist() does nothing
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store backed by `path`, loading any records already there.
    ///
    /// A missing file is an empty store; it is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self {
            path: Some(path.into()),
            ..Self::default()
        };
        store.load_all()?;
        Ok(store)
    }

    /// Replace the in-memory set with the contents of the backing file.
    ///
    /// Records that fail to decode are skipped and kept in [`load_issues`].
    ///
    /// [`load_issues`]: ReservationStore::load_issues
    pub fn load_all(&mut self) -> Result<usize, StoreError> {
        self.reservations.clear();
        self.load_issues.clear();

        let Some(path) = self.path.as_deref() else {
            return Ok(0);
        };

        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No reservation file at {}, starting empty", path.display());
                return Ok(0);
            }
            Err(e) => return Err(StoreError::io(path, e)),
        };

        for (index, result) in codec::decode_all(Bytes::from(data)).into_iter().enumerate() {
            match result {
                Ok(reservation) => self.reservations.push(reservation),
                Err(error) => {
                    tracing::warn!(
                        "Skipping reservation record {} in {}: {}",
                        index,
                        path.display(),
                        error
                    );
                    self.load_issues.push(LoadIssue { index, error });
                }
            }
        }

        tracing::debug!(
            "Loaded {} reservations from {} ({} skipped)",
            self.reservations.len(),
            path.display(),
            self.load_issues.len()
        );
        Ok(self.reservations.len())
    }

    // The reservation is kept in memory even if persisting fails
    pub fn append(&mut self, reservation: Reservation) -> Result<(), StoreError> {
        self.reservations.push(reservation);
        self.persist()
    }

    /// Rewrite the whole backing file from the in-memory set.
    ///
    /// The image goes to a sibling temporary file first and is renamed over
    /// the target, so a failed write leaves the previous file intact.
    pub fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let image = codec::encode_all(&self.reservations);
        let tmp_path = path.with_extension("tmp");

        let write = || -> io::Result<()> {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&image)?;
            file.sync_all()?;
            fs::rename(&tmp_path, path)
        };

        write().map_err(|e| {
            tracing::warn!(
                "Failed to persist {} reservations to {}: {}",
                self.reservations.len(),
                path.display(),
                e
            );
            let _ = fs::remove_file(&tmp_path);
            StoreError::io(path, e)
        })?;

        tracing::debug!(
            "Persisted {} reservations ({} bytes) to {}",
            self.reservations.len(),
            self.reservations.len() * RECORD_SIZE,
            path.display()
        );
        Ok(())
    }

    /// Flip the active flag of the reservation with `code` and persist.
    ///
    /// Returns `Ok(false)` when no reservation has that code.
    pub fn set_active(&mut self, code: &str, active: bool) -> Result<bool, StoreError> {
        let Some(reservation) = self.reservations.iter_mut().find(|r| r.code() == code) else {
            return Ok(false);
        };
        reservation.set_active(active);
        tracing::info!("Reservation {} set active={}", code, active);
        self.persist()?;
        Ok(true)
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.reservations.iter().any(|r| r.code() == code)
    }

    pub fn load_issues(&self) -> &[LoadIssue] {
        &self.load_issues
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }
}
