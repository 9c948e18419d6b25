//! File-backed subscription store.
//!
//! Layout on disk:
//!
//! ```text
//! <root>/MANIFEST        magic + version
//! <root>/LOCK            exclusive advisory lock while the store is open
//! <root>/total           global creation counter, 8 big-endian bytes
//! <root>/slots/<xx>/<hex-subscriber-id>   one framed slot file per subscriber
//! ```
//!
//! Slot files carry their own magic, version, length and crc32 checksum so
//! corruption is detected on read rather than decoded into garbage.

use crate::error::{Result, SubscriptionError};
use crate::store::SubscriptionStore;
use crate::types::SubscriberId;
use fs2::FileExt;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Magic bytes for the store manifest.
const STORE_MAGIC: &[u8; 4] = b"SBL\0";

/// Magic bytes for slot files.
const SLOT_MAGIC: &[u8; 4] = b"SUB\0";

/// Current on-disk format version (manifest and slot files).
const STORE_VERSION: u8 = 1;

/// File-backed slot storage, one framed file per subscriber.
pub struct FileStore {
    /// Base directory of the store.
    path: PathBuf,

    /// Lock file held for exclusive access.
    _lock_file: File,
}

impl FileStore {
    /// Open an existing store or create a new one at `path`.
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if path.join("MANIFEST").exists() {
            Self::verify_manifest(&path)?;
        } else {
            fs::create_dir_all(path.join("slots"))?;
            Self::write_manifest(&path)?;
        }

        let lock_file = Self::acquire_lock(&path)?;

        Ok(Self {
            path,
            _lock_file: lock_file,
        })
    }

    fn write_manifest(path: &Path) -> Result<()> {
        let mut file = File::create(path.join("MANIFEST"))?;
        file.write_all(STORE_MAGIC)?;
        file.write_all(&[STORE_VERSION])?;
        file.sync_all()?;
        Ok(())
    }

    fn verify_manifest(path: &Path) -> Result<()> {
        let mut file = File::open(path.join("MANIFEST"))?;

        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;
        if &magic != STORE_MAGIC {
            return Err(SubscriptionError::InvalidFormat(
                "Invalid store magic".into(),
            ));
        }

        let mut version = [0u8; 1];
        file.read_exact(&mut version)?;
        if version[0] != STORE_VERSION {
            return Err(SubscriptionError::InvalidFormat(format!(
                "Unsupported store version: {}",
                version[0]
            )));
        }

        Ok(())
    }

    fn acquire_lock(path: &Path) -> Result<File> {
        let lock_file = File::create(path.join("LOCK"))?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| SubscriptionError::Locked)?;

        Ok(lock_file)
    }

    /// Shard directory for a subscriber (first identity byte, hex).
    fn shard_path(&self, key: &SubscriberId) -> PathBuf {
        self.path.join("slots").join(key.shard_prefix())
    }

    /// Full path of a subscriber's slot file.
    fn slot_path(&self, key: &SubscriberId) -> PathBuf {
        self.shard_path(key).join(key.to_hex())
    }

    fn total_path(&self) -> PathBuf {
        self.path.join("total")
    }
}

impl SubscriptionStore for FileStore {
    fn exists(&self, key: &SubscriberId) -> bool {
        self.slot_path(key).exists()
    }

    fn get(&self, key: &SubscriberId) -> Result<Vec<u8>> {
        let slot_path = self.slot_path(key);
        if !slot_path.exists() {
            return Err(SubscriptionError::NotFound(*key));
        }

        let mut file = File::open(&slot_path)?;

        // Read and verify header
        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;
        if &magic != SLOT_MAGIC {
            return Err(SubscriptionError::InvalidFormat(
                "Invalid slot magic".into(),
            ));
        }

        let mut version = [0u8; 1];
        file.read_exact(&mut version)?;
        if version[0] != STORE_VERSION {
            return Err(SubscriptionError::InvalidFormat(format!(
                "Unsupported slot version: {}",
                version[0]
            )));
        }

        // Read payload
        let mut len_bytes = [0u8; 4];
        file.read_exact(&mut len_bytes)?;
        let len = u32::from_le_bytes(len_bytes) as usize;

        let mut payload = vec![0u8; len];
        file.read_exact(&mut payload)?;

        // Verify checksum
        let mut checksum_bytes = [0u8; 4];
        file.read_exact(&mut checksum_bytes)?;
        let stored_checksum = u32::from_le_bytes(checksum_bytes);
        let computed_checksum = crc32fast::hash(&payload);

        if stored_checksum != computed_checksum {
            return Err(SubscriptionError::ChecksumMismatch {
                expected: stored_checksum,
                got: computed_checksum,
            });
        }

        Ok(payload)
    }

    fn put(&self, key: &SubscriberId, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(self.shard_path(key))?;

        // Creating the file fresh covers both allocation and overwrite
        let mut file = File::create(self.slot_path(key))?;

        file.write_all(SLOT_MAGIC)?;
        file.write_all(&[STORE_VERSION])?;

        let len = bytes.len() as u32;
        file.write_all(&len.to_le_bytes())?;
        file.write_all(bytes)?;

        let checksum = crc32fast::hash(bytes);
        file.write_all(&checksum.to_le_bytes())?;

        file.sync_all()?;
        Ok(())
    }

    fn delete(&self, key: &SubscriberId) -> Result<()> {
        let slot_path = self.slot_path(key);
        if !slot_path.exists() {
            return Err(SubscriptionError::NotFound(*key));
        }
        fs::remove_file(slot_path)?;
        Ok(())
    }

    fn load_total(&self) -> Result<u64> {
        let total_path = self.total_path();
        if !total_path.exists() {
            return Ok(0);
        }

        let mut file = File::open(total_path)?;
        let mut buf = [0u8; 8];
        file.read_exact(&mut buf)?;
        Ok(u64::from_be_bytes(buf))
    }

    fn persist_total(&self, total: u64) -> Result<()> {
        let mut file = File::create(self.total_path())?;
        file.write_all(&total.to_be_bytes())?;
        file.sync_all()?;
        Ok(())
    }
}
