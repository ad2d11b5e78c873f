//! Emulated EEPROM backends
//!
//! Both implement the `embedded-storage` byte-addressable traits so the
//! config store does not care whether it runs against a file on a host, a RAM
//! buffer in tests, or a flash driver on a board.

use embedded_storage::{ReadStorage, Storage};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{check_bounds, StorageError};

/// Value of an erased cell
pub const ERASED: u8 = 0xFF;

/// RAM-backed storage, starts fully erased
#[derive(Debug, Clone)]
pub struct MemEeprom {
    cells: Vec<u8>,
}

impl MemEeprom {
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: vec![ERASED; capacity],
        }
    }

    /// Raw view of the cells
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }
}

impl ReadStorage for MemEeprom {
    type Error = StorageError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let start = check_bounds(offset, bytes.len(), self.cells.len())?;
        bytes.copy_from_slice(&self.cells[start..start + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.cells.len()
    }
}

impl Storage for MemEeprom {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let start = check_bounds(offset, bytes.len(), self.cells.len())?;
        self.cells[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

/// File-backed storage of fixed capacity
///
/// A new file is created filled with erased cells. An existing file shorter
/// than the capacity is extended with erased cells.
#[derive(Debug)]
pub struct FileEeprom {
    path: PathBuf,
    file: File,
    capacity: usize,
}

impl FileEeprom {
    pub fn open(path: impl AsRef<Path>, capacity: usize) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        let current = usize::try_from(file.metadata()?.len()).unwrap_or(usize::MAX);
        if current < capacity {
            file.seek(SeekFrom::End(0))?;
            file.write_all(&vec![ERASED; capacity - current])?;
            file.sync_all()?;
        }

        Ok(Self {
            path,
            file,
            capacity,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReadStorage for FileEeprom {
    type Error = StorageError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        check_bounds(offset, bytes.len(), self.capacity)?;
        self.file.seek(SeekFrom::Start(u64::from(offset)))?;
        self.file.read_exact(bytes)?;
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Storage for FileEeprom {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        check_bounds(offset, bytes.len(), self.capacity)?;
        self.file.seek(SeekFrom::Start(u64::from(offset)))?;
        self.file.write_all(bytes)?;
        // Commit before returning so the caller can treat the write as durable
        self.file.sync_data()?;
        Ok(())
    }
}
