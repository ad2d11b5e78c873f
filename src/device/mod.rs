//! Device identity module
//!
//! Holds the versioned configuration record, its storage backends and the
//! store that validates and heals it at boot.

mod eeprom;
mod record;
mod store;

pub use eeprom::{FileEeprom, MemEeprom, ERASED};
pub use record::{
    ConfigurationRecord, DeviceName, NameError, CONFIG_VERSION, DEFAULT_DEVICE_NAME,
    DEVICE_NAME_SIZE, RECORD_SIZE, VERSION_TAG, VERSION_TAG_LEN,
};
pub use store::ConfigStore;

use crate::error::StorageError;
use crate::settings::{StorageBackend, StorageSettings};

/// Open the configured backend and run the boot load/heal sequence.
///
/// Returns the identity record and whether this boot was a cold start.
pub fn boot_identity(settings: &StorageSettings) -> Result<(ConfigurationRecord, bool), StorageError> {
    match settings.backend {
        StorageBackend::File => {
            let eeprom = FileEeprom::open(&settings.path, settings.capacity)?;
            Ok(ConfigStore::new(eeprom, settings.offset).load_or_init())
        }
        StorageBackend::Memory => {
            let eeprom = MemEeprom::new(settings.capacity);
            Ok(ConfigStore::new(eeprom, settings.offset).load_or_init())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(backend: StorageBackend, name: &str, capacity: usize) -> StorageSettings {
        let path = std::env::temp_dir().join(format!("benchpsu-boot-{}-{name}.bin", std::process::id()));
        let _ = std::fs::remove_file(&path);
        StorageSettings {
            backend,
            path: path.to_string_lossy().into_owned(),
            offset: 0,
            capacity,
        }
    }

    #[test]
    fn test_file_identity_survives_reboot() {
        let settings = storage(StorageBackend::File, "reboot", 64);

        let first = boot_identity(&settings).unwrap();
        assert_eq!(first, (ConfigurationRecord::default(), true));

        let second = boot_identity(&settings).unwrap();
        assert_eq!(second, (ConfigurationRecord::default(), false));

        std::fs::remove_file(&settings.path).unwrap();
    }

    #[test]
    fn test_memory_backend_always_cold() {
        let settings = storage(StorageBackend::Memory, "memory", 64);
        for _ in 0..2 {
            assert_eq!(boot_identity(&settings).unwrap(), (ConfigurationRecord::default(), true));
        }
        assert!(!std::path::Path::new(&settings.path).exists());
    }

    #[test]
    fn test_undersized_region_boots_with_defaults() {
        let mut settings = storage(StorageBackend::File, "undersized", 32);
        settings.offset = 8;
        assert!(usize::try_from(settings.offset).unwrap() + RECORD_SIZE > settings.capacity);

        for _ in 0..2 {
            assert_eq!(boot_identity(&settings).unwrap(), (ConfigurationRecord::default(), true));
        }

        std::fs::remove_file(&settings.path).unwrap();
    }
}
