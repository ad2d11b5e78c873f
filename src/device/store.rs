//! Config store: load, validate and persist the identity record

use embedded_storage::Storage;
use std::fmt::Display;

use super::record::{ConfigurationRecord, RECORD_SIZE};
use crate::logger;

/// Owns the storage backend and the offset of the record inside it.
///
/// Storage is only touched at boot: one `load`, and on a cold start one `save`.
pub struct ConfigStore<S> {
    storage: S,
    offset: u32,
}

impl<S> ConfigStore<S>
where
    S: Storage,
    S::Error: Display,
{
    pub const fn new(storage: S, offset: u32) -> Self {
        Self { storage, offset }
    }

    /// Read the record.
    ///
    /// Returns the stored record and `true` when its version tag matches,
    /// otherwise the compiled-in defaults and `false`. A read failure counts
    /// as an absent record.
    pub fn load(&mut self) -> (ConfigurationRecord, bool) {
        let mut buf = [0u8; RECORD_SIZE];
        if let Err(e) = self.storage.read(self.offset, &mut buf) {
            logger::log_warning(&format!(
                "Config read at offset {} failed, using defaults: {e}",
                self.offset
            ));
            return (ConfigurationRecord::default(), false);
        }

        if ConfigurationRecord::has_valid_tag(&buf) {
            (ConfigurationRecord::decode(&buf), true)
        } else {
            (ConfigurationRecord::default(), false)
        }
    }

    /// Write the full record back to storage.
    pub fn try_save(&mut self, record: &ConfigurationRecord) -> Result<(), S::Error> {
        self.storage.write(self.offset, &record.encode())
    }

    /// Write the full record; failures are logged, not returned.
    pub fn save(&mut self, record: &ConfigurationRecord) {
        if let Err(e) = self.try_save(record) {
            logger::log_error(&format!(
                "Failed to persist config at offset {}: {e}",
                self.offset
            ));
        }
    }

    /// Boot path: load, and heal a missing or stale record by persisting defaults.
    ///
    /// The second element is `true` on a cold start.
    pub fn load_or_init(&mut self) -> (ConfigurationRecord, bool) {
        let (record, found) = self.load();
        if found {
            logger::write_info(&format!(
                "[Config] Loaded device identity '{}' (version {})",
                record.device_name,
                record.version_str()
            ));
        } else {
            logger::write_info("[Config] No valid config found, writing defaults (cold start)");
            self.save(&record);
        }
        (record, !found)
    }

    pub fn into_inner(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::eeprom::{MemEeprom, ERASED};
    use crate::device::record::{DeviceName, DEFAULT_DEVICE_NAME, VERSION_TAG};
    use embedded_storage::ReadStorage;

    fn named(name: &str) -> ConfigurationRecord {
        ConfigurationRecord::with_name(DeviceName::new(name).unwrap())
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut store = ConfigStore::new(MemEeprom::new(64), 0);
        let record = named("bench-left");
        store.save(&record);
        assert_eq!(store.load(), (record, true));
    }

    #[test]
    fn test_round_trip_at_offset() {
        let mut store = ConfigStore::new(MemEeprom::new(128), 40);
        let record = named("rack-2");
        store.try_save(&record).unwrap();
        assert_eq!(store.load(), (record, true));

        let mem = store.into_inner();
        assert_eq!(mem.as_bytes()[0], ERASED);
        assert_eq!(&mem.as_bytes()[40..44], &VERSION_TAG);
    }

    #[test]
    fn test_erased_storage_is_absent() {
        let mut store = ConfigStore::new(MemEeprom::new(64), 0);
        let (record, found) = store.load();
        assert!(!found);
        assert_eq!(record, ConfigurationRecord::default());
        assert_eq!(record.device_name.as_str(), DEFAULT_DEVICE_NAME);
    }

    #[test]
    fn test_foreign_tag_is_absent() {
        let mut mem = MemEeprom::new(64);
        let mut stale = named("old-firmware").encode();
        stale[1] = b'0';
        embedded_storage::Storage::write(&mut mem, 0, &stale).unwrap();

        let mut store = ConfigStore::new(mem, 0);
        assert_eq!(store.load(), (ConfigurationRecord::default(), false));
    }

    #[test]
    fn test_shorter_name_leaves_no_residue() {
        let mut store = ConfigStore::new(MemEeprom::new(64), 0);
        store.save(&named("a-very-long-device-name"));
        store.save(&named("psu"));

        let (record, found) = store.load();
        assert!(found);
        assert_eq!(record.device_name.as_str(), "psu");
    }

    #[test]
    fn test_load_or_init_heals_cold_start() {
        let mut store = ConfigStore::new(MemEeprom::new(64), 0);
        let (record, cold) = store.load_or_init();
        assert!(cold);
        assert_eq!(record, ConfigurationRecord::default());

        // Second boot sees the persisted defaults
        let (again, cold) = store.load_or_init();
        assert!(!cold);
        assert_eq!(again, record);
    }

    #[test]
    fn test_region_past_capacity_is_absent() {
        let mut store = ConfigStore::new(MemEeprom::new(16), 0);
        let (record, found) = store.load();
        assert!(!found);
        assert_eq!(record, ConfigurationRecord::default());

        // Save is silent even though the write cannot land
        store.save(&record);
        assert_eq!(store.into_inner().capacity(), 16);
    }
}
