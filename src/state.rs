// Application state module
// Everything a request needs, built once at boot and shared read-only

use crate::assets::{AssetRegistry, AssetStore};
use crate::device::ConfigurationRecord;
use crate::settings::Settings;
use crate::template::TokenTable;

/// Application state
pub struct AppState {
    pub settings: Settings,
    /// Device identity loaded (or healed) at boot
    pub identity: ConfigurationRecord,
    pub registry: AssetRegistry,
    pub assets: AssetStore,
    pub tokens: TokenTable,
}

impl AppState {
    /// State for the bundled UI served from the configured asset root
    pub fn new(settings: Settings, identity: ConfigurationRecord) -> Self {
        let assets = AssetStore::directory(&settings.assets.root);
        Self::with_parts(settings, identity, AssetRegistry::bundled(), assets)
    }

    pub fn with_parts(
        settings: Settings,
        identity: ConfigurationRecord,
        registry: AssetRegistry,
        assets: AssetStore,
    ) -> Self {
        Self {
            settings,
            identity,
            registry,
            assets,
            tokens: TokenTable::standard(),
        }
    }
}
