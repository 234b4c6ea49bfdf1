use serde::{Deserialize, Serialize};

use crate::clipboard::DEFAULT_MAX_RECORDS;
use crate::proxy::ProxyConfig;

/// User-editable settings persisted across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub proxy: ProxyConfig,
    pub max_records: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            proxy: ProxyConfig::default(),
            max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.max_records, 1000);
    }

    #[test]
    fn round_trips_through_json() {
        let settings = Settings {
            proxy: ProxyConfig {
                enabled: true,
                host: "127.0.0.1".into(),
                port: "7890".into(),
                ..Default::default()
            },
            max_records: 50,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"max_records\":50"));
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
