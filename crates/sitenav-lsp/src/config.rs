use serde::{Deserialize, Serialize};
use sitenav_core::NavigationConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetSettings {
    /// Logging level for the server
    pub log_level: LogLevel,

    /// Open the widget on its settings view
    pub show_settings: bool,

    /// Whether pages may be dragged and moved
    pub edit_mode: bool,

    /// Endpoint that receives batched updates
    pub batch_endpoint: String,

    pub navigation: NavigationConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            show_settings: false,
            edit_mode: false,
            batch_endpoint: "/system/batch".to_string(),
            navigation: NavigationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_from_partial_options() {
        let settings: WidgetSettings = serde_json::from_value(json!({
            "editMode": true,
            "logLevel": "warning",
            "navigation": {"hierarchy": {"start_depth": 2}}
        }))
        .unwrap();

        assert!(settings.edit_mode);
        assert_eq!(settings.log_level, LogLevel::Warning);
        assert_eq!(settings.batch_endpoint, "/system/batch");
        assert_eq!(settings.navigation.hierarchy.start_depth, 2);
        assert_eq!(settings.navigation.presentation.node_id_prefix, "nav_");
        assert_eq!(settings.log_level.to_filter(), log::LevelFilter::Warn);
    }
}
