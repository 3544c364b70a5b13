use serde::{Deserialize, Serialize};

/// The browser identity presented to the platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientProfile {
    #[default]
    Windows,
    Mac,
    Linux,
}

pub struct ProfileConfig {
    pub user_agent: &'static str,
    pub os_name: &'static str,
    pub os_version: &'static str,
    pub platform: &'static str,
    pub utc_offset_minutes: i32,
    pub user_interface_theme: &'static str,
}

impl ClientProfile {
    pub fn config(&self) -> ProfileConfig {
        match self {
            ClientProfile::Windows => ProfileConfig {
                user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
                os_name: "Windows",
                os_version: "10.0",
                platform: "DESKTOP",
                utc_offset_minutes: 0,
                user_interface_theme: "USER_INTERFACE_THEME_LIGHT",
            },
            ClientProfile::Mac => ProfileConfig {
                user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
                os_name: "Macintosh",
                os_version: "10_15_7",
                platform: "DESKTOP",
                utc_offset_minutes: 0,
                user_interface_theme: "USER_INTERFACE_THEME_LIGHT",
            },
            ClientProfile::Linux => ProfileConfig {
                user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
                os_name: "X11",
                os_version: "",
                platform: "DESKTOP",
                utc_offset_minutes: 0,
                user_interface_theme: "USER_INTERFACE_THEME_LIGHT",
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClientProfile::Windows => "Windows",
            ClientProfile::Mac => "macOS",
            ClientProfile::Linux => "Linux",
        }
    }
}
