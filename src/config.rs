//! Application configuration.
//!
//! Every externally supplied value lives in an explicit struct with a
//! documented default. Values come from environment variables named after
//! the deployed front-end's build variables (`VITE_*`); an empty variable
//! counts as unset.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://seedbackend-l5dv.onrender.com";

/// Default customer name shown in the UI chrome.
pub const DEFAULT_CUSTOMER_NAME: &str = "sistema gestão";

// ─── Env variable names ──────────────────────────────────────────────────────

pub const ENV_API_BASE_URL: &str = "VITE_API_BASE_URL";
pub const ENV_CUSTOMER: &str = "VITE_CUSTOMER";
pub const ENV_PRIMARY: &str = "VITE_PRIMARY";
pub const ENV_SECONDARY: &str = "VITE_SECONDARY";
pub const ENV_SUCCESS: &str = "VITE_SUCCESS";
pub const ENV_INFO: &str = "VITE_INFO";
pub const ENV_WARNING: &str = "VITE_WARNING";
pub const ENV_ERROR: &str = "VITE_ERROR";
pub const ENV_SUBMIT: &str = "VITE_SUBMIT";
// Misspelling is the name the deployments already use.
pub const ENV_PENDING: &str = "VITE_PENDDING";
pub const ENV_LOGO_PATH_LIGHT: &str = "VITE_LOGO_PATH_LIGHT";
pub const ENV_LOGO_PATH_DARK: &str = "VITE_LOGO_PATH_DARK";
pub const ENV_ICON_PAGE: &str = "VITE_ICON_PAGE";
pub const ENV_LOGIN_IMAGE: &str = "VITE_LOGIN_IMAGE";
pub const ENV_CUSTOMER_NAME: &str = "VITE_CUSTOMER_NAME";

// ─── AppConfig ───────────────────────────────────────────────────────────────

/// Everything the application reads from its environment at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub palette: Palette,
    pub branding: Branding,
}

impl AppConfig {
    /// Load from the process environment, after merging an optional `.env`
    /// file from the working directory (already-set variables win).
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment overrides from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Missing or empty values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Self {
            api: ApiConfig {
                base_url: or(ENV_API_BASE_URL, DEFAULT_API_URL),
                ..ApiConfig::default()
            },
            palette: Palette {
                customer: or(ENV_CUSTOMER, Palette::CUSTOMER),
                primary: or(ENV_PRIMARY, Palette::PRIMARY),
                secondary: or(ENV_SECONDARY, Palette::SECONDARY),
                success: or(ENV_SUCCESS, Palette::SUCCESS),
                info: or(ENV_INFO, Palette::INFO),
                warning: or(ENV_WARNING, Palette::WARNING),
                error: or(ENV_ERROR, Palette::ERROR),
                submit: or(ENV_SUBMIT, Palette::SUBMIT),
                pending: or(ENV_PENDING, Palette::PENDING),
            },
            branding: Branding {
                logo_light: get(ENV_LOGO_PATH_LIGHT),
                logo_dark: get(ENV_LOGO_PATH_DARK),
                icon_page: get(ENV_ICON_PAGE),
                login_image: get(ENV_LOGIN_IMAGE),
                customer_name: or(ENV_CUSTOMER_NAME, DEFAULT_CUSTOMER_NAME),
            },
        }
    }

    /// The light and dark theme variants built from this config.
    pub fn theme(&self) -> Theme {
        Theme {
            light: ThemeVariant {
                dark: false,
                colors: Some(self.palette.clone()),
                branding: self.branding.clone(),
            },
            dark: ThemeVariant {
                dark: true,
                colors: None,
                branding: self.branding.clone(),
            },
        }
    }
}

// ─── ApiConfig ───────────────────────────────────────────────────────────────

/// Settings for the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend root, e.g. `https://api.example.com`. Trailing slashes are ignored.
    pub base_url: String,
    /// Whole-request timeout handed to the transport. `None` keeps the
    /// transport's own behavior.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Overrides the transport's `User-Agent`.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Base URL without trailing slashes, validated to be an http(s) URL.
    pub fn normalized_base_url(&self) -> Result<String, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let has_host = ["http://", "https://"]
            .iter()
            .any(|scheme| trimmed.len() > scheme.len() && trimmed.starts_with(scheme));
        if !has_host {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(trimmed.to_string())
    }
}

// ─── Palette ─────────────────────────────────────────────────────────────────

/// Theme colour tokens (CSS colour strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub customer: String,
    pub primary: String,
    pub secondary: String,
    pub success: String,
    pub info: String,
    pub warning: String,
    pub error: String,
    pub submit: String,
    pub pending: String,
}

impl Palette {
    pub const CUSTOMER: &'static str = "#1f3799";
    pub const PRIMARY: &'static str = "#2E8DD6";
    pub const SECONDARY: &'static str = "#9e9da6";
    pub const SUCCESS: &'static str = "#22C55E";
    pub const INFO: &'static str = "#03C3EC";
    pub const WARNING: &'static str = "#f59e0b";
    pub const ERROR: &'static str = "#EF4444";
    pub const SUBMIT: &'static str = "#16A34A";
    pub const PENDING: &'static str = "#F97316";
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            customer: Self::CUSTOMER.to_string(),
            primary: Self::PRIMARY.to_string(),
            secondary: Self::SECONDARY.to_string(),
            success: Self::SUCCESS.to_string(),
            info: Self::INFO.to_string(),
            warning: Self::WARNING.to_string(),
            error: Self::ERROR.to_string(),
            submit: Self::SUBMIT.to_string(),
            pending: Self::PENDING.to_string(),
        }
    }
}

// ─── Branding ────────────────────────────────────────────────────────────────

/// Customer branding assets. Asset paths have no default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    pub logo_light: Option<String>,
    pub logo_dark: Option<String>,
    pub icon_page: Option<String>,
    pub login_image: Option<String>,
    pub customer_name: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            logo_light: None,
            logo_dark: None,
            icon_page: None,
            login_image: None,
            customer_name: DEFAULT_CUSTOMER_NAME.to_string(),
        }
    }
}

// ─── Theme ───────────────────────────────────────────────────────────────────

/// Light + dark theme pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub light: ThemeVariant,
    pub dark: ThemeVariant,
}

/// One theme variant. The dark variant carries no colour overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeVariant {
    pub dark: bool,
    pub colors: Option<Palette>,
    pub branding: Branding,
}
