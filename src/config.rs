//! Dashboard configuration.
//!
//! Defaults: five rows per page out of `[5, 10, 25, 50]`, with
//! case-insensitive global search over date, region and product.
//!
//! # Environment
//!
//! | Variable | Meaning |
//! |---|---|
//! | `SALESVIEW_PAGE_SIZE` | rows per page, must be one of the offered sizes |
//! | `SALESVIEW_CASE_SENSITIVE` | `true`/`false` (also `1`/`0`, `yes`/`no`) |
//! | `SALESVIEW_GLOBAL_FIELDS` | comma separated field names |

use crate::record::Field;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_ROWS_PER_PAGE: [usize; 4] = [5, 10, 25, 50];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub page_size: usize,
    pub rows_per_page_options: Vec<usize>,
    /// Fields searched by the global filter
    pub global_filter_fields: Vec<Field>,
    pub case_sensitive_search: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            page_size: DEFAULT_PAGE_SIZE,
            rows_per_page_options: DEFAULT_ROWS_PER_PAGE.to_vec(),
            global_filter_fields: vec![Field::Date, Field::Region, Field::Product],
            case_sensitive_search: false,
        }
    }
}

impl DashboardConfig {
    /// Load from `SALESVIEW_*` environment variables, defaulting what is unset.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = DashboardConfig::default();

        if let Some(raw) = lookup("SALESVIEW_PAGE_SIZE") {
            config.page_size = raw
                .trim()
                .parse()
                .map_err(|_| format!("SALESVIEW_PAGE_SIZE must be a number, got '{}'", raw))?;
        }

        if let Some(raw) = lookup("SALESVIEW_CASE_SENSITIVE") {
            config.case_sensitive_search = parse_bool(&raw)
                .ok_or_else(|| format!("SALESVIEW_CASE_SENSITIVE must be true or false, got '{}'", raw))?;
        }

        if let Some(raw) = lookup("SALESVIEW_GLOBAL_FIELDS") {
            config.global_filter_fields = raw
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<Field>())
                .collect::<Result<Vec<_>, _>>()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: DashboardConfig =
            serde_json::from_str(json).map_err(|e| format!("Invalid config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.rows_per_page_options.iter().any(|&n| n == 0) {
            return Err("Rows per page options must be greater than zero".to_string());
        }
        if !self.rows_per_page_options.contains(&self.page_size) {
            return Err(format!(
                "Page size {} is not one of {:?}",
                self.page_size, self.rows_per_page_options
            ));
        }
        if self.global_filter_fields.is_empty() {
            return Err("At least one global filter field is required".to_string());
        }
        Ok(())
    }

    pub fn allows_page_size(&self, size: usize) -> bool {
        self.rows_per_page_options.contains(&size)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
