//! Build-time configuration.
//!
//! The frontend is compiled to wasm, so there is no process environment at
//! runtime. Values are baked in from `SHEET_API_URL` and
//! `SHEET_CHARACTER_ID` when the crate is built.

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_CHARACTER_ID: &str = "character::default";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub character_id: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(option_env!("SHEET_API_URL"), option_env!("SHEET_CHARACTER_ID"))
    }

    fn from_values(api_url: Option<&str>, character_id: Option<&str>) -> Self {
        let non_blank = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            api_base_url: non_blank(api_url).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            character_id: non_blank(character_id)
                .unwrap_or_else(|| DEFAULT_CHARACTER_ID.to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.character_id, DEFAULT_CHARACTER_ID);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = AppConfig::from_values(Some("  "), Some("character::42"));
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.character_id, "character::42");
    }
}
