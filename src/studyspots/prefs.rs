//! # View Preferences
//!
//! Rendering density (grid columns, items per page) persisted as one JSON
//! record under [`PREFS_KEY`].
//!
//! ## Normalization
//!
//! Every read normalizes each field independently:
//!
//! | Field | Valid range | Default |
//! |-------|-------------|---------|
//! | `columns` | 1–3 | 3 |
//! | `itemsPerPage` | 12–60 | 30 |
//!
//! Values are read with integer-prefix parsing (`7`, `7.9` and `"7px"` all
//! read as 7). A missing, unparseable or zero value takes the default, and the
//! result is then clamped into range. A record that is missing, corrupt, or
//! unreadable yields the full default.
//!
//! Writes are best-effort. A failed write is logged and otherwise invisible
//! to the caller.

use crate::store::StorageBackend;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PREFS_KEY: &str = "studyspots_view_prefs";

pub const MIN_COLUMNS: u8 = 1;
pub const MAX_COLUMNS: u8 = 3;
pub const DEFAULT_COLUMNS: u8 = 3;

pub const MIN_ITEMS_PER_PAGE: usize = 12;
pub const MAX_ITEMS_PER_PAGE: usize = 60;
pub const DEFAULT_ITEMS_PER_PAGE: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPreferences {
    pub columns: u8,
    pub items_per_page: usize,
}

impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl ViewPreferences {
    /// Builds preferences from arbitrary integers, clamping each into range.
    pub fn clamped(columns: i64, items_per_page: i64) -> Self {
        Self {
            columns: columns.clamp(MIN_COLUMNS as i64, MAX_COLUMNS as i64) as u8,
            items_per_page: items_per_page
                .clamp(MIN_ITEMS_PER_PAGE as i64, MAX_ITEMS_PER_PAGE as i64)
                as usize,
        }
    }

    pub fn normalized(self) -> Self {
        Self::clamped(self.columns as i64, self.items_per_page as i64)
    }

    /// Normalizes a stored JSON record.
    pub fn from_stored(raw: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(raw) else {
            return Self::default();
        };
        let columns = field_or(&value, "columns", DEFAULT_COLUMNS as i64);
        let items_per_page = field_or(&value, "itemsPerPage", DEFAULT_ITEMS_PER_PAGE as i64);
        Self::clamped(columns, items_per_page)
    }
}

fn field_or(record: &Value, field: &str, default: i64) -> i64 {
    record
        .get(field)
        .and_then(parse_int)
        .filter(|n| *n != 0)
        .unwrap_or(default)
}

/// Integer-prefix parsing of a stored value.
///
/// Numbers are truncated toward zero; strings parse their leading
/// `[+-]digits` after optional whitespace; out-of-range values saturate.
/// Everything else has no value.
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim_start();
            let (sign, rest) = match s.as_bytes().first() {
                Some(b'-') => (-1, &s[1..]),
                Some(b'+') => (1, &s[1..]),
                _ => (1, s),
            };
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                return None;
            }
            // Only overflow can fail here: `digits` is non-empty ASCII digits.
            Some(match digits.parse::<i64>() {
                Ok(n) => sign * n,
                Err(_) if sign < 0 => i64::MIN,
                Err(_) => i64::MAX,
            })
        }
        _ => None,
    }
}

/// Reads and writes [`ViewPreferences`] through a storage backend.
pub struct PreferenceStore<S: StorageBackend> {
    backend: S,
}

impl<S: StorageBackend> PreferenceStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Current preferences, normalized. Never fails.
    pub fn get(&self) -> ViewPreferences {
        match self.backend.read(PREFS_KEY) {
            Ok(Some(raw)) => ViewPreferences::from_stored(&raw),
            Ok(None) => ViewPreferences::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read view preferences, using defaults");
                ViewPreferences::default()
            }
        }
    }

    /// Persists preferences. Failures are logged and swallowed.
    pub fn set(&self, prefs: ViewPreferences) {
        let prefs = prefs.normalized();
        let result = serde_json::to_string(&prefs)
            .map_err(Into::into)
            .and_then(|raw| self.backend.write(PREFS_KEY, &raw));
        if let Err(e) = result {
            tracing::warn!(error = %e, "could not save view preferences");
        }
    }
}

pub fn get_view_preferences<S: StorageBackend>(backend: S) -> ViewPreferences {
    PreferenceStore::new(backend).get()
}

pub fn set_view_preferences<S: StorageBackend>(backend: S, prefs: ViewPreferences) {
    PreferenceStore::new(backend).set(prefs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use serde_json::json;

    fn store_with(raw: &str) -> PreferenceStore<MemBackend> {
        let backend = MemBackend::new();
        backend.insert_raw(PREFS_KEY, raw);
        PreferenceStore::new(backend)
    }

    #[test]
    fn missing_record_yields_defaults() {
        let store = PreferenceStore::new(MemBackend::new());
        assert_eq!(
            store.get(),
            ViewPreferences {
                columns: 3,
                items_per_page: 30
            }
        );
    }

    #[test]
    fn corrupt_record_yields_defaults() {
        for raw in ["{not json", "", "null", "42", "[1,2]", "\"text\""] {
            assert_eq!(store_with(raw).get(), ViewPreferences::default(), "raw {raw:?}");
        }
    }

    #[test]
    fn unavailable_storage_yields_defaults() {
        let backend = MemBackend::new();
        backend.insert_raw(PREFS_KEY, r#"{"columns":1,"itemsPerPage":12}"#);
        backend.set_simulate_unavailable(true);
        assert_eq!(PreferenceStore::new(backend).get(), ViewPreferences::default());
    }

    #[test]
    fn out_of_range_columns_clamped_and_missing_page_size_defaulted() {
        let prefs = store_with(r#"{"columns": 7}"#).get();
        assert_eq!(prefs.columns, 3);
        assert_eq!(prefs.items_per_page, 30);
    }

    #[test]
    fn fields_are_clamped_independently() {
        let prefs = store_with(r#"{"columns": -4, "itemsPerPage": 500}"#).get();
        assert_eq!(prefs, ViewPreferences::clamped(1, 60));

        let prefs = store_with(r#"{"columns": 2, "itemsPerPage": 5}"#).get();
        assert_eq!(prefs.columns, 2);
        assert_eq!(prefs.items_per_page, 12);
    }

    #[test]
    fn zero_takes_the_default() {
        let prefs = store_with(r#"{"columns": 0, "itemsPerPage": 0}"#).get();
        assert_eq!(prefs, ViewPreferences::default());
    }

    #[test]
    fn string_values_use_integer_prefix() {
        let prefs = store_with(r#"{"columns": "2", "itemsPerPage": "24px"}"#).get();
        assert_eq!(prefs.columns, 2);
        assert_eq!(prefs.items_per_page, 24);

        let prefs = store_with(r#"{"columns": "two", "itemsPerPage": true}"#).get();
        assert_eq!(prefs, ViewPreferences::default());
    }

    #[test]
    fn parse_int_handles_numbers_and_strings() {
        assert_eq!(parse_int(&json!(12)), Some(12));
        assert_eq!(parse_int(&json!(12.9)), Some(12));
        assert_eq!(parse_int(&json!(" -3x")), Some(-3));
        assert_eq!(parse_int(&json!("+5")), Some(5));
        assert_eq!(parse_int(&json!("px5")), None);
        assert_eq!(parse_int(&json!(null)), None);
        assert_eq!(parse_int(&json!("99999999999999999999")), Some(i64::MAX));
        assert_eq!(parse_int(&json!("-99999999999999999999")), Some(i64::MIN));
        assert_eq!(parse_int(&json!(1e30)), Some(i64::MAX));
    }

    #[test]
    fn overflowing_stored_values_clamp_to_the_bounds() {
        let raw = r#"{"columns":"-99999999999999999999","itemsPerPage":"99999999999999999999"}"#;
        let prefs = ViewPreferences::from_stored(raw);
        assert_eq!(
            prefs,
            ViewPreferences {
                columns: 1,
                items_per_page: 60
            }
        );
    }

    #[test]
    fn set_then_get_roundtrips_valid_values() {
        let store = PreferenceStore::new(MemBackend::new());
        let prefs = ViewPreferences {
            columns: 1,
            items_per_page: 48,
        };
        store.set(prefs);
        assert_eq!(store.get(), prefs);
        assert_eq!(
            store.backend().raw(PREFS_KEY).as_deref(),
            Some(r#"{"columns":1,"itemsPerPage":48}"#)
        );
    }

    #[test]
    fn set_normalizes_before_writing() {
        let store = PreferenceStore::new(MemBackend::new());
        store.set(ViewPreferences {
            columns: 9,
            items_per_page: 1,
        });
        assert_eq!(store.get(), ViewPreferences::clamped(3, 12));
    }

    #[test]
    fn failed_write_is_swallowed() {
        let store = PreferenceStore::new(MemBackend::new());
        store.set(ViewPreferences::clamped(2, 24));

        store.backend().set_simulate_write_error(true);
        store.set(ViewPreferences::clamped(1, 60));

        assert_eq!(store.get(), ViewPreferences::clamped(2, 24));
    }

    #[test]
    fn free_functions_share_the_backend() {
        let backend = MemBackend::new();
        set_view_preferences(&backend, ViewPreferences::clamped(1, 36));
        assert_eq!(get_view_preferences(&backend), ViewPreferences::clamped(1, 36));
    }
}
