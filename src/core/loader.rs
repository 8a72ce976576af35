use crate::core::{Catalog, CategoryEntry, Listing, RegionEntry, Storage};
use crate::utils::error::{DirectoryError, LoadFailure};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// A record dropped at load time. `missing` names required fields that were absent or
/// not strings; `reason` carries the decode error when the fields were present but the
/// record still failed to deserialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub region: String,
    pub category: String,
    pub index: usize,
    pub missing: Vec<String>,
    pub reason: Option<String>,
}

/// Result of one load attempt. On failure the catalog is empty.
#[derive(Debug, Clone)]
pub struct LoadOutcome<T> {
    pub catalog: Arc<Catalog<T>>,
    pub failure: Option<LoadFailure>,
    pub skipped: Vec<SkippedRecord>,
}

impl<T> LoadOutcome<T> {
    pub fn loaded(catalog: Catalog<T>, skipped: Vec<SkippedRecord>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            failure: None,
            skipped,
        }
    }

    pub fn failed(failure: LoadFailure) -> Self {
        Self {
            catalog: Arc::new(Catalog::empty()),
            failure: Some(failure),
            skipped: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }
}

/// Reads a catalog document once and keeps the outcome, success or failure,
/// until `invalidate` is called.
pub struct CatalogLoader<S: Storage, T: Listing> {
    storage: S,
    path: String,
    cache: OnceCell<LoadOutcome<T>>,
}

impl<S: Storage, T: Listing> CatalogLoader<S, T> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
            cache: OnceCell::new(),
        }
    }

    pub async fn load(&self) -> &LoadOutcome<T> {
        self.cache.get_or_init(|| self.read_catalog()).await
    }

    pub fn is_cached(&self) -> bool {
        self.cache.initialized()
    }

    /// Drops the cached outcome so the next `load` reads storage again.
    pub fn invalidate(&mut self) {
        self.cache.take();
    }

    /// Replaces the cached outcome with the given catalog without touching storage.
    pub fn seed(&mut self, catalog: Catalog<T>) {
        self.cache = OnceCell::new_with(Some(LoadOutcome::loaded(catalog, Vec::new())));
    }

    async fn read_catalog(&self) -> LoadOutcome<T> {
        tracing::debug!("Reading {} catalog from {}", T::LABEL, self.path);

        let bytes = match self.storage.read_file(&self.path).await {
            Ok(bytes) => bytes,
            Err(DirectoryError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Catalog file not found: {}", self.path);
                return LoadOutcome::failed(LoadFailure::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(e) => {
                tracing::warn!("Catalog file {} unreadable: {}", self.path, e);
                return LoadOutcome::failed(LoadFailure::Malformed {
                    path: self.path.clone(),
                    message: e.to_string(),
                });
            }
        };

        match parse_catalog::<T>(&bytes) {
            Ok((catalog, skipped)) => {
                for record in &skipped {
                    let why = match &record.reason {
                        Some(reason) => reason.clone(),
                        None => format!("missing {}", record.missing.join(", ")),
                    };
                    tracing::warn!(
                        "Skipping {} record #{} in {}/{}: {}",
                        T::LABEL,
                        record.index,
                        record.region,
                        record.category,
                        why
                    );
                }
                tracing::info!(
                    "Loaded {} {} records across {} regions",
                    catalog.item_count(),
                    T::LABEL,
                    catalog.regions().len()
                );
                LoadOutcome::loaded(catalog, skipped)
            }
            Err(message) => {
                tracing::warn!("Catalog file {} malformed: {}", self.path, message);
                LoadOutcome::failed(LoadFailure::Malformed {
                    path: self.path.clone(),
                    message,
                })
            }
        }
    }
}

/// Parses `{region: {category: [item, ...]}}` keeping document order.
pub fn parse_catalog<T: Listing>(
    bytes: &[u8],
) -> std::result::Result<(Catalog<T>, Vec<SkippedRecord>), String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let document: Value = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;

    let root = expect_object(&document, "document root")?;
    let mut regions = Vec::with_capacity(root.len());
    let mut skipped = Vec::new();

    for (region_name, region_value) in root {
        let categories_map = expect_object(region_value, &format!("region '{}'", region_name))?;
        let mut categories = Vec::with_capacity(categories_map.len());

        for (category_name, items_value) in categories_map {
            let raw_items = items_value.as_array().ok_or_else(|| {
                format!(
                    "category '{}/{}' must be an array, found {}",
                    region_name,
                    category_name,
                    value_kind(items_value)
                )
            })?;

            let mut items = Vec::with_capacity(raw_items.len());
            for (index, raw) in raw_items.iter().enumerate() {
                let missing = missing_fields::<T>(raw);
                if !missing.is_empty() {
                    skipped.push(SkippedRecord {
                        region: region_name.clone(),
                        category: category_name.clone(),
                        index,
                        missing,
                        reason: None,
                    });
                    continue;
                }
                match serde_json::from_value::<T>(raw.clone()) {
                    Ok(item) => items.push(item),
                    Err(e) => skipped.push(SkippedRecord {
                        region: region_name.clone(),
                        category: category_name.clone(),
                        index,
                        missing: Vec::new(),
                        reason: Some(e.to_string()),
                    }),
                }
            }

            categories.push(CategoryEntry {
                name: category_name.clone(),
                items,
            });
        }

        regions.push(RegionEntry {
            name: region_name.clone(),
            categories,
        });
    }

    Ok((Catalog::new(regions), skipped))
}

fn expect_object<'a>(value: &'a Value, what: &str) -> std::result::Result<&'a Map<String, Value>, String> {
    value
        .as_object()
        .ok_or_else(|| format!("{} must be an object, found {}", what, value_kind(value)))
}

fn missing_fields<T: Listing>(raw: &Value) -> Vec<String> {
    match raw.as_object() {
        Some(fields) => T::REQUIRED_FIELDS
            .iter()
            .filter(|key| !matches!(fields.get(**key), Some(Value::String(_))))
            .map(|key| key.to_string())
            .collect(),
        None => T::REQUIRED_FIELDS.iter().map(|key| key.to_string()).collect(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Merchant, Restaurant};

    #[test]
    fn test_parse_preserves_document_order() {
        let json = r#"{
            "처인구": {"한식": [{"식당명":"다","가격대":"1","주소":"c"}]},
            "기흥구": {
                "중식": [{"식당명":"나","가격대":"1","주소":"b"}],
                "한식": [{"식당명":"가","가격대":"1","주소":"a"}]
            }
        }"#;
        let (catalog, skipped) = parse_catalog::<Restaurant>(json.as_bytes()).unwrap();
        assert!(skipped.is_empty());

        let names: Vec<&str> = catalog.regions().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["처인구", "기흥구"]);

        let categories: Vec<&str> = catalog.regions()[1]
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(categories, vec!["중식", "한식"]);
    }

    #[test]
    fn test_parse_skips_records_missing_required_fields() {
        let json = r#"{"기흥구": {"한식": [
            {"식당명":"가","가격대":"1000원","주소":"서울"},
            {"식당명":"나","주소":"부산"},
            {"식당명":"다","가격대":3000,"주소":"대구"},
            "not an object"
        ]}}"#;
        let (catalog, skipped) = parse_catalog::<Restaurant>(json.as_bytes()).unwrap();

        assert_eq!(catalog.item_count(), 1);
        assert_eq!(skipped.len(), 3);
        assert_eq!(skipped[0].index, 1);
        assert_eq!(skipped[0].missing, vec!["가격대".to_string()]);
        assert_eq!(skipped[1].missing, vec!["가격대".to_string()]);
        assert_eq!(skipped[2].missing.len(), 3);
        assert!(skipped.iter().all(|record| record.reason.is_none()));
    }

    #[test]
    fn test_parse_keeps_record_with_non_string_hours() {
        let json = r#"{"기흥구": {"한식": [
            {"식당명":"가","가격대":"1000원","주소":"서울","영업시간":24},
            {"식당명":"나","가격대":"2000원","주소":"부산","영업시간":"10:00-22:00"}
        ]}}"#;
        let (catalog, skipped) = parse_catalog::<Restaurant>(json.as_bytes()).unwrap();

        assert!(skipped.is_empty());
        let items = &catalog.regions()[0].categories[0].items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "가");
        assert_eq!(items[0].hours, None);
        assert_eq!(items[1].hours.as_deref(), Some("10:00-22:00"));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(parse_catalog::<Restaurant>(b"[]").is_err());
        assert!(parse_catalog::<Restaurant>(br#"{"a": []}"#).is_err());
        assert!(parse_catalog::<Restaurant>(br#"{"a": {"b": {}}}"#).is_err());
        assert!(parse_catalog::<Restaurant>(b"{not json").is_err());
    }

    #[test]
    fn test_parse_accepts_bom_and_merchants() {
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend_from_slice(
            r#"{"수지구": {"음식점": [{"가맹점명":"가게","주소":"수지구 1","전화번호":"031-000-0000"}]}}"#
                .as_bytes(),
        );
        let (catalog, _) = parse_catalog::<Merchant>(&bytes).unwrap();
        let merchant = &catalog.regions()[0].categories[0].items[0];
        assert_eq!(merchant.phone.as_deref(), Some("031-000-0000"));
    }
}
