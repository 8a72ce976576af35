use crate::domain::model::DirectoryKind;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn data_file(&self, kind: DirectoryKind) -> &str;
    fn naver_base(&self) -> &str;
    fn kakao_base(&self) -> &str;
    fn google_base(&self) -> &str;
}

/// A record kind that can live in a catalog.
pub trait Listing: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    const LABEL: &'static str;
    /// JSON keys that must be present as strings for a record to be accepted.
    const REQUIRED_FIELDS: &'static [&'static str];
    /// Export column headers, matching `row()`.
    const COLUMNS: &'static [&'static str];

    fn name(&self) -> &str;
    fn address(&self) -> Option<&str>;
    fn row(&self) -> Vec<String>;

    /// Labelled fields for the detail panel, name excluded.
    fn detail_fields(&self) -> Vec<(&'static str, String)> {
        Self::COLUMNS
            .iter()
            .copied()
            .zip(self.row())
            .skip(1)
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }
}
