use crate::core::{Listing, ProjectedItem, Storage};
use crate::utils::error::{DirectoryError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    Csv,
    Json,
}

pub fn to_csv<T: Listing>(items: &[ProjectedItem<T>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["지역", "분류"];
    header.extend_from_slice(T::COLUMNS);
    writer.write_record(&header)?;

    for projected in items {
        let mut record = vec![projected.region.clone(), projected.category.clone()];
        record.extend(projected.item.row());
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DirectoryError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| DirectoryError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

pub fn to_json<T: Listing>(items: &[ProjectedItem<T>]) -> Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

/// Serializes the list and writes it through `storage`. Returns the number of rows written.
pub async fn write_export<S: Storage, T: Listing>(
    storage: &S,
    path: &str,
    items: &[ProjectedItem<T>],
    format: ExportFormat,
) -> Result<usize> {
    let body = match format {
        ExportFormat::Csv => to_csv(items)?,
        ExportFormat::Json => to_json(items)?,
    };

    tracing::debug!("Writing {} rows ({} bytes) to {}", items.len(), body.len(), path);
    storage.write_file(path, body.as_bytes()).await?;
    Ok(items.len())
}
