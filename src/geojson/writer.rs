use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::models::FeatureCollection;
use crate::overpass::OverpassError;

/// Output directory relative to the working directory
pub const DEFAULT_DIR: &str = "data/climbing_facilities";
pub const FILE_PREFIX: &str = "climbing_facilities";
pub const EXTENSION: &str = "geojson";

/// `climbing_facilities_<YYYY-MM-DD>`
pub fn default_file_name(date: NaiveDate) -> String {
    format!("{}_{}", FILE_PREFIX, date.format("%Y-%m-%d"))
}

/// Resolve the target file path.
///
/// Missing `dir`/`name` fall back to [`DEFAULT_DIR`] and today's
/// [`default_file_name`]. Any extension on `name` is replaced by `.geojson`.
pub fn output_path(dir: Option<&Path>, name: Option<&str>) -> PathBuf {
    let dir = dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR));
    let name = match name {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => default_file_name(Local::now().date_naive()),
    };
    dir.join(name).with_extension(EXTENSION)
}

/// Serialize `collection` to `path`, creating parent directories.
pub fn write_to(collection: &FeatureCollection, path: &Path) -> Result<(), OverpassError> {
    let io_error = |source: std::io::Error| OverpassError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let json = serde_json::to_string(collection).map_err(OverpassError::Encode)?;
    fs::write(path, json).map_err(io_error)?;

    info!(
        "Wrote {} features to {}",
        collection.features.len(),
        path.display()
    );
    Ok(())
}

/// Write to [`output_path`] and return where the file went.
pub fn write_geojson(
    collection: &FeatureCollection,
    dir: Option<&Path>,
    name: Option<&str>,
) -> Result<PathBuf, OverpassError> {
    let path = output_path(dir, name);
    write_to(collection, &path)?;
    Ok(path)
}
