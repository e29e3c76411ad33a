//! GeoJSON conversion, persistence and summaries.

mod normalize;
mod summary;
mod writer;

pub use normalize::{normalize, utc_timestamp};
pub use summary::{summarize, Summary};
pub use writer::{default_file_name, output_path, write_geojson, write_to, DEFAULT_DIR};
