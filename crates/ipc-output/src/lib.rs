pub mod artifacts;
pub mod writer;

pub use artifacts::{HAPI_FILENAME, write_bundle, write_country, write_hapi};
pub use writer::{wide_headers, write_tabular};
