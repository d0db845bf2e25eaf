pub mod admin_matching;
pub mod admin_units;
pub mod countries;
pub mod csv_utils;
pub mod error;
pub mod hxl;
pub mod paths;

pub use admin_matching::{AdminCase, AdminMatchingConfig, load_default_admin_matching};
pub use admin_units::{AdminUnit, load_admin_units};
pub use countries::{CountryInfo, CountryTable, load_default_countries};
pub use error::StandardsError;
pub use hxl::{hapi_columns, long_hxltag, wide_tag_table};
pub use paths::{REFERENCE_ENV_VAR, default_reference_root};
