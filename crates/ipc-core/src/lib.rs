pub mod aggregator;
pub mod bundle;
pub mod dates;
pub mod rows;
pub mod source;
pub mod state;
pub mod walk;

pub use aggregator::CountryAggregator;
pub use bundle::{CountryOutput, OutputBundle, TableSet};
pub use dates::{DateWindow, end_of_month, parse_date_range, parse_month_year};
pub use rows::{BaseRow, RowSet, add_location_rows};
pub use source::AnalysisSource;
pub use state::{PipelineState, builtin_default_cutoff};
pub use walk::{add_country_rows, add_subnational_rows};
