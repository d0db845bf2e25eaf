pub mod error;
pub mod phase;
pub mod projection;
pub mod record;
pub mod row;

pub use error::{IpcError, Result};
pub use phase::{PHASES, Phase};
pub use projection::{PROJECTIONS, Projection};
pub use record::Record;
pub use row::{CellValue, LongRow, TableLevel, WideRow, format_numeric, long_headers};
