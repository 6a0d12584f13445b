pub mod convert;
pub mod csv;
pub mod record;

pub use convert::{parse_date, parse_flag, parse_int};
pub use record::{convert_row, FieldValue, StagedRow, TypedRow};
pub use self::csv::read_staging_file;
