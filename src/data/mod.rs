mod parse;
mod record;

pub use parse::parse_records;
pub use record::PackageRecord;
