use std::fs::File;
use std::io;
use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use crate::error::Result;
use crate::model::TableRecord;

/// Write `records` as CSV with a header row, even when there are no records.
pub fn write_records<W: io::Write, R: TableRecord>(writer: W, records: &[R]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(R::COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write `records` to it.
pub fn write_csv<R: TableRecord>(path: &Path, records: &[R]) -> Result<()> {
    let file = File::create(path)?;
    write_records(file, records)?;
    info!(path = %path.display(), rows = records.len(), "csv written");
    Ok(())
}
