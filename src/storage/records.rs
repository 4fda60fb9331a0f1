// src/storage/records.rs

//! Delimited output for catalog records.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::{CATALOG_HEADER, CatalogRecord, OpenMode};

/// Destination for catalog records, written one at a time.
pub trait RecordSink {
    fn write_record(&mut self, record: &CatalogRecord) -> Result<()>;
}

impl RecordSink for Vec<CatalogRecord> {
    fn write_record(&mut self, record: &CatalogRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// CSV writer that flushes after every row.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    /// Open `path`, writing the header only when the file starts out empty.
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = match mode {
            OpenMode::Append => OpenOptions::new().create(true).append(true).open(path)?,
            OpenMode::Truncate => File::create(path)?,
        };
        let is_empty = file.metadata()?.len() == 0;

        log::debug!("Writing catalog records to {}", path.display());
        Self::from_writer(file, is_empty)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W, write_header: bool) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);

        if write_header {
            writer.write_record(CATALOG_HEADER)?;
            writer.flush()?;
        }
        Ok(Self { writer })
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()).into())
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &CatalogRecord) -> Result<()> {
        self.writer.write_record(record.to_row())?;
        self.writer.flush()?;
        Ok(())
    }
}
