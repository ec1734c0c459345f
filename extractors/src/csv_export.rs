use csv::WriterBuilder;
use shared_types::{Lead, LEAD_COLUMN_TITLES};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const DEFAULT_EXPORT_FILE_NAME: &str = "generated_leads.csv";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes leads as CSV, one row per lead, columns in record order.
#[derive(Debug, Default)]
pub struct LeadCsvExporter;

impl LeadCsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// Returns the number of data rows written.
    pub fn write<'a, W, I>(&self, leads: I, writer: W) -> Result<usize, ExportError>
    where
        W: Write,
        I: IntoIterator<Item = &'a Lead>,
    {
        let mut writer = WriterBuilder::new().from_writer(writer);
        writer.write_record(LEAD_COLUMN_TITLES)?;

        let mut rows = 0;
        for lead in leads {
            writer.write_record(lead.values())?;
            rows += 1;
        }

        writer.flush()?;
        Ok(rows)
    }

    pub fn export_to_path<'a, I>(&self, leads: I, path: &Path) -> Result<usize, ExportError>
    where
        I: IntoIterator<Item = &'a Lead>,
    {
        let file = File::create(path)?;
        let rows = self.write(leads, BufWriter::new(file))?;
        tracing::info!(rows, path = %path.display(), "Exported leads to CSV");
        Ok(rows)
    }
}
