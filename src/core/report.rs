//! Journal export to a spreadsheet.
//!
//! The export lists every journal entry in departure order, one row per trip,
//! under a fixed header. Trips still on the road show "in transit" instead of
//! an arrival time.

use crate::{
    db::{self, JournalRow},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

/// Column titles of the exported sheet
pub const JOURNAL_HEADERS: [&str; 5] = ["Route", "Vehicle", "Driver", "Departure", "Arrival"];

/// Arrival cell of an open trip
pub const IN_TRANSIT: &str = "in transit";

const EXPORT_TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Content type of the produced workbook
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Turns journal rows into a spreadsheet document.
pub trait SpreadsheetWriter: Send + Sync {
    /// Writes the header and one line per row, in the given order.
    ///
    /// # Errors
    /// Returns `Export` if the document cannot be produced.
    fn write_journal(&self, rows: &[JournalRow]) -> Result<Vec<u8>>;
}

/// Writes the journal as an `.xlsx` workbook with a single sheet.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxJournalWriter;

fn export_error(e: XlsxError) -> Error {
    Error::Export {
        message: e.to_string(),
    }
}

impl SpreadsheetWriter for XlsxJournalWriter {
    fn write_journal(&self, rows: &[JournalRow]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        let sheet = workbook.add_worksheet();
        sheet.set_name("Journal").map_err(export_error)?;

        for (col, title) in (0u16..).zip(JOURNAL_HEADERS) {
            sheet
                .write_string_with_format(0, col, title, &header)
                .map_err(export_error)?;
            sheet.set_column_width(col, 22).map_err(export_error)?;
        }

        for (row, entry) in (1u32..).zip(rows) {
            for (col, cell) in (0u16..).zip(journal_cells(entry)) {
                sheet.write_string(row, col, cell).map_err(export_error)?;
            }
        }

        workbook.save_to_buffer().map_err(export_error)
    }
}

fn format_export_timestamp(value: &NaiveDateTime) -> String {
    value.format(EXPORT_TIMESTAMP_FORMAT).to_string()
}

/// Cell values of one exported line, in [`JOURNAL_HEADERS`] order.
#[must_use]
pub fn journal_cells(row: &JournalRow) -> [String; 5] {
    [
        row.route_name(),
        row.vehicle(),
        row.driver_name(),
        format_export_timestamp(&row.time_out),
        row.time_in
            .as_ref()
            .map_or_else(|| IN_TRANSIT.to_string(), format_export_timestamp),
    ]
}

/// Loads the whole journal and renders it with `writer`.
///
/// # Errors
/// Returns `Persistence` if the journal cannot be read and `Export` if the
/// writer fails.
#[instrument(skip(db, writer))]
pub async fn export_journal(
    db: &DatabaseConnection,
    writer: &dyn SpreadsheetWriter,
) -> Result<Vec<u8>> {
    let rows = db::list_journal_rows(db).await?;
    let bytes = writer.write_journal(&rows)?;
    info!("Exported {} journal rows ({} bytes)", rows.len(), bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::journal::{add_journal_entry, complete_journal_entry};
    use crate::test_utils::*;
    use std::sync::Mutex;

    /// Records the rows it was given instead of producing a workbook.
    #[derive(Default)]
    struct CapturingWriter {
        seen: Mutex<Vec<[String; 5]>>,
    }

    impl SpreadsheetWriter for CapturingWriter {
        fn write_journal(&self, rows: &[JournalRow]) -> Result<Vec<u8>> {
            let mut seen = self.seen.lock().unwrap();
            seen.extend(rows.iter().map(journal_cells));
            Ok(b"captured".to_vec())
        }
    }

    #[tokio::test]
    async fn test_journal_cells() -> Result<()> {
        let db = setup_test_db().await?;
        let driver = create_custom_driver(&db, "Ivan", "Petrov", "Sergeevich").await?;
        let car = create_test_car(&db, "A123BC", Some(driver.id)).await?;
        let route = create_test_route(&db, "Depot", "Airport").await?;
        let entry = add_journal_entry(&db, car.id, route.id, "2024-03-01T08:30").await?;

        let rows = db::list_journal_rows(&db).await?;
        assert_eq!(
            journal_cells(&rows[0]),
            [
                "Depot - Airport".to_string(),
                "A123BC (Lada)".to_string(),
                "Petrov Ivan Sergeevich".to_string(),
                "01.03.2024 08:30".to_string(),
                IN_TRANSIT.to_string(),
            ]
        );

        complete_journal_entry(&db, entry.id, "2024-03-01T17:05").await?;
        let rows = db::list_journal_rows(&db).await?;
        assert_eq!(journal_cells(&rows[0])[4], "01.03.2024 17:05");
        Ok(())
    }

    #[tokio::test]
    async fn test_export_journal_passes_rows_in_departure_order() -> Result<()> {
        let db = setup_test_db().await?;
        let (car, route) = setup_car_and_route(&db).await?;
        add_journal_entry(&db, car.id, route.id, "2024-03-02T10:00").await?;
        add_journal_entry(&db, car.id, route.id, "2024-03-01T10:00").await?;

        let writer = CapturingWriter::default();
        let bytes = export_journal(&db, &writer).await?;
        assert_eq!(bytes, b"captured");

        let seen = writer.seen.lock().unwrap();
        let departures: Vec<&str> = seen.iter().map(|cells| cells[3].as_str()).collect();
        assert_eq!(departures, vec!["01.03.2024 10:00", "02.03.2024 10:00"]);
        // Car without a driver exports an empty name
        assert_eq!(seen[0][2], "");
        Ok(())
    }

    #[tokio::test]
    async fn test_xlsx_writer_produces_zip_container() -> Result<()> {
        let db = setup_test_db().await?;
        let (car, route) = setup_car_and_route(&db).await?;
        add_journal_entry(&db, car.id, route.id, "2024-03-01T10:00").await?;

        let bytes = export_journal(&db, &XlsxJournalWriter).await?;
        assert!(bytes.starts_with(b"PK"));

        // An empty journal still yields a workbook with the header row
        let empty = XlsxJournalWriter.write_journal(&[])?;
        assert!(empty.starts_with(b"PK"));
        Ok(())
    }
}
