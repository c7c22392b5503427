use crate::models::BookingRecord;
use airline_forecast_core::{Dataset, ForecastError, ForecastTable};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim, Writer};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub struct CsvStorage;

impl CsvStorage {
    /// Reads a booking-curve table from a CSV file with a header row.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened, a required column is
    /// missing (`ForecastError::Schema`), or a row has the wrong shape.
    pub fn read_bookings(
        path: &str,
        dataset: Dataset,
        required: &[&str],
    ) -> Result<Vec<BookingRecord>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {} CSV file: {}", dataset, path))?;
        let records = Self::read_bookings_from(file, dataset, required)
            .with_context(|| format!("Failed to read {} CSV file: {}", dataset, path))?;

        tracing::info!(%dataset, path, rows = records.len(), "Loaded booking records");
        Ok(records)
    }

    /// Reads a booking-curve table from any reader.
    ///
    /// Unknown columns are ignored; cells are trimmed. A row with the wrong
    /// number of cells, or whose cells do not fit a `BookingRecord`, is kept
    /// as an unreadable record so the malformed-row policy decides its fate.
    ///
    /// # Errors
    /// Returns error if a required column is missing or the file is not
    /// valid CSV.
    pub fn read_bookings_from<R: Read>(
        reader: R,
        dataset: Dataset,
        required: &[&str],
    ) -> Result<Vec<BookingRecord>> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = reader.headers()?.clone();

        if let Some(missing) = required
            .iter()
            .find(|column| !headers.iter().any(|h| h == **column))
        {
            return Err(ForecastError::Schema {
                dataset,
                column: (*missing).to_string(),
            }
            .into());
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;
            let line = row.position().map_or(0, csv::Position::line);

            if row.len() != headers.len() {
                records.push(BookingRecord::unreadable(
                    line,
                    format!("expected {} fields, found {}", headers.len(), row.len()),
                ));
                continue;
            }

            match row.deserialize::<BookingRecord>(Some(&headers)) {
                Ok(record) => records.push(record.at_line(line)),
                Err(err) => records.push(BookingRecord::unreadable(line, err.to_string())),
            }
        }

        Ok(records)
    }

    /// Writes a forecast table as `departure_date,booking_date,forecast_demand`.
    ///
    /// Missing forecasts are written as empty cells.
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_forecasts(path: &Path, table: &ForecastTable) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        let mut writer = Writer::from_writer(file);

        writer.write_record(["departure_date", "booking_date", "forecast_demand"])?;

        for row in &table.rows {
            writer.write_record(&[
                row.departure_date.format("%Y-%m-%d").to_string(),
                row.booking_date.format("%Y-%m-%d").to_string(),
                row.forecast_demand.map(|v| v.to_string()).unwrap_or_default(),
            ])?;
        }

        writer.flush()?;
        tracing::debug!(model = %table.model, path = %path.display(), "Wrote forecast table");
        Ok(())
    }
}
