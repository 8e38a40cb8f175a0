//! CSV loading for the driver-grid and circuit tables

use polars::prelude::*;
use std::path::Path;

/// One joined training row: a driver's grid slot plus the circuit and
/// season attributes of the race it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceEntry {
    pub race_id: u32,
    pub driver_id: u32,
    pub grid_position: u32,
    pub circuit_name: String,
    pub circuit_country: String,
    pub year: i32,
    pub race_round: u32,
}

/// Load both source tables, project each to its fixed column subset, and
/// inner-join them on `raceId`. Grid rows without a matching circuit record
/// are dropped; extra columns in either file are ignored.
pub fn load_race_entries<P: AsRef<Path>>(
    grid_path: P,
    circuits_path: P,
) -> Result<Vec<RaceEntry>, PolarsError> {
    let grid = read_csv(grid_path.as_ref())?;
    let circuits = read_csv(circuits_path.as_ref())?;

    let joined = grid
        .lazy()
        .select([col("raceId"), col("driverId"), col("position")])
        .join(
            circuits.lazy().select([
                col("raceId"),
                col("circuit_name"),
                col("circuit_country"),
                col("year"),
                col("race_round"),
            ]),
            [col("raceId")],
            [col("raceId")],
            JoinArgs::new(JoinType::Inner),
        )
        .collect()?;

    dataframe_to_entries(&joined)
}

fn read_csv(path: &Path) -> Result<DataFrame, PolarsError> {
    CsvReadOptions::default()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}

/// Convert the joined DataFrame into typed entries.
fn dataframe_to_entries(df: &DataFrame) -> Result<Vec<RaceEntry>, PolarsError> {
    // Use i64 for all integer columns (polars default inference)
    let race_col = df.column("raceId")?.i64()?;
    let driver_col = df.column("driverId")?.i64()?;
    let position_col = df.column("position")?.i64()?;
    let name_col = df.column("circuit_name")?.str()?;
    let country_col = df.column("circuit_country")?.str()?;
    let year_col = df.column("year")?.i64()?;
    let round_col = df.column("race_round")?.i64()?;

    let mut entries = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        entries.push(RaceEntry {
            race_id: race_col.get(i).unwrap_or(0) as u32,
            driver_id: driver_col.get(i).unwrap_or(0) as u32,
            grid_position: position_col.get(i).unwrap_or(0) as u32,
            circuit_name: name_col.get(i).unwrap_or("").to_string(),
            circuit_country: country_col.get(i).unwrap_or("").to_string(),
            year: year_col.get(i).unwrap_or(0) as i32,
            race_round: round_col.get(i).unwrap_or(0) as u32,
        });
    }

    Ok(entries)
}
