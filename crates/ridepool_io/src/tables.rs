//! Tabular CSV loaders: the square travel-time/distance matrices, the
//! replay requests table, and the vehicle roster.

use std::path::Path;

use ridepool_core::graph::StationGraph;
use ridepool_core::request::RequestId;
use ridepool_core::vehicle::{Vehicle, VehicleId};
use serde::Deserialize;

use crate::error::IoError;
use crate::stations::StationIndex;

/// Load a square matrix CSV (first row = header station ids, first column =
/// row station id) and fold its cells into `into`, interning station names
/// through `index` as they are encountered. `apply` decides whether a cell
/// becomes a travel-time or a distance edge.
fn load_matrix(
    path: &Path,
    index: &mut StationIndex,
    mut apply: impl FnMut(ridepool_core::graph::StationId, ridepool_core::graph::StationId, f64),
) -> Result<(), IoError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let header = reader.headers()?.clone();
    let column_stations: Vec<_> = header.iter().skip(1).map(|name| index.intern(name)).collect();

    for record in reader.records() {
        let record = record?;
        let mut fields = record.iter();
        let row_name = fields.next().ok_or_else(|| {
            IoError::NonSquareMatrix {
                path: path.display().to_string(),
            }
        })?;
        let row_station = index.intern(row_name);
        for (column_station, value) in column_stations.iter().zip(fields) {
            let value: f64 = value.parse().map_err(|_| IoError::NonSquareMatrix {
                path: path.display().to_string(),
            })?;
            apply(row_station, *column_station, value);
        }
    }
    Ok(())
}

/// Load both the distance and travel-time matrices into one [`StationGraph`].
pub fn load_station_graph(
    distance_path: &Path,
    waytime_path: &Path,
    index: &mut StationIndex,
) -> Result<StationGraph, IoError> {
    let mut builder = StationGraph::builder();
    load_matrix(waytime_path, index, |a, b, minutes| {
        builder = std::mem::take(&mut builder).with_travel_time(a, b, minutes.round() as i64);
    })?;
    load_matrix(distance_path, index, |a, b, value| {
        builder = std::mem::take(&mut builder).with_distance(a, b, value);
    })?;
    Ok(builder.build())
}

/// One row of the replay requests table. The `passangers` spelling is the
/// source's literal column name, preserved for replay compatibility.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestRow {
    pub id: u64,
    pub time: i64,
    pub start_time: i64,
    pub start_id: String,
    pub destination_id: String,
    pub passangers: u32,
}

/// Load the replay requests table, sorted by `time` (creation time)
/// ascending, as the dispatcher's input order requires.
pub fn load_request_rows(path: &Path) -> Result<Vec<RequestRow>, IoError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut rows: Vec<RequestRow> = reader.deserialize().collect::<Result<_, _>>()?;
    rows.sort_by_key(|row| row.time);
    Ok(rows)
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleRow {
    pub id: u64,
    pub name: String,
    pub seats: u32,
    #[serde(rename = "type")]
    pub vehicle_type: String,
}

pub fn load_vehicles(path: &Path) -> Result<Vec<Vehicle>, IoError> {
    let text = std::fs::read_to_string(path)?;
    let rows: Vec<VehicleRow> = serde_json::from_str(&text)?;
    Ok(rows
        .into_iter()
        .map(|row| Vehicle::new(VehicleId(row.id), row.name, row.seats, row.vehicle_type))
        .collect())
}

/// A `RequestId` paired with the raw row it came from, for error messages.
pub fn request_id_of(row: &RequestRow) -> RequestId {
    RequestId(row.id)
}
