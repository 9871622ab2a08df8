//! Writers for `schedule.csv`, `requests.csv`, `requests_denied.csv`, and
//! `summary.json`.

use std::collections::BTreeMap;
use std::path::Path;

use ridepool_core::config::DispatchWeights;
use ridepool_core::graph::StationGraph;
use ridepool_core::itinerary::Stop;
use ridepool_core::request::RequestId;
use ridepool_core::vehicle::Vehicle;
use serde::Serialize;

use crate::error::IoError;
use crate::stations::StationIndex;
use crate::tables::RequestRow;

/// A run of consecutive stops at the same station, collapsed into one
/// "stay" before legs are computed between stays.
struct Stay {
    station: ridepool_core::graph::StationId,
    planned_time: i64,
    net_boarding: i32,
    occupation_after: i32,
    request_ids: Vec<RequestId>,
}

fn collapse_into_stays(stops: &[Stop]) -> Vec<Stay> {
    let mut stays: Vec<Stay> = Vec::new();
    for stop in stops {
        if let Some(last) = stays.last_mut() {
            if last.station == stop.station {
                last.net_boarding += stop.boarding;
                last.occupation_after = stop.occupation;
                last.request_ids.push(stop.request_id);
                continue;
            }
        }
        stays.push(Stay {
            station: stop.station,
            planned_time: stop.planned_time,
            net_boarding: stop.boarding,
            occupation_after: stop.occupation,
            request_ids: vec![stop.request_id],
        });
    }
    stays
}

#[derive(Debug, Serialize)]
struct ScheduleRow {
    vehicle_id: u64,
    boarding_start: i32,
    departure_name: String,
    departure_time: i64,
    arrival_time: i64,
    arrival_name: String,
    boarding_dest: i32,
    distance: f64,
    driving_time: i64,
    pause: i64,
    vehicle_type: String,
    request_ids: String,
    occupation: i32,
}

/// Write one row per vehicle leg across the whole fleet's final itineraries.
///
/// `departure_time` is `departure.planned_time + standing_time`, not the stay's
/// own `planned_time`: a stay's `planned_time` marks arrival, and the vehicle
/// only leaves after standing there for `standing_time` minutes (see the
/// itinerary's `planned_time` recurrence in `feasibility.rs`).
pub fn write_schedule_csv(
    path: &Path,
    vehicles: &[Vehicle],
    graph: &StationGraph,
    index: &StationIndex,
    weights: &DispatchWeights,
) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path)?;

    for vehicle in vehicles {
        let stays = collapse_into_stays(vehicle.itinerary.stops());
        let mut rows = Vec::with_capacity(stays.len().saturating_sub(1));
        for pair in stays.windows(2) {
            let (departure, arrival) = (&pair[0], &pair[1]);
            let distance = graph.distance(departure.station, arrival.station).unwrap_or(0.0);
            let driving_time = graph
                .travel_time(departure.station, arrival.station)
                .unwrap_or(0);
            let request_ids = departure
                .request_ids
                .iter()
                .chain(arrival.request_ids.iter())
                .map(|id| id.0.to_string())
                .collect::<Vec<_>>()
                .join(";");

            rows.push(ScheduleRow {
                vehicle_id: vehicle.id.0,
                boarding_start: departure.net_boarding,
                departure_name: index.name(departure.station).to_string(),
                departure_time: departure.planned_time + weights.standing_time,
                arrival_time: arrival.planned_time,
                arrival_name: index.name(arrival.station).to_string(),
                boarding_dest: arrival.net_boarding,
                distance,
                driving_time,
                pause: 0,
                vehicle_type: vehicle.vehicle_type.clone(),
                request_ids,
                occupation: departure.occupation_after,
            });
        }

        for i in 0..rows.len() {
            let next_departure = rows.get(i + 1).map(|r| r.departure_time);
            if let Some(next_departure) = next_departure {
                rows[i].pause = pause_minutes(rows[i].arrival_time, next_departure);
            }
        }

        for row in rows {
            writer.serialize(row)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// `pause` is recomputed in a second pass, once all legs for a vehicle are
/// known: idle minutes between one leg's arrival and the next leg's
/// departure, zero if the next departure is at or before the current
/// arrival.
pub fn pause_minutes(arrival_time: i64, next_departure_time: i64) -> i64 {
    (next_departure_time - arrival_time).max(0)
}

pub fn write_requests_csv(path: &Path, rows: &[RequestRow]) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Serialize, Default, Clone, Copy)]
pub struct DistanceSummary {
    pub distance_total: f64,
    pub distance_occupied: f64,
    pub passanger_distance: f64,
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub total: DistanceSummary,
    pub vehicles: BTreeMap<u64, DistanceSummary>,
}

/// Build the aggregate and per-vehicle distance/occupancy summary.
///
/// `distance_occupied` sums legs with `occupation > 0`; `passanger_distance`
/// sums `distance(leg) * occupation(leg)` over those same legs.
pub fn build_summary(vehicles: &[Vehicle], graph: &StationGraph) -> RunSummary {
    let mut total = DistanceSummary::default();
    let mut per_vehicle = BTreeMap::new();

    for vehicle in vehicles {
        let stays = collapse_into_stays(vehicle.itinerary.stops());
        let mut summary = DistanceSummary::default();
        for pair in stays.windows(2) {
            let distance = graph.distance(pair[0].station, pair[1].station).unwrap_or(0.0);
            summary.distance_total += distance;
            if pair[0].occupation_after > 0 {
                summary.distance_occupied += distance;
                summary.passanger_distance += distance * pair[0].occupation_after as f64;
            }
        }
        total.distance_total += summary.distance_total;
        total.distance_occupied += summary.distance_occupied;
        total.passanger_distance += summary.passanger_distance;
        per_vehicle.insert(vehicle.id.0, summary);
    }

    RunSummary {
        total,
        vehicles: per_vehicle,
    }
}

pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<(), IoError> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridepool_core::graph::StationId;
    use ridepool_core::itinerary::Itinerary;
    use ridepool_core::vehicle::VehicleId;

    fn stop(station: u32, boarding: i32, planned: i64, occupation: i32, request: u64) -> Stop {
        Stop {
            station: StationId(station),
            boarding,
            promised_time: planned,
            request_id: RequestId(request),
            planned_time: planned,
            delay: 0,
            occupation,
            max_delay: 5,
        }
    }

    fn graph() -> StationGraph {
        StationGraph::builder()
            .with_travel_time(StationId(1), StationId(2), 10)
            .with_distance(StationId(1), StationId(2), 5.0)
            .build()
    }

    #[test]
    fn summary_only_counts_occupied_legs() {
        let mut vehicle = Vehicle::new(VehicleId(1), "v1", 4, "van");
        vehicle
            .itinerary
            .commit(Itinerary::from_stops(vec![stop(1, 2, 0, 2, 1), stop(2, -2, 11, 0, 1)]));
        let summary = build_summary(&[vehicle], &graph());
        assert_eq!(summary.total.distance_total, 5.0);
        assert_eq!(summary.total.distance_occupied, 5.0);
        assert_eq!(summary.total.passanger_distance, 10.0);
    }

    #[test]
    fn pause_is_zero_when_next_departs_immediately() {
        assert_eq!(pause_minutes(10, 10), 0);
        assert_eq!(pause_minutes(10, 15), 5);
    }

    #[test]
    fn departure_time_includes_standing_time() {
        let mut vehicle = Vehicle::new(VehicleId(1), "v1", 4, "van");
        vehicle
            .itinerary
            .commit(Itinerary::from_stops(vec![stop(1, 2, 0, 2, 1), stop(2, -2, 11, 0, 1)]));
        let mut index = StationIndex::default();
        index.intern("depot");
        index.intern("a");
        index.intern("b");
        let weights = DispatchWeights::default().with_standing_time(1);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.csv");
        write_schedule_csv(&path, &[vehicle], &graph(), &index, &weights).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let record = reader.records().next().unwrap().unwrap();
        // departure_time is the third field; planned_time=0 + standing_time=1.
        assert_eq!(&record[3], "1");
    }
}
