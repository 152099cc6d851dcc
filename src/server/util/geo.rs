//! Great-circle distance and straight-line travel estimates.

use crate::model::map::{DistanceDto, TravelMode};

/// Mean radius of the earth in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average speed assumed for each travel mode when estimating durations, in km/h
pub fn average_speed_kmh(mode: TravelMode) -> f64 {
    match mode {
        TravelMode::Driving => 30.0,
        TravelMode::Walking => 5.0,
        TravelMode::Transit => 20.0,
    }
}

/// Haversine distance between two coordinates in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Travel time in whole minutes to cover `distance_km` at the mode's average speed.
pub fn estimate_minutes(distance_km: f64, mode: TravelMode) -> i32 {
    (distance_km / average_speed_kmh(mode) * 60.0).round() as i32
}

/// Builds a distance result from a straight-line estimate.
pub fn estimate(distance_km: f64, mode: TravelMode) -> DistanceDto {
    let distance_meters = (distance_km * 1000.0).round();
    let duration_seconds = (distance_km / average_speed_kmh(mode) * 3600.0).round();

    DistanceDto {
        distance_meters,
        duration_seconds,
        distance_text: format_distance(distance_meters),
        duration_text: format_duration(duration_seconds),
        estimated: true,
    }
}

/// Formats metres as `850 m` below one kilometre and `2.4 km` above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round() as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// Formats seconds as `1h 5m`, `12 min`, or `45 sec` depending on magnitude.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as i64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{} min", minutes)
    } else {
        format!("{} sec", total)
    }
}
