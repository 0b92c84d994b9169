//! String renderings used by detail views that list related records by name.

use chrono::{DateTime, Utc};

use crate::entities::airport;

pub fn airport_label(airport: &airport::Model) -> String {
    format!("{} ({})", airport.name, airport.closest_big_city)
}

pub fn route_label(source: &airport::Model, destination: &airport::Model, distance: i32) -> String {
    format!(
        "{} -> {} ({} km)",
        airport_label(source),
        airport_label(destination),
        distance
    )
}

pub fn flight_label(
    source: &airport::Model,
    destination: &airport::Model,
    distance: i32,
    departure_time: DateTime<Utc>,
) -> String {
    format!(
        "{} ({})",
        route_label(source, destination, distance),
        departure_time.format("%Y-%m-%d %H:%M")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn jfk() -> airport::Model {
        airport::Model {
            id: 1,
            name: "JFK Airport".to_string(),
            closest_big_city: "New York".to_string(),
        }
    }

    fn lax() -> airport::Model {
        airport::Model {
            id: 2,
            name: "LAX Airport".to_string(),
            closest_big_city: "Los Angeles".to_string(),
        }
    }

    #[test]
    fn airport_label_includes_city() {
        assert_eq!(airport_label(&jfk()), "JFK Airport (New York)");
    }

    #[test]
    fn route_label_joins_endpoints_and_distance() {
        assert_eq!(
            route_label(&jfk(), &lax(), 3944),
            "JFK Airport (New York) -> LAX Airport (Los Angeles) (3944 km)"
        );
    }

    #[test]
    fn flight_label_appends_departure() {
        let departure = Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 0).unwrap();
        assert_eq!(
            flight_label(&jfk(), &lax(), 3944, departure),
            "JFK Airport (New York) -> LAX Airport (Los Angeles) (3944 km) (2024-06-01 14:30)"
        );
    }
}
