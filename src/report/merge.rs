use std::collections::HashMap;

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::model::geo::{CheckInEvent, GeoPoint};

/// Composite key joining a geo event to its attendance day.
pub fn geo_key(day: NaiveDate, staff_email: &str) -> String {
    format!("{}|{}", day.format("%Y-%m-%d"), staff_email.to_lowercase())
}

/// Reduce raw check-in events to the first check-in per (day, staff), with
/// the day taken in the report's civil zone. Events are sorted ascending by
/// timestamp first; "first" must not depend on incidental query order.
pub fn first_checkin_by_day(mut events: Vec<CheckInEvent>, tz: Tz) -> HashMap<String, GeoPoint> {
    events.sort_by_key(|e| e.happened_at);

    let mut merged: HashMap<String, GeoPoint> = HashMap::new();
    for event in events {
        let day = event.happened_at.with_timezone(&tz).date_naive();
        merged
            .entry(geo_key(day, &event.staff_email))
            .or_insert(GeoPoint {
                lat: event.lat,
                lon: event.lon,
                distance_m: event.distance_m,
            });
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use chrono_tz::Asia::Kuala_Lumpur;

    fn event(ts: &str, email: &str, lat: f64) -> CheckInEvent {
        CheckInEvent {
            staff_email: email.into(),
            happened_at: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S")
                .unwrap()
                .and_utc(),
            lat: Some(lat),
            lon: Some(101.6),
            distance_m: Some(12.0),
        }
    }

    #[test]
    fn keeps_earliest_event_even_when_input_is_unsorted() {
        let events = vec![
            event("2024-03-04 02:10:00", "a@company.my", 3.2),
            event("2024-03-04 00:55:00", "a@company.my", 3.1),
        ];
        let merged = first_checkin_by_day(events, Kuala_Lumpur);
        let key = geo_key(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), "a@company.my");
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[&key].lat, Some(3.1));
    }

    #[test]
    fn utc_evening_lands_on_next_local_day() {
        // 17:30 UTC is 01:30 the next day in Kuala Lumpur (UTC+8)
        let events = vec![event("2024-03-01 17:30:00", "a@company.my", 3.1)];
        let merged = first_checkin_by_day(events, Kuala_Lumpur);
        let key = geo_key(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(), "a@company.my");
        assert!(merged.contains_key(&key));
    }

    #[test]
    fn key_is_case_insensitive_on_email() {
        let events = vec![
            event("2024-03-04 01:00:00", "A@Company.MY", 3.1),
            event("2024-03-04 01:30:00", "a@company.my", 3.9),
        ];
        let merged = first_checkin_by_day(events, Kuala_Lumpur);
        assert_eq!(merged.len(), 1);
        let key = geo_key(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), "a@company.my");
        assert_eq!(merged[&key].lat, Some(3.1));
    }

    #[test]
    fn distinct_staff_keep_their_own_first_event() {
        let events = vec![
            event("2024-03-04 01:00:00", "a@company.my", 3.1),
            event("2024-03-04 01:05:00", "b@company.my", 3.5),
        ];
        let merged = first_checkin_by_day(events, Kuala_Lumpur);
        assert_eq!(merged.len(), 2);
    }
}
