/// Travel time as `"{h}h {m}min"`, or `"{m}min"` under an hour. Minutes are floored.
pub fn format_travel_time(seconds: f64) -> String {
    let minutes = (seconds.max(0.0) / 60.0).floor() as u64;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{}h {}min", hours, minutes % 60)
    } else {
        format!("{}min", minutes)
    }
}

pub fn format_distance(metres: f64) -> String {
    if metres >= 1000.0 {
        format!("{:.1} km", metres / 1000.0)
    } else {
        format!("{} m", metres.round() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_time_switches_to_hours() {
        assert_eq!(format_travel_time(59.0), "0min");
        assert_eq!(format_travel_time(125.0), "2min");
        assert_eq!(format_travel_time(3_600.0), "1h 0min");
        assert_eq!(format_travel_time(7_530.0), "2h 5min");
    }

    #[test]
    fn distance_switches_to_kilometres() {
        assert_eq!(format_distance(412.4), "412 m");
        assert_eq!(format_distance(999.6), "1000 m");
        assert_eq!(format_distance(1_260.0), "1.3 km");
    }
}
