//! Conversion between `H:M:S` timecodes and seconds.

/// Errors produced when parsing a timecode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimecodeError {
    /// The text does not have exactly three `:`-separated fields.
    #[error("expected H:M:S, got {0:?}")]
    Format(String),

    /// One of the fields is not a valid number.
    #[error("invalid {field} in timecode {input:?}")]
    Field { field: &'static str, input: String },
}

/// Parse `H:M:S` into seconds.
///
/// Hours and minutes are integers; seconds may be fractional
/// (`00:01:02.500`). Field ranges are not checked, so `0:90:00` is 5400s.
pub fn time_to_seconds(text: &str) -> Result<f64, TimecodeError> {
    let fields: Vec<&str> = text.trim().split(':').collect();
    let [h, m, s] = fields.as_slice() else {
        return Err(TimecodeError::Format(text.to_string()));
    };

    let field_err = |field| TimecodeError::Field {
        field,
        input: text.to_string(),
    };

    let hours: u64 = h.trim().parse().map_err(|_| field_err("hours"))?;
    let minutes: u64 = m.trim().parse().map_err(|_| field_err("minutes"))?;
    let seconds: f64 = s.trim().parse().map_err(|_| field_err("seconds"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(field_err("seconds"));
    }

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
}

/// Format seconds as `HH:MM:SS`, or `HH:MM:SS.mmm` when there is a
/// non-zero millisecond part.
///
/// Values are rounded to the nearest millisecond. Negative and non-finite
/// inputs format as `00:00:00`.
pub fn seconds_to_time(seconds: f64) -> String {
    let total_ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };

    let h = total_ms / 3_600_000;
    let m = (total_ms / 60_000) % 60;
    let s = (total_ms / 1000) % 60;
    let ms = total_ms % 1000;

    if ms == 0 {
        format!("{:02}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}:{:02}.{:03}", h, m, s, ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_seconds() {
        assert_eq!(time_to_seconds("00:09:30").unwrap(), 570.0);
        assert_eq!(time_to_seconds("1:02:03").unwrap(), 3723.0);
        assert_eq!(time_to_seconds("00:00:01.250").unwrap(), 1.25);
        assert_eq!(time_to_seconds(" 0:90:00 ").unwrap(), 5400.0);
    }

    #[test]
    fn test_time_to_seconds_rejects_malformed() {
        assert_eq!(
            time_to_seconds("09:30"),
            Err(TimecodeError::Format("09:30".to_string()))
        );
        assert!(time_to_seconds("1:2:3:4").is_err());
        assert!(time_to_seconds("").is_err());
        assert!(matches!(
            time_to_seconds("aa:00:00"),
            Err(TimecodeError::Field { field: "hours", .. })
        ));
        assert!(matches!(
            time_to_seconds("00:1.5:00"),
            Err(TimecodeError::Field { field: "minutes", .. })
        ));
        assert!(time_to_seconds("00:00:-1").is_err());
        assert!(time_to_seconds("00:00:NaN").is_err());
    }

    #[test]
    fn test_seconds_to_time() {
        assert_eq!(seconds_to_time(0.0), "00:00:00");
        assert_eq!(seconds_to_time(148.0), "00:02:28");
        assert_eq!(seconds_to_time(3723.0), "01:02:03");
        assert_eq!(seconds_to_time(1.5), "00:00:01.500");
        assert_eq!(seconds_to_time(59.9996), "00:01:00");
        assert_eq!(seconds_to_time(90_000.0), "25:00:00");
    }

    #[test]
    fn test_seconds_to_time_clamps_negative() {
        assert_eq!(seconds_to_time(-12.0), "00:00:00");
        assert_eq!(seconds_to_time(f64::NAN), "00:00:00");
    }

    #[test]
    fn test_time_to_seconds_huge_hours_does_not_overflow() {
        let secs = time_to_seconds("6000000000000000:00:00").unwrap();
        assert_eq!(secs, 6.0e15 * 3600.0);

        let secs = time_to_seconds("0:18446744073709551615:00").unwrap();
        assert!(secs.is_finite() && secs > 1.0e21);
    }

    #[test]
    fn test_round_trip_within_a_millisecond() {
        let samples = [
            0.0, 0.001, 0.5, 1.0, 59.999, 61.25, 599.4, 3599.9995, 3600.0, 45_296.789, 86_399.0,
        ];
        for s in samples {
            let back = time_to_seconds(&seconds_to_time(s)).unwrap();
            assert!((back - s).abs() <= 0.001, "{} -> {}", s, back);
        }
    }
}
