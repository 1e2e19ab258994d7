//! Timestamp parsing and formatting.
//!
//! Moments arrive with timestamps in `H:MM:SS(.mmm)`, `MM:SS(.mmm)`, or bare
//! seconds form. Beats carry both the human-readable form and total seconds.

use thiserror::Error;

/// Result of a timestamp parse.
pub type TimestampResult = Result<f64, TimestampError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimestampError {
    #[error("Malformed timestamp: '{0}'")]
    Malformed(String),
}

/// Parse a timestamp string (`H:MM:SS(.mmm)`, `MM:SS(.mmm)`, or `SS(.mmm)`)
/// to total seconds.
pub fn parse_timestamp(ts: &str) -> TimestampResult {
    let malformed = || TimestampError::Malformed(ts.to_string());
    let parts: Vec<&str> = ts.trim().split(':').collect();
    match parts.len() {
        1 => {
            let seconds: f64 = parts[0].parse().map_err(|_| malformed())?;
            Ok(seconds)
        }
        2 => {
            let minutes: f64 = parts[0].parse().map_err(|_| malformed())?;
            let seconds: f64 = parts[1].parse().map_err(|_| malformed())?;
            Ok(minutes * 60.0 + seconds)
        }
        3 => {
            let hours: f64 = parts[0].parse().map_err(|_| malformed())?;
            let minutes: f64 = parts[1].parse().map_err(|_| malformed())?;
            let seconds: f64 = parts[2].parse().map_err(|_| malformed())?;
            Ok(hours * 3600.0 + minutes * 60.0 + seconds)
        }
        _ => Err(malformed()),
    }
}

/// Format total seconds as `H:MM:SS`, dropping any fractional part.
pub fn format_timestamp(total_seconds: f64) -> String {
    let total = total_seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("0:00:00").unwrap(), 0.0);
        assert_eq!(parse_timestamp("0:01:00").unwrap(), 60.0);
        assert_eq!(parse_timestamp("1:00:00").unwrap(), 3600.0);
        assert!((parse_timestamp("0:00:30.500").unwrap() - 30.5).abs() < 0.001);
        assert_eq!(parse_timestamp("53:53").unwrap(), 3233.0);
        assert_eq!(parse_timestamp("90").unwrap(), 90.0);
    }

    #[test]
    fn test_parse_timestamp_malformed() {
        assert!(parse_timestamp("abc").is_err());
        assert!(parse_timestamp("1:2:3:4").is_err());
        assert!(parse_timestamp("0:xx:00").is_err());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "0:00:00");
        assert_eq!(format_timestamp(90.0), "0:01:30");
        assert_eq!(format_timestamp(3661.0), "1:01:01");
        assert_eq!(format_timestamp(125.7), "0:02:05");
    }

    #[test]
    fn test_roundtrip() {
        let secs = parse_timestamp("1:02:03").unwrap();
        assert_eq!(format_timestamp(secs), "1:02:03");
    }
}
