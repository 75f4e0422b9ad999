//! Offset-preserving timestamps.
//!
//! A TOML datetime is more than an instant: `1979-05-27T07:32:00Z`,
//! `1979-05-27T07:32:00+00:00` and `1979-05-27T07:32:00.000-00:00` all name
//! the same moment but are written differently. [`Datetime`] keeps the
//! instant together with the written fractional-digit count and offset form
//! so the serializers can reproduce the literal exactly.

use crate::{Error, Result};
use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Serialize, Serializer};
use std::fmt;

const MAX_FRAC_DIGITS: u8 = 9;
const MAX_OFFSET_MINUTES: u16 = 24 * 60 - 1;
/// RFC3339 years are exactly four digits.
const YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// How the UTC offset of a timestamp was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Offset {
    /// Written as `Z`.
    Utc,
    /// Written as `+HH:MM` or `-HH:MM`.
    ///
    /// `negative` is kept separately from `minutes` so `-00:00` survives.
    Fixed { negative: bool, minutes: u16 },
}

impl Offset {
    /// Returns the offset east of UTC, in seconds.
    #[must_use]
    pub fn seconds(&self) -> i32 {
        match self {
            Offset::Utc => 0,
            Offset::Fixed { negative, minutes } => {
                let secs = i32::from(*minutes) * 60;
                if *negative {
                    -secs
                } else {
                    secs
                }
            }
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Utc => write!(f, "Z"),
            Offset::Fixed { negative, minutes } => write!(
                f,
                "{}{:02}:{:02}",
                if *negative { '-' } else { '+' },
                minutes / 60,
                minutes % 60
            ),
        }
    }
}

/// A calendar instant plus the details needed to write it back verbatim.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{Datetime, Offset};
///
/// let dt = Datetime::parse_from_rfc3339("1979-05-27T00:32:00.999-07:00").unwrap();
/// assert_eq!(dt.frac_digits(), 3);
/// assert_eq!(dt.offset(), Offset::Fixed { negative: true, minutes: 420 });
/// assert_eq!(dt.to_rfc3339(), "1979-05-27T00:32:00.999-07:00");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Datetime {
    instant: DateTime<FixedOffset>,
    frac_digits: u8,
    offset: Offset,
}

impl Datetime {
    /// Builds a timestamp from its parts.
    ///
    /// `epoch` is seconds since the Unix epoch (UTC), `nanos` the sub-second
    /// part, and `frac_digits` how many fractional-second digits to write.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Custom`] when a part is out of range, including an
    /// instant whose year in `offset` falls outside `0000..=9999`.
    pub fn from_parts(epoch: i64, nanos: u32, frac_digits: u8, offset: Offset) -> Result<Self> {
        if nanos >= 1_000_000_000 {
            return Err(Error::custom(format!("nanoseconds out of range: {}", nanos)));
        }
        if frac_digits > MAX_FRAC_DIGITS {
            return Err(Error::custom(format!(
                "at most {} fractional digits are supported, got {}",
                MAX_FRAC_DIGITS, frac_digits
            )));
        }
        if let Offset::Fixed { minutes, .. } = offset {
            if minutes > MAX_OFFSET_MINUTES {
                return Err(Error::custom(format!("offset out of range: {} minutes", minutes)));
            }
        }

        let zone = FixedOffset::east_opt(offset.seconds())
            .ok_or_else(|| Error::custom("offset out of range"))?;
        let instant = DateTime::from_timestamp(epoch, nanos)
            .ok_or_else(|| Error::custom(format!("timestamp out of range: {}", epoch)))?
            .with_timezone(&zone);
        if !YEARS.contains(&instant.year()) {
            return Err(Error::custom(format!(
                "year out of range: {} is not a four-digit year",
                instant.year()
            )));
        }

        Ok(Datetime {
            instant,
            frac_digits,
            offset,
        })
    }

    /// Parses an RFC3339 literal, remembering how it was written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Custom`] if `s` is not a valid RFC3339 timestamp.
    pub fn parse_from_rfc3339(s: &str) -> Result<Self> {
        let instant = DateTime::parse_from_rfc3339(s)
            .map_err(|e| Error::custom(format!("invalid datetime `{}`: {}", s, e)))?;

        let offset = if s.ends_with('Z') || s.ends_with('z') {
            Offset::Utc
        } else {
            let secs = instant.offset().local_minus_utc();
            Offset::Fixed {
                negative: s.len() >= 6 && s.as_bytes()[s.len() - 6] == b'-',
                minutes: (secs.unsigned_abs() / 60) as u16,
            }
        };

        let frac_digits = s
            .find('.')
            .map(|dot| s[dot + 1..].bytes().take_while(u8::is_ascii_digit).count())
            .unwrap_or(0)
            .min(usize::from(MAX_FRAC_DIGITS)) as u8;

        Ok(Datetime {
            instant,
            frac_digits,
            offset,
        })
    }

    /// Seconds since the Unix epoch.
    #[must_use]
    pub fn epoch(&self) -> i64 {
        self.instant.timestamp()
    }

    /// Sub-second nanoseconds.
    #[must_use]
    pub fn nanos(&self) -> u32 {
        self.instant.timestamp_subsec_nanos()
    }

    /// Number of fractional-second digits written in the source.
    #[must_use]
    pub fn frac_digits(&self) -> u8 {
        self.frac_digits
    }

    #[must_use]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Returns the instant as a `chrono` value in its written offset.
    #[must_use]
    pub fn to_chrono(&self) -> DateTime<FixedOffset> {
        self.instant
    }

    /// Renders the timestamp the way it was written.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        let mut out = self.instant.format("%Y-%m-%dT%H:%M:%S").to_string();
        if self.frac_digits > 0 {
            let scale = 10u32.pow(u32::from(MAX_FRAC_DIGITS - self.frac_digits));
            out.push_str(&format!(
                ".{:0width$}",
                self.nanos() / scale,
                width = usize::from(self.frac_digits)
            ));
        }
        out.push_str(&self.offset.to_string());
        out
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for Datetime {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zulu_round_trip() {
        let dt = Datetime::parse_from_rfc3339("1979-05-27T07:32:00Z").unwrap();
        assert_eq!(dt.offset(), Offset::Utc);
        assert_eq!(dt.frac_digits(), 0);
        assert_eq!(dt.epoch(), 296_638_320);
        assert_eq!(dt.to_rfc3339(), "1979-05-27T07:32:00Z");
    }

    #[test]
    fn test_negative_zero_offset_is_kept() {
        let dt = Datetime::parse_from_rfc3339("2001-01-01T00:00:00-00:00").unwrap();
        assert_eq!(
            dt.offset(),
            Offset::Fixed {
                negative: true,
                minutes: 0
            }
        );
        assert_eq!(dt.to_rfc3339(), "2001-01-01T00:00:00-00:00");
    }

    #[test]
    fn test_fraction_digits_are_kept() {
        let dt = Datetime::parse_from_rfc3339("1979-05-27T00:32:00.500+05:30").unwrap();
        assert_eq!(dt.frac_digits(), 3);
        assert_eq!(dt.nanos(), 500_000_000);
        assert_eq!(dt.to_rfc3339(), "1979-05-27T00:32:00.500+05:30");
    }

    #[test]
    fn test_from_parts_renders_in_written_offset() {
        let offset = Offset::Fixed {
            negative: true,
            minutes: 7 * 60,
        };
        let dt = Datetime::from_parts(296_638_320, 0, 0, offset).unwrap();
        assert_eq!(dt.to_rfc3339(), "1979-05-27T00:32:00-07:00");
        assert_eq!(dt.to_chrono().offset().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn test_from_parts_rejects_out_of_range() {
        assert!(Datetime::from_parts(0, 1_000_000_000, 0, Offset::Utc).is_err());
        assert!(Datetime::from_parts(0, 0, 10, Offset::Utc).is_err());
        let offset = Offset::Fixed {
            negative: false,
            minutes: 24 * 60,
        };
        assert!(Datetime::from_parts(0, 0, 0, offset).is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Datetime::parse_from_rfc3339("yesterday").is_err());
    }

    #[test]
    fn test_from_parts_keeps_to_four_digit_years() {
        let last = Datetime::from_parts(253_402_300_799, 0, 0, Offset::Utc).unwrap();
        assert_eq!(last.to_rfc3339(), "9999-12-31T23:59:59Z");
        assert!(Datetime::from_parts(253_402_300_800, 0, 0, Offset::Utc).is_err());

        let first = Datetime::from_parts(-62_167_219_200, 0, 0, Offset::Utc).unwrap();
        assert_eq!(first.to_rfc3339(), "0000-01-01T00:00:00Z");
        assert!(Datetime::from_parts(-62_167_219_201, 0, 0, Offset::Utc).is_err());

        // the same instant is already year 10000 one hour east
        let east = Offset::Fixed {
            negative: false,
            minutes: 60,
        };
        assert!(Datetime::from_parts(253_402_300_799, 0, 0, east).is_err());
    }
}
