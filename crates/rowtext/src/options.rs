use std::fmt::{self, Debug, Formatter};

use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset, macros::format_description as fd};
use time_tz::{Offset, TimeZone, Tz, timezones};

use crate::{
    error::{BuildError, Error},
    Result,
};

/// A time zone used to anchor wall-clock date and time values.
#[derive(Clone, Copy)]
pub enum Location {
    Utc,
    Fixed(UtcOffset),
    Named(&'static Tz),
}

impl Location {
    /// Resolve a time zone name as sent by the server in a type argument.
    ///
    /// Accepts the empty string and `UTC`, fixed offsets such as `+08:00`,
    /// and IANA zone names.
    pub fn named(name: &str) -> std::result::Result<Self, BuildError> {
        match name {
            "" | "UTC" | "Etc/UTC" => return Ok(Location::Utc),
            _ => {}
        }
        if name.starts_with(['+', '-']) {
            return UtcOffset::parse(name, fd!("[offset_hour sign:mandatory]:[offset_minute]"))
                .map(Location::Fixed)
                .map_err(|_| BuildError::UnknownTimezone(name.into()));
        }
        timezones::get_by_name(name)
            .map(Location::Named)
            .ok_or_else(|| BuildError::UnknownTimezone(name.into()))
    }

    pub fn name(&self) -> String {
        match self {
            Location::Utc => "UTC".into(),
            Location::Fixed(offset) => {
                let (h, m, _) = offset.as_hms();
                format!("{}{:02}:{:02}", if offset.is_negative() { '-' } else { '+' }, h.abs(), m.abs())
            }
            Location::Named(tz) => tz.name().into(),
        }
    }

    /// Interpret a wall-clock reading in this location.
    pub fn resolve(&self, local: PrimitiveDateTime) -> OffsetDateTime {
        match self {
            Location::Utc => local.assume_utc(),
            Location::Fixed(offset) => local.assume_offset(*offset),
            Location::Named(tz) => {
                // The offset in effect depends on the instant, which depends on
                // the offset; one refinement settles it outside DST gaps.
                let guess = tz.get_offset_utc(&local.assume_utc()).to_utc();
                let offset = tz.get_offset_utc(&local.assume_offset(guess)).to_utc();
                local.assume_offset(offset)
            }
        }
    }
}

impl Debug for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self.name())
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Location::Utc, Location::Utc) => true,
            (Location::Fixed(a), Location::Fixed(b)) => a == b,
            (Location::Named(a), Location::Named(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

/// Options consulted when compiling decoders.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct DecodeOptions {
    /// Location for date and time columns. Also overrides the time zone
    /// argument of `DateTime` columns unless `prefer_db_location` is set.
    pub default_location: Option<Location>,
    /// Prefer a column's own time zone argument over `default_location`.
    pub prefer_db_location: bool,
    /// Parse integer columns directly instead of through a 64-bit float.
    ///
    /// Off by default: the float intermediate matches the established wire
    /// behavior, but loses precision for 64-bit values beyond 2^53.
    pub exact_integers: bool,
}

impl DecodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn default_location(mut self, location: Location) -> Self {
        self.default_location = Some(location);
        self
    }

    #[must_use]
    pub fn prefer_db_location(mut self, prefer: bool) -> Self {
        self.prefer_db_location = prefer;
        self
    }

    #[must_use]
    pub fn exact_integers(mut self, exact: bool) -> Self {
        self.exact_integers = exact;
        self
    }

    /// Build options from connection parameters.
    ///
    /// Recognizes `location`, `use_db_location` (alias `prefer_db_location`)
    /// and `exact_integers`. Other keys configure other layers of the client
    /// and are ignored.
    pub fn from_params<I, K, V>(params: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::new();
        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref());
            let config_error = |reason: String| Error::Config {
                key: key.into(),
                value: value.into(),
                reason,
            };
            match key {
                "location" => {
                    let location = Location::named(value).map_err(|e| config_error(e.to_string()))?;
                    options.default_location = Some(location);
                }
                "use_db_location" | "prefer_db_location" => {
                    options.prefer_db_location = crate::decoder::parse_bool(value)
                        .ok_or_else(|| config_error("expected a boolean".into()))?;
                }
                "exact_integers" => {
                    options.exact_integers = crate::decoder::parse_bool(value)
                        .ok_or_else(|| config_error("expected a boolean".into()))?;
                }
                _ => {}
            }
        }
        Ok(options)
    }
}
