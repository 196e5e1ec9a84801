//! Traffic alert input types.

/// Collision alarm severity, lowest to highest.
///
/// The numeric ranks match the traffic-awareness core and are what the
/// companion `$PSRAA` sentence reports (minus one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AlarmLevel {
    /// No alarm
    #[default]
    None = 0,
    /// Traffic nearby, no conflict predicted
    Low = 1,
    /// Conflict possible
    Important = 2,
    /// Conflict likely
    Urgent = 3,
    /// Conflict imminent
    Critical = 4,
}

impl AlarmLevel {
    /// Numeric rank (0–4).
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Parse a numeric rank; `None` for anything above 4.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::None),
            1 => Some(Self::Low),
            2 => Some(Self::Important),
            3 => Some(Self::Urgent),
            4 => Some(Self::Critical),
            _ => None,
        }
    }

    /// Lower-case name, for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Important => "important",
            Self::Urgent => "urgent",
            Self::Critical => "critical",
        }
    }
}

/// Snapshot of one traffic object at the moment an alarm is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrafficAlert {
    /// True bearing from own position to the traffic, in degrees.
    pub bearing_deg: i32,
    /// Traffic altitude minus own altitude (any unit, only the sign matters).
    pub alt_diff: i32,
    /// Alarm severity.
    pub alarm: AlarmLevel,
}
