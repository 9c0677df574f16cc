use crate::coordinates;
use crate::parse_stars::star::Star;
use chrono::{DateTime, Duration, NaiveDateTime};

/// length of one rotation of the earth relative to the distant stars
pub const SIDEREAL_DAY_SECONDS: f64 = 86164.091;

/// 2000-01-01 12:00 as seconds after the unix epoch
const EPOCH_UNIX_SECONDS: i64 = 946_728_000;

/// the date at which catalog positions are taken as-is, 2000-01-01 12:00
pub fn epoch() -> NaiveDateTime {
    DateTime::UNIX_EPOCH.naive_utc() + Duration::seconds(EPOCH_UNIX_SECONDS)
}

/// how far the sky turns in `delta_seconds`, in degrees. Not wrapped, a week gives ~2527 degrees
pub fn rotation_angle_degrees(delta_seconds: f64) -> f64 {
    delta_seconds / SIDEREAL_DAY_SECONDS * 360.0
}

/// Turns catalog positions into the positions seen at a given date.
///
/// Every date is measured against the same fixed epoch and applied to the unrotated catalog,
/// so moving back and forth between dates never accumulates error.
#[derive(Debug, Clone, Copy)]
pub struct SiderealRotator {
    epoch: NaiveDateTime,
}

impl Default for SiderealRotator {
    fn default() -> Self {
        SiderealRotator { epoch: epoch() }
    }
}

impl SiderealRotator {
    pub fn with_epoch(epoch: NaiveDateTime) -> SiderealRotator {
        SiderealRotator { epoch }
    }

    pub fn epoch(&self) -> NaiveDateTime {
        self.epoch
    }

    /// seconds elapsed from the epoch to `date`, negative for earlier dates
    pub fn delta_seconds(&self, date: NaiveDateTime) -> f64 {
        (date - self.epoch).num_milliseconds() as f64 / 1000.0
    }

    /// returns a new star whose right ascension is advanced by the sky rotation over
    /// `delta_seconds`. Declination, magnitude and spectral class are untouched
    pub fn rotate(&self, star: &Star, delta_seconds: f64) -> Star {
        let (ra, dec) = star.ra_dec();
        let new_ra = (ra.to_degrees() + rotation_angle_degrees(delta_seconds)).rem_euclid(360.0);
        star.moved_to(coordinates::vector_from_angles(new_ra.to_radians(), dec))
    }

    /// rotates every star of the base catalog to `date`, the input is left as it is
    pub fn rotate_all(&self, stars: &[Star], date: NaiveDateTime) -> Vec<Star> {
        let delta = self.delta_seconds(date);
        log::debug!(
            "rotating {} stars to {}: {:.0} s from epoch, {:.3} degrees",
            stars.len(),
            date,
            delta,
            rotation_angle_degrees(delta).rem_euclid(360.0)
        );
        stars.iter().map(|s| self.rotate(s, delta)).collect()
    }
}
