pub mod sidereal;
use crate::error::ParseError;
use std::f64::consts::PI;

/// a point on the celestial sphere, x towards ra = 0h on the equator, z towards the north pole
pub type Vector3 = nalgebra::Vector3<f64>;

/// the (x, y, z) components of a vector, in that order
pub fn components(v: &Vector3) -> (f64, f64, f64) {
    (v.x, v.y, v.z)
}

/// splits a "AA:BB:CC" catalog coordinate into its three numeric segments
fn split_sexagesimal(value: &str) -> Result<[f64; 3], ParseError> {
    let segments: Vec<&str> = value.trim().split(':').collect();
    if segments.len() != 3 {
        return Err(ParseError::SegmentCount {
            value: value.to_string(),
            found: segments.len(),
        });
    }
    let mut parsed = [0.0; 3];
    for (slot, segment) in parsed.iter_mut().zip(segments.iter()) {
        // f64 parsing accepts "nan" and "inf", neither is a coordinate
        *slot = segment
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::NotNumeric {
                value: value.to_string(),
                segment: segment.to_string(),
            })?;
    }
    Ok(parsed)
}

/// parses right ascension given as "HH:MM:SS" and returns it in radians
/// one hour of ra is 15 degrees, one minute 1/4 degree, one second 1/240 degree
pub fn parse_right_ascension(value: &str) -> Result<f64, ParseError> {
    let [hours, minutes, seconds] = split_sexagesimal(value)?;
    let degrees = hours * 15.0 + minutes / 4.0 + seconds / 240.0;
    Ok(degrees.to_radians())
}

/// parses declination given as "±DD:MM:SS" and returns it in radians
/// the sign is taken from the text rather than the degrees, so "-00:30:00" stays southern
pub fn parse_declination(value: &str) -> Result<f64, ParseError> {
    let [degrees, minutes, seconds] = split_sexagesimal(value)?;
    let magnitude = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
    let signed = if value.trim_start().starts_with('-') {
        -magnitude
    } else {
        magnitude
    };
    Ok(signed.to_radians())
}

/// unit vector for the given ra and dec, both in radians
pub fn vector_from_angles(ra: f64, dec: f64) -> Vector3 {
    let (ra_sin, ra_cos) = ra.sin_cos();
    let (dec_sin, dec_cos) = dec.sin_cos();
    Vector3::new(dec_cos * ra_cos, dec_cos * ra_sin, dec_sin)
}

/// inverse of vector_from_angles, returns (ra, dec) in radians with ra in [0, 2pi)
pub fn vector_to_ra_dec(v: &Vector3) -> (f64, f64) {
    let mut ra = v.y.atan2(v.x);
    if ra < 0.0 {
        ra += 2.0 * PI;
    }
    // rounding can push ra to exactly 2pi after the shift
    if ra >= 2.0 * PI {
        ra -= 2.0 * PI;
    }
    let dec = v.z.clamp(-1.0, 1.0).asin();
    (ra, dec)
}

/// parses both catalog coordinates of a star and projects them onto the unit sphere
pub fn vector_from_catalog(right_ascension: &str, declination: &str) -> Result<Vector3, ParseError> {
    let ra = parse_right_ascension(right_ascension)?;
    let dec = parse_declination(declination)?;
    Ok(vector_from_angles(ra, dec))
}
