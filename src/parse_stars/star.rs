use crate::coordinates::{self, Vector3};

/// An RGB display color, each channel in [0, 1]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Color {
        Color { r, g, b }
    }
}

/// Harvard spectral classes, hottest first
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

impl SpectralClass {
    /// picks the first class letter out of a catalog spectral code such as "gK0", "sdM1" or
    /// "A2Vn". Luminosity prefixes are lowercase in the catalog, so only uppercase letters count.
    /// Anything without a recognizable class letter is treated as A
    pub fn from_code(code: &str) -> SpectralClass {
        code.chars()
            .filter(|c| c.is_ascii_uppercase())
            .find_map(|c| match c {
                'O' => Some(SpectralClass::O),
                'B' => Some(SpectralClass::B),
                'A' => Some(SpectralClass::A),
                'F' => Some(SpectralClass::F),
                'G' => Some(SpectralClass::G),
                'K' => Some(SpectralClass::K),
                'M' => Some(SpectralClass::M),
                _ => None,
            })
            .unwrap_or(SpectralClass::A)
    }

    pub fn color(self) -> Color {
        match self {
            SpectralClass::O => Color::rgb(0.61, 0.69, 1.0),
            SpectralClass::B => Color::rgb(0.67, 0.75, 1.0),
            SpectralClass::A => Color::rgb(0.79, 0.84, 1.0),
            SpectralClass::F => Color::rgb(0.97, 0.97, 1.0),
            SpectralClass::G => Color::rgb(1.0, 0.96, 0.92),
            SpectralClass::K => Color::rgb(1.0, 0.82, 0.63),
            SpectralClass::M => Color::rgb(1.0, 0.8, 0.44),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// the x, y, z coordinates of the star on the unit celestial sphere
    pub coords: Vector3,
    /// the visual brightness of the star in magnitudes, lower is brighter
    pub magnitude: f64,
    /// the spectral code exactly as the catalog gives it
    pub spectral_class: String,
}

impl Star {
    /// ra and dec are in radians
    pub fn new(ra: f64, dec: f64, magnitude: f64, spectral_class: &str) -> Star {
        Star {
            coords: coordinates::vector_from_angles(ra, dec),
            magnitude,
            spectral_class: spectral_class.to_string(),
        }
    }

    /// returns (ra, dec) in radians, ra in [0, 2pi)
    pub fn ra_dec(&self) -> (f64, f64) {
        coordinates::vector_to_ra_dec(&self.coords)
    }

    pub fn class(&self) -> SpectralClass {
        SpectralClass::from_code(&self.spectral_class)
    }

    /// a copy of this star moved to a new position, magnitude and class untouched
    pub fn moved_to(&self, coords: Vector3) -> Star {
        Star {
            coords,
            magnitude: self.magnitude,
            spectral_class: self.spectral_class.clone(),
        }
    }
}
