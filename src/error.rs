use thiserror::Error;

/// Everything that can go wrong while turning catalog text into stars
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("coordinate {value:?} has {found} segments, expected 3 separated by ':'")]
    SegmentCount { value: String, found: usize },
    #[error("segment {segment:?} of coordinate {value:?} is not a number")]
    NotNumeric { value: String, segment: String },
    #[error("magnitude {0:?} is not a number")]
    Magnitude(String),
    #[error("record has {found} fields, expected 4 (ra, dec, magnitude, spectral class)")]
    FieldCount { found: usize },
    /// wraps any of the above with the 1-based number of the record it came from
    #[error("catalog record {record}: {source}")]
    Record {
        record: usize,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    pub fn at_record(self, record: usize) -> ParseError {
        ParseError::Record {
            record,
            source: Box::new(self),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("magnitude range is inverted: min {min} > max {max}")]
pub struct InvalidRangeError {
    pub min: f64,
    pub max: f64,
}

/// A magnitude grouper whose parameters cannot produce sensible point sizes
#[derive(Debug, Error, PartialEq)]
pub enum GroupingError {
    #[error(transparent)]
    Range(#[from] InvalidRangeError),
    #[error("{name} must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("point sizes are inverted: min_size {min} > max_size {max}")]
    InvertedSizes { min: f64, max: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {path} is not valid: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Grouping(#[from] GroupingError),
    #[error("the ground needs at least 3 sides, got {0}")]
    GroundSides(usize),
}
