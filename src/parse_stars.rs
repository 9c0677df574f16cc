pub mod star;
use crate::coordinates;
use crate::error::ParseError;
use serde_derive::Deserialize;
use star::Star;

/// what to do with a catalog record that cannot be parsed
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub enum BadRecordPolicy {
    /// stop at the first bad record and report it
    Abort,
    /// log a warning and carry on without the record
    Skip,
}

impl Default for BadRecordPolicy {
    fn default() -> Self {
        BadRecordPolicy::Abort
    }
}

/// builds a star from the four catalog fields: ra "HH:MM:SS", dec "±DD:MM:SS", magnitude and
/// spectral class
pub fn parse_record(fields: &[&str]) -> Result<Star, ParseError> {
    if fields.len() != 4 {
        return Err(ParseError::FieldCount {
            found: fields.len(),
        });
    }
    let coords = coordinates::vector_from_catalog(fields[0], fields[1])?;
    let magnitude = fields[2]
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite())
        .ok_or_else(|| ParseError::Magnitude(fields[2].to_string()))?;
    Ok(Star {
        coords,
        magnitude,
        spectral_class: fields[3].trim().to_string(),
    })
}

/// a header names its columns, so its first field is not an "HH:MM:SS" coordinate
fn is_header(fields: &[&str]) -> bool {
    fields.first().map_or(true, |ra| !ra.contains(':'))
}

/// reads comma separated catalog records, one star per line
/// blank lines and a leading header are ignored, record numbers in errors count from 1 over all
/// lines
pub fn parse_catalog(text: &str, policy: BadRecordPolicy) -> Result<Vec<Star>, ParseError> {
    let mut stars: Vec<Star> = vec![];
    let mut skipped = 0;
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = line.split(',').collect::<Vec<&str>>();
        match parse_record(&fields) {
            Ok(s) => stars.push(s),
            Err(_) if index == 0 && is_header(&fields) => {
                log::debug!("skipping catalog header {:?}", line.trim());
            }
            Err(e) => {
                let e = e.at_record(index + 1);
                match policy {
                    BadRecordPolicy::Abort => return Err(e),
                    BadRecordPolicy::Skip => {
                        log::warn!("skipping {}", e);
                        skipped += 1;
                    }
                }
            }
        }
    }
    if skipped > 0 {
        log::info!("parsed {} stars, skipped {} bad records", stars.len(), skipped);
    }
    Ok(stars)
}
