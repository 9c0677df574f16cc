//! The bright-star catalog as loaded at startup.
//!
//! `StarCatalog` keeps the stars at their epoch positions and is never modified afterwards.
//! Positions for other dates are derived from it by `SiderealRotator`, always starting from
//! these base positions.

use crate::coordinates::sidereal::SiderealRotator;
use crate::error::ParseError;
use crate::parse_stars::{self, star::Star, BadRecordPolicy};
use chrono::NaiveDateTime;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct StarCatalog {
    stars: Vec<Star>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("could not open star catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("star catalog {path} is malformed: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },
}

impl StarCatalog {
    pub fn new(stars: Vec<Star>) -> Self {
        Self { stars }
    }

    /// Parse a catalog held in memory.
    pub fn from_text(text: &str, policy: BadRecordPolicy) -> Result<Self, ParseError> {
        parse_stars::parse_catalog(text, policy).map(Self::new)
    }

    /// Read and parse a catalog file.
    pub fn load_from_file<P: AsRef<Path>>(path: P, policy: BadRecordPolicy) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: display.clone(),
            source,
        })?;
        let catalog = Self::from_text(&text, policy).map_err(|source| CatalogError::Parse {
            path: display.clone(),
            source,
        })?;
        log::info!("loaded {} stars from {}", catalog.len(), display);
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Stars at their epoch positions.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Fresh copies of every star placed where it appears at `date`.
    pub fn positions_at(&self, rotator: &SiderealRotator, date: NaiveDateTime) -> Vec<Star> {
        rotator.rotate_all(&self.stars, date)
    }
}
