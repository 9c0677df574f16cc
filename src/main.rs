use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use sky_dome::catalog::StarCatalog;
use sky_dome::config::SkyConfig;
use sky_dome::sky::orientation::HeadAxis;
use sky_dome::sky::renderer::DATE_FORMAT;
use sky_dome::sky::surface::{DrawCommand, Primitive, RecordingSurface};
use sky_dome::sky::SkyRenderer;
use std::path::PathBuf;

const DEFAULT_CATALOG: &str = "data/sample_stars.csv";

/// Renders one frame of the night sky to a recording surface and logs what was drawn
#[derive(Parser, Debug)]
#[command(name = "sky_dome", about = "Draws the celestial sphere for a site and a date", long_about = None)]
struct Args {
    /// Star catalog, comma separated ra,dec,magnitude,spectral class records
    #[arg(default_value = DEFAULT_CATALOG)]
    catalog: PathBuf,

    /// JSON configuration file, built-in defaults when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Date to show the sky at, "YYYY/MM/DD HH:MM"
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDateTime>,
}

fn parse_date(text: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| format!("{:?} is not in the form {}: {}", text, DATE_FORMAT, e))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SkyConfig::load(path)?,
        None => SkyConfig::default(),
    };

    let catalog = StarCatalog::load_from_file(&args.catalog, config.bad_records)
        .with_context(|| format!("failed to load star catalog {}", args.catalog.display()))?;
    if catalog.is_empty() {
        bail!("star catalog {} has no stars, nothing to draw", args.catalog.display());
    }

    let mut sky = SkyRenderer::new(catalog, &config)?;
    sky.orientation_mut().subscribe(Box::new(|axis: HeadAxis, value: f64| {
        log::debug!("head {:?} is now {:.2}", axis, value);
    }));
    if let Some(date) = args.date {
        sky.set_date(date);
    }

    let mut surface = RecordingSurface::default();
    sky.render(&mut surface);

    let stars_drawn: usize = surface
        .commands
        .iter()
        .map(|c| match c {
            DrawCommand::Draw {
                primitive: Primitive::Points,
                vertices,
                ..
            } => vertices.len(),
            _ => 0,
        })
        .sum();
    log::info!(
        "frame at {}: {} meridians, {} parallels, {} stars in {} point batches",
        sky.current_date_text(),
        surface.draws(Primitive::LineStrip).count(),
        surface.draws(Primitive::LineLoop).count(),
        stars_drawn,
        surface.draws(Primitive::Points).count()
    );
    for batch in sky.batches() {
        log::debug!("point size {:.2}: {} stars", batch.size, batch.stars.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arguments() {
        let args = Args::try_parse_from(["sky_dome"]).unwrap();
        assert_eq!(args.catalog, PathBuf::from(DEFAULT_CATALOG));
        assert!(args.config.is_none());
        assert!(args.date.is_none());
    }

    #[test]
    fn test_all_arguments() {
        let args = Args::try_parse_from([
            "sky_dome",
            "stars.csv",
            "--config",
            "sky.json",
            "--date",
            "2024/03/20 21:30",
        ])
        .unwrap();
        assert_eq!(args.catalog, PathBuf::from("stars.csv"));
        assert_eq!(args.config, Some(PathBuf::from("sky.json")));
        assert_eq!(args.date, Some(parse_date("2024/03/20 21:30").unwrap()));
    }

    #[test]
    fn test_bad_arguments_rejected() {
        assert!(Args::try_parse_from(["sky_dome", "--date", "2024-03-20"]).is_err());
        assert!(Args::try_parse_from(["sky_dome", "--date"]).is_err());
        assert!(Args::try_parse_from(["sky_dome", "--zoom", "2"]).is_err());
    }
}
