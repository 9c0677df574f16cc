use chrono::NaiveDateTime;
use sky_dome::catalog::StarCatalog;
use sky_dome::config::SkyConfig;
use sky_dome::parse_stars::BadRecordPolicy;
use sky_dome::sky::renderer::DATE_FORMAT;
use sky_dome::sky::surface::{DrawCommand, Primitive, RecordingSurface};
use sky_dome::sky::SkyRenderer;

fn sample_sky() -> SkyRenderer {
    let catalog = StarCatalog::load_from_file("data/sample_stars.csv", BadRecordPolicy::Abort).unwrap();
    SkyRenderer::new(catalog, &SkyConfig::default()).unwrap()
}

#[test]
fn sample_catalog_renders_every_star() {
    let mut sky = sample_sky();
    assert_eq!(sky.catalog().len(), 21);
    let date = NaiveDateTime::parse_from_str("2024/03/20 21:30", DATE_FORMAT).unwrap();
    sky.set_date(date);
    assert_eq!(sky.current_date_text(), "2024/03/20 21:30");

    let mut surface = RecordingSurface::default();
    sky.render(&mut surface);

    let mut drawn = 0;
    let mut last_size = f64::INFINITY;
    for c in &surface.commands {
        match c {
            DrawCommand::PointSize(size) => {
                // batches arrive brightest first
                assert!(*size <= last_size);
                last_size = *size;
            }
            DrawCommand::Draw {
                primitive: Primitive::Points,
                vertices,
                ..
            } => {
                for v in vertices {
                    assert!((0.99..=1.01).contains(&v.norm()));
                }
                drawn += vertices.len();
            }
            _ => {}
        }
    }
    assert_eq!(drawn, 21);
}

#[test]
fn sky_after_one_sidereal_day_matches() {
    let mut sky = sample_sky();
    let start = sky.date();
    let before = sky.batches().to_vec();
    sky.set_date(start + chrono::Duration::milliseconds(86_164_091));
    for (a, b) in before.iter().zip(sky.batches()) {
        assert_eq!(a.size, b.size);
        for (s, t) in a.stars.iter().zip(b.stars.iter()) {
            assert!((s.coords - t.coords).norm() < 1e-6);
        }
    }
}
