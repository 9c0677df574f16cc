use super::grid::{self, SphereGrid};
use super::orientation::{FrameStep, ViewOrientation};
use super::surface::{Primitive, Surface};
use crate::catalog::StarCatalog;
use crate::config::{GridConfig, SkyConfig};
use crate::coordinates::sidereal::SiderealRotator;
use crate::coordinates::Vector3;
use crate::error::GroupingError;
use crate::grouping::{MagnitudeGrouper, StarBatch};
use crate::parse_stars::star::Color;
use chrono::NaiveDateTime;
use nalgebra::Rotation3;

pub const DATE_FORMAT: &str = "%Y/%m/%d %H:%M";

const GROUND_COLOR: Color = Color::rgb(0.11, 0.65, 0.14);
const GRID_COLOR: Color = Color::rgb(0.2, 0.5, 0.8);
const LABEL_COLOR: Color = Color::WHITE;
/// cardinal labels float this far above the horizon
const LABEL_ELEVATION: f64 = 0.05;

/// Owns everything needed to draw the sky: the base catalog, the star batches for the current
/// date, the grid and ground geometry and the camera.
pub struct SkyRenderer {
    catalog: StarCatalog,
    rotator: SiderealRotator,
    grouper: Box<dyn MagnitudeGrouper>,
    orientation: ViewOrientation,
    grid: SphereGrid,
    ground: Vec<Vector3>,
    grid_config: GridConfig,
    drag_sensitivity: f64,
    date: NaiveDateTime,
    batches: Vec<StarBatch>,
}

impl SkyRenderer {
    /// builds the geometry once and positions the stars at the epoch
    pub fn new(catalog: StarCatalog, config: &SkyConfig) -> Result<SkyRenderer, GroupingError> {
        let grid_config = config.grid;
        let rotator = SiderealRotator::default();
        let mut renderer = SkyRenderer {
            catalog,
            rotator,
            grouper: config.grouping.grouper()?,
            orientation: ViewOrientation::new(&config.view),
            grid: grid::generate_grid(
                grid_config.radius,
                grid_config.latitude_bands,
                grid_config.longitude_divisions,
            ),
            ground: grid::generate_ground_vertices(
                grid_config.radius,
                grid_config.ground_sides,
                grid_config.ground_depth,
            ),
            grid_config,
            drag_sensitivity: config.view.drag_sensitivity,
            date: rotator.epoch(),
            batches: vec![],
        };
        renderer.set_date(rotator.epoch());
        Ok(renderer)
    }

    /// moves the sky to `date`, always starting again from the catalog positions
    pub fn set_date(&mut self, date: NaiveDateTime) {
        self.date = date;
        let stars = self.catalog.positions_at(&self.rotator, date);
        self.batches = self.grouper.group(&stars);
        log::info!(
            "sky set to {}, {} stars in {} batches",
            self.current_date_text(),
            stars.len(),
            self.batches.len()
        );
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn current_date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn catalog(&self) -> &StarCatalog {
        &self.catalog
    }

    pub fn batches(&self) -> &[StarBatch] {
        &self.batches
    }

    pub fn grid(&self) -> &SphereGrid {
        &self.grid
    }

    pub fn orientation(&self) -> &ViewOrientation {
        &self.orientation
    }

    pub fn orientation_mut(&mut self) -> &mut ViewOrientation {
        &mut self.orientation
    }

    /// mouse drag of (dx, dy) pixels turns the head
    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.orientation.drag_head(dx, dy, self.drag_sensitivity);
    }

    /// draws one full frame: ground, cardinal points, grid, stars
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.set_projection(&self.orientation.projection().perspective());
        let mut transform: Rotation3<f64> = Rotation3::identity();
        for step in self.orientation.frame_steps() {
            match step {
                FrameStep::Rotate { degrees, axis } => {
                    transform *= FrameStep::rotation(degrees, axis);
                }
                FrameStep::DrawGround => self.draw_ground(surface, &transform),
                FrameStep::DrawSky => {
                    self.draw_grid(surface, &transform);
                    self.draw_stars(surface, &transform);
                }
            }
        }
    }

    fn draw_ground(&self, surface: &mut dyn Surface, transform: &Rotation3<f64>) {
        surface.set_color(GROUND_COLOR);
        surface.draw(Primitive::TriangleFan, transform, &self.ground);
        if !self.grid_config.show_cardinal_points {
            return;
        }
        surface.set_color(LABEL_COLOR);
        let r = self.grid_config.radius;
        let points = [
            ("N", Vector3::new(r, LABEL_ELEVATION, 0.0)),
            ("E", Vector3::new(0.0, LABEL_ELEVATION, r)),
            ("S", Vector3::new(-r, LABEL_ELEVATION, 0.0)),
            ("W", Vector3::new(0.0, LABEL_ELEVATION, -r)),
        ];
        for (text, position) in points {
            surface.draw_label(text, transform, position);
        }
    }

    /// meridians as open strips, parallels as closed loops
    fn draw_grid(&self, surface: &mut dyn Surface, transform: &Rotation3<f64>) {
        surface.set_color(GRID_COLOR);
        for j in 0..self.grid.column_count() {
            surface.draw(Primitive::LineStrip, transform, &self.grid.column(j));
        }
        for row in &self.grid.rows {
            surface.draw(Primitive::LineLoop, transform, row);
        }
    }

    fn draw_stars(&self, surface: &mut dyn Surface, transform: &Rotation3<f64>) {
        for batch in self.batches.iter().filter(|b| !b.stars.is_empty()) {
            surface.set_color(batch.color);
            surface.set_point_size(batch.size);
            let points: Vec<Vector3> = batch.stars.iter().map(|s| s.coords).collect();
            surface.draw(Primitive::Points, transform, &points);
        }
    }
}
