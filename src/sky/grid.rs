use crate::coordinates::Vector3;
use std::f64::consts::PI;

/// Meridians and parallels of a sphere, stored row by row: `rows[i][j]` is the vertex on the
/// (i+1)-th latitude band and the j-th longitude division. The poles are never included, they
/// would collapse every meridian into a single point.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereGrid {
    pub rows: Vec<Vec<Vector3>>,
}

impl SphereGrid {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    /// the vertices of one meridian, south to north, drawn as an open strip
    pub fn column(&self, j: usize) -> Vec<Vector3> {
        self.rows.iter().map(|row| row[j]).collect()
    }

    /// the vertices of one parallel, drawn as a closed loop
    pub fn row(&self, i: usize) -> &[Vector3] {
        &self.rows[i]
    }
}

fn spherical_to_cartesian(radius: f64, theta: f64, phi: f64) -> Vector3 {
    Vector3::new(
        radius * theta.cos() * phi.cos(),
        radius * theta.cos() * phi.sin(),
        radius * theta.sin(),
    )
}

/// builds the reference grid: `latitude_bands - 1` rows (bands 1..latitude_bands) and
/// `longitude_divisions` columns
pub fn generate_grid(radius: f64, latitude_bands: usize, longitude_divisions: usize) -> SphereGrid {
    let mut rows = vec![vec![Vector3::zeros(); longitude_divisions]; latitude_bands.saturating_sub(1)];
    for j in 0..longitude_divisions {
        let phi = (j as f64 / longitude_divisions as f64) * 2.0 * PI;
        for i in 1..latitude_bands {
            let theta = (i as f64 / latitude_bands as f64) * PI - PI / 2.0;
            rows[i - 1][j] = spherical_to_cartesian(radius, theta, phi);
        }
    }
    SphereGrid { rows }
}

/// fewest sides that still enclose an area
pub const MIN_GROUND_SIDES: usize = 3;

/// The ground disc as a triangle fan in the horizon frame (y up): a center `depth` below the
/// horizon followed by `sides + 1` perimeter points, the last one repeating the first to close
/// the fan. Fewer than `MIN_GROUND_SIDES` sides are raised to that minimum.
pub fn generate_ground_vertices(radius: f64, sides: usize, depth: f64) -> Vec<Vector3> {
    let sides = sides.max(MIN_GROUND_SIDES);
    let angle = 2.0 * PI / sides as f64;
    let mut vertices = Vec::with_capacity(sides + 2);
    vertices.push(Vector3::new(0.0, -depth, 0.0));
    for i in 0..=sides {
        let (sin, cos) = (i as f64 * angle).sin_cos();
        vertices.push(Vector3::new(radius * cos, 0.0, radius * sin));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_grid_excludes_poles() {
        let grid = generate_grid(1.0, 15, 25);
        assert_eq!(grid.row_count(), 14);
        assert_eq!(grid.column_count(), 25);
        for row in &grid.rows {
            assert_eq!(row.len(), 25);
            for v in row {
                assert!(v.z.abs() < 1.0);
                assert_abs_diff_eq!(v.norm(), 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_grid_rows_are_parallels() {
        let grid = generate_grid(2.0, 4, 8);
        // band 2 of 4 is the equator
        for v in grid.row(1) {
            assert_abs_diff_eq!(v.z, 0.0, epsilon = 1e-12);
        }
        let meridian = grid.column(2);
        assert_eq!(meridian.len(), 3);
        for v in &meridian {
            // phi = pi/2 puts the whole meridian in the y-z plane
            assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-12);
        }
        assert!(meridian[0].z < meridian[1].z && meridian[1].z < meridian[2].z);
    }

    #[test]
    fn test_ground_fan_closes() {
        let ground = generate_ground_vertices(1.0, 25, 0.5);
        assert_eq!(ground.len(), 27);
        assert_eq!(ground[0], Vector3::new(0.0, -0.5, 0.0));
        assert_abs_diff_eq!((ground[1] - ground[26]).norm(), 0.0, epsilon = 1e-12);
        for v in &ground[1..] {
            assert_abs_diff_eq!(v.y, 0.0);
            assert_abs_diff_eq!(v.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_ground_with_too_few_sides_is_a_triangle() {
        for sides in 0..MIN_GROUND_SIDES {
            let ground = generate_ground_vertices(1.0, sides, 0.5);
            assert_eq!(ground.len(), MIN_GROUND_SIDES + 2);
            assert!(ground.iter().all(|v| v.iter().all(|c| c.is_finite())));
        }
    }
}
