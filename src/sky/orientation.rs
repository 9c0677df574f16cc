use crate::config::ViewConfig;
use crate::coordinates::Vector3;
use nalgebra::{Perspective3, Rotation3, Unit};
use std::fmt;

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);
pub const FOV_RANGE: (f64, f64) = (10.0, 90.0);
/// exclusive on both ends, values outside are dropped rather than clamped
pub const HEAD_LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const HEAD_LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

fn clamp(value: f64, (min, max): (f64, f64)) -> f64 {
    value.clamp(min, max)
}

/// folds `value` into [min, max), so 190 in (-180, 180) becomes -170
fn wrap(value: f64, (min, max): (f64, f64)) -> f64 {
    (value - min).rem_euclid(max - min) + min
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HeadAxis {
    Latitude,
    Longitude,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Unit<Vector3> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

/// one step of the per-frame transform sequence, applied in order on top of the identity
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FrameStep {
    /// post-multiplies the current transform by a rotation of `degrees` about `axis`
    Rotate { degrees: f64, axis: Axis },
    /// draw the ground and the cardinal points with the current transform
    DrawGround,
    /// draw the grid and the stars with the current transform
    DrawSky,
}

impl FrameStep {
    pub fn rotation(degrees: f64, axis: Axis) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&axis.unit(), degrees.to_radians())
    }
}

/// perspective parameters, rebuilt whenever the field of view changes
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub fov_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Projection {
    pub fn perspective(&self) -> Perspective3<f64> {
        Perspective3::new(self.aspect, self.fov_deg.to_radians(), self.near, self.far)
    }
}

pub type HeadListener = Box<dyn FnMut(HeadAxis, f64)>;

/// The observer's camera: where on earth they stand (latitude, longitude), how far they see
/// (field of view) and where they look (head latitude, head longitude).
///
/// Every setter applies its own boundary rule to the single value it receives. Only the head
/// angles notify listeners, since they are the ones a mouse drag changes behind the back of
/// the host's controls.
pub struct ViewOrientation {
    latitude: f64,
    longitude: f64,
    field_of_view: f64,
    head_latitude: f64,
    head_longitude: f64,
    projection: Projection,
    listeners: Vec<HeadListener>,
    /// set while a value coming from the host is being applied, no notifications go out
    applying: bool,
}

impl fmt::Debug for ViewOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewOrientation")
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("field_of_view", &self.field_of_view)
            .field("head_latitude", &self.head_latitude)
            .field("head_longitude", &self.head_longitude)
            .field("projection", &self.projection)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for ViewOrientation {
    fn default() -> Self {
        ViewOrientation::new(&ViewConfig::default())
    }
}

impl ViewOrientation {
    pub fn new(config: &ViewConfig) -> ViewOrientation {
        let mut orientation = ViewOrientation {
            latitude: 0.0,
            longitude: 0.0,
            field_of_view: config.field_of_view,
            head_latitude: 0.0,
            head_longitude: 0.0,
            projection: Projection {
                fov_deg: config.field_of_view,
                aspect: config.aspect_ratio,
                near: config.near,
                far: config.far,
            },
            listeners: vec![],
            applying: false,
        };
        orientation.set_latitude(config.latitude);
        orientation.set_longitude(config.longitude);
        orientation.set_field_of_view(config.field_of_view);
        orientation.set_head_latitude(config.head_latitude);
        orientation.set_head_longitude(config.head_longitude);
        orientation
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn head_latitude(&self) -> f64 {
        self.head_latitude
    }

    pub fn head_longitude(&self) -> f64 {
        self.head_longitude
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// registers a callback for head angle changes
    pub fn subscribe(&mut self, listener: HeadListener) {
        self.listeners.push(listener);
    }

    pub fn set_latitude(&mut self, value: f64) {
        self.latitude = clamp(value, LATITUDE_RANGE);
    }

    pub fn set_longitude(&mut self, value: f64) {
        self.longitude = wrap(value, LONGITUDE_RANGE);
    }

    pub fn set_field_of_view(&mut self, value: f64) {
        self.field_of_view = clamp(value, FOV_RANGE);
        self.projection.fov_deg = self.field_of_view;
    }

    /// returns false and leaves everything untouched when `value` is not strictly inside
    /// (-90, 90)
    pub fn set_head_latitude(&mut self, value: f64) -> bool {
        let (min, max) = HEAD_LATITUDE_RANGE;
        if !(min < value && value < max) {
            log::debug!("ignoring head latitude {}", value);
            return false;
        }
        self.head_latitude = value;
        self.notify(HeadAxis::Latitude, value);
        true
    }

    pub fn set_head_longitude(&mut self, value: f64) {
        self.head_longitude = wrap(value, HEAD_LONGITUDE_RANGE);
        self.notify(HeadAxis::Longitude, self.head_longitude);
    }

    /// applies a head angle that came from the host's own control, such as a slider, without
    /// echoing it back to the listeners
    pub fn apply_external(&mut self, axis: HeadAxis, value: f64) {
        self.applying = true;
        match axis {
            HeadAxis::Latitude => {
                self.set_head_latitude(value);
            }
            HeadAxis::Longitude => self.set_head_longitude(value),
        }
        self.applying = false;
    }

    /// turns the head by a mouse drag of (dx, dy) pixels
    pub fn drag_head(&mut self, dx: f64, dy: f64, sensitivity: f64) {
        self.set_head_longitude(self.head_longitude + dx * sensitivity);
        self.set_head_latitude(self.head_latitude + dy * sensitivity);
    }

    fn notify(&mut self, axis: HeadAxis, value: f64) {
        if self.applying {
            return;
        }
        self.applying = true;
        for listener in self.listeners.iter_mut() {
            listener(axis, value);
        }
        self.applying = false;
    }

    /// The transform sequence of one frame. Rotations do not commute, so the order matters:
    /// the head turns the gaze before the ground is placed, then the sky is turned opposite to
    /// the observer's latitude and longitude.
    pub fn frame_steps(&self) -> Vec<FrameStep> {
        use Axis::*;
        use FrameStep::*;
        vec![
            // equator-relative reference frame
            Rotate { degrees: -90.0, axis: Y },
            Rotate { degrees: -90.0, axis: Z },
            Rotate { degrees: self.head_latitude, axis: Z },
            Rotate { degrees: self.head_longitude, axis: X },
            // ground geometry is built with y up
            Rotate { degrees: 90.0, axis: Z },
            DrawGround,
            Rotate { degrees: -90.0, axis: Z },
            Rotate { degrees: -self.latitude, axis: Y },
            Rotate { degrees: -self.longitude, axis: Z },
            DrawSky,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(view: &mut ViewOrientation) -> Rc<RefCell<Vec<(HeadAxis, f64)>>> {
        let events: Rc<RefCell<Vec<(HeadAxis, f64)>>> = Rc::new(RefCell::new(vec![]));
        let sink = Rc::clone(&events);
        view.subscribe(Box::new(move |axis: HeadAxis, value: f64| {
            sink.borrow_mut().push((axis, value))
        }));
        events
    }

    #[test]
    fn test_defaults() {
        let view = ViewOrientation::default();
        assert_eq!(view.latitude(), 57.0);
        assert_eq!(view.longitude(), 61.0);
        assert_eq!(view.field_of_view(), 45.0);
        assert_eq!(view.head_latitude(), 0.0);
        assert_eq!(view.head_longitude(), 0.0);
        assert_eq!(view.projection().aspect, 1.8);
    }

    #[test]
    fn test_longitude_wraps_latitude_clamps() {
        let mut view = ViewOrientation::default();
        view.set_longitude(190.0);
        assert_eq!(view.longitude(), -170.0);
        view.set_longitude(-190.0);
        assert_eq!(view.longitude(), 170.0);
        view.set_latitude(190.0);
        assert_eq!(view.latitude(), 90.0);
        view.set_latitude(-91.0);
        assert_eq!(view.latitude(), -90.0);
    }

    #[test]
    fn test_field_of_view_updates_projection() {
        let mut view = ViewOrientation::default();
        view.set_field_of_view(5.0);
        assert_eq!(view.field_of_view(), 10.0);
        assert_eq!(view.projection().fov_deg, 10.0);
        view.set_field_of_view(60.0);
        assert_eq!(view.projection().fov_deg, 60.0);
        let p = view.projection().perspective();
        assert!((p.fovy() - 60f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_head_latitude_boundaries_are_dropped() {
        let mut view = ViewOrientation::default();
        let events = recorder(&mut view);
        assert!(view.set_head_latitude(30.0));
        assert!(!view.set_head_latitude(90.0));
        assert!(!view.set_head_latitude(-120.0));
        assert_eq!(view.head_latitude(), 30.0);
        assert_eq!(*events.borrow(), vec![(HeadAxis::Latitude, 30.0)]);
    }

    #[test]
    fn test_head_longitude_wraps_and_notifies() {
        let mut view = ViewOrientation::default();
        let events = recorder(&mut view);
        view.set_head_longitude(200.0);
        assert_eq!(view.head_longitude(), -160.0);
        assert_eq!(*events.borrow(), vec![(HeadAxis::Longitude, -160.0)]);
    }

    #[test]
    fn test_scene_setters_do_not_notify() {
        let mut view = ViewOrientation::default();
        let events = recorder(&mut view);
        view.set_latitude(10.0);
        view.set_longitude(10.0);
        view.set_field_of_view(30.0);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_external_values_are_not_echoed() {
        let mut view = ViewOrientation::default();
        let events = recorder(&mut view);
        view.apply_external(HeadAxis::Longitude, 45.0);
        view.apply_external(HeadAxis::Latitude, -20.0);
        assert_eq!(view.head_longitude(), 45.0);
        assert_eq!(view.head_latitude(), -20.0);
        assert!(events.borrow().is_empty());
        // later mouse input notifies again
        view.drag_head(10.0, 0.0, 0.5);
        assert_eq!(*events.borrow(), vec![(HeadAxis::Longitude, 50.0), (HeadAxis::Latitude, -20.0)]);
    }

    #[test]
    fn test_drag_past_zenith_keeps_latitude() {
        let mut view = ViewOrientation::default();
        view.set_head_latitude(85.0);
        view.drag_head(0.0, 200.0, 0.057);
        assert_eq!(view.head_latitude(), 85.0);
    }

    #[test]
    fn test_frame_steps_order() {
        let mut view = ViewOrientation::default();
        view.set_head_latitude(12.0);
        view.set_head_longitude(34.0);
        let steps = view.frame_steps();
        let ground = steps.iter().position(|s| *s == FrameStep::DrawGround).unwrap();
        let sky = steps.iter().position(|s| *s == FrameStep::DrawSky).unwrap();
        assert!(ground < sky);
        assert_eq!(steps[2], FrameStep::Rotate { degrees: 12.0, axis: Axis::Z });
        assert_eq!(steps[3], FrameStep::Rotate { degrees: 34.0, axis: Axis::X });
        assert_eq!(steps[sky - 2], FrameStep::Rotate { degrees: -57.0, axis: Axis::Y });
        assert_eq!(steps[sky - 1], FrameStep::Rotate { degrees: -61.0, axis: Axis::Z });
    }
}
