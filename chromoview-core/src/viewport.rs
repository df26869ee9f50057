//! Bridge between a pan/zoom viewport controller and the persisted transform
//!
//! The controller owns the live camera while the user interacts with it. The
//! bridge seeds it from the last persisted [`Transform`], reports each update
//! as a `set-transform` action, and runs the one-shot relayout nudge.

use crate::state::ViewerAction;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Zoom delta of the relayout nudge.
pub const NUDGE_ZOOM: f64 = 0.1;
/// Delay before the nudge is reversed.
pub const NUDGE_DELAY: Duration = Duration::from_millis(1000);

/// Camera pose: focal point and zoom factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub dx: f64,
    pub dy: f64,
    #[serde(rename = "dZoom")]
    pub zoom: f64,
}

impl Transform {
    pub fn new(dx: f64, dy: f64, zoom: f64) -> Self {
        Self { dx, dy, zoom }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// Pan and zoom limits registered with the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub zoom: (f64, f64),
}

impl Default for ViewportBounds {
    fn default() -> Self {
        Self {
            x: (-650.0, 1300.0),
            y: (-450.0, 815.0),
            zoom: (0.05, 1000.0 - 0.3),
        }
    }
}

impl ViewportBounds {
    pub fn clamp(&self, transform: Transform) -> Transform {
        Transform {
            dx: transform.dx.clamp(self.x.0, self.x.1),
            dy: transform.dy.clamp(self.y.0, self.y.1),
            zoom: transform.zoom.clamp(self.zoom.0, self.zoom.1),
        }
    }
}

/// The pan/zoom camera driven by the bridge.
pub trait ViewportController {
    fn recenter(&mut self, x: f64, y: f64, zoom: f64);
    fn set_bounds(&mut self, bounds: &ViewportBounds);
    fn move_by(&mut self, dx: f64, dy: f64, dzoom: f64);
    fn center_x(&self) -> f64;
    fn center_y(&self) -> f64;
    fn zoom_factor(&self) -> f64;

    /// Ask the rendering surface to recompute layout directly. Returns
    /// `false` when the surface has no such primitive.
    fn request_relayout(&mut self) -> bool {
        false
    }

    fn transform(&self) -> Transform {
        Transform::new(self.center_x(), self.center_y(), self.zoom_factor())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Nudge {
    NotStarted,
    Pending {
        deadline: Instant,
        before: Transform,
        after: Transform,
    },
    Settled,
}

/// Outcome of [`TransformBridge::begin_nudge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeStart {
    /// The surface relaid out on request; no camera motion needed
    Relayout,
    /// Forward move issued, reverse move scheduled
    Scheduled,
    /// A nudge already ran or is running
    AlreadyRan,
}

#[derive(Debug)]
pub struct TransformBridge {
    bounds: ViewportBounds,
    nudge: Nudge,
}

impl Default for TransformBridge {
    fn default() -> Self {
        Self::new(ViewportBounds::default())
    }
}

impl TransformBridge {
    pub fn new(bounds: ViewportBounds) -> Self {
        Self {
            bounds,
            nudge: Nudge::NotStarted,
        }
    }

    pub fn bounds(&self) -> &ViewportBounds {
        &self.bounds
    }

    /// Seed the camera from the persisted transform and register the bounds.
    pub fn on_create<V: ViewportController + ?Sized>(&mut self, viewport: &mut V, persisted: &Transform) {
        viewport.recenter(persisted.dx, persisted.dy, persisted.zoom);
        viewport.set_bounds(&self.bounds);
        log::debug!(
            "viewport seeded at ({:.1}, {:.1}) zoom {:.3}",
            persisted.dx,
            persisted.dy,
            persisted.zoom
        );
    }

    /// Report the controller's current pose upward.
    pub fn on_updated<V: ViewportController + ?Sized>(&self, viewport: &V) -> ViewerAction {
        ViewerAction::SetTransform {
            transform: viewport.transform(),
        }
    }

    /// Start the post-mount relayout nudge.
    ///
    /// Freshly mounted annotation overlays are not sized until the rendering
    /// surface lays out again. Surfaces with an explicit relayout primitive
    /// get that call; others get a negligible zoom forward now and the exact
    /// reverse after [`NUDGE_DELAY`].
    pub fn begin_nudge<V: ViewportController + ?Sized>(&mut self, viewport: &mut V, now: Instant) -> NudgeStart {
        if self.nudge != Nudge::NotStarted {
            return NudgeStart::AlreadyRan;
        }
        if viewport.request_relayout() {
            self.nudge = Nudge::Settled;
            return NudgeStart::Relayout;
        }

        let before = viewport.transform();
        viewport.move_by(0.0, 0.0, NUDGE_ZOOM);
        let after = viewport.transform();
        self.nudge = Nudge::Pending {
            deadline: now + NUDGE_DELAY,
            before,
            after,
        };
        NudgeStart::Scheduled
    }

    /// Reverse the nudge once its delay has passed. Returns `true` when the
    /// reverse move was issued by this call.
    ///
    /// If nothing else moved the camera meanwhile, the pre-nudge pose is
    /// restored exactly so the settled transform is numerically unchanged.
    pub fn poll_nudge<V: ViewportController + ?Sized>(&mut self, viewport: &mut V, now: Instant) -> bool {
        let Nudge::Pending { deadline, before, after } = self.nudge else {
            return false;
        };
        if now < deadline {
            return false;
        }

        if viewport.transform() == after {
            viewport.recenter(before.dx, before.dy, before.zoom);
        } else {
            log::debug!("camera moved during nudge, applying inverse move only");
            viewport.move_by(0.0, 0.0, -NUDGE_ZOOM);
        }
        self.nudge = Nudge::Settled;
        true
    }

    /// Drop a pending reverse move (teardown).
    pub fn cancel_nudge(&mut self) {
        if matches!(self.nudge, Nudge::Pending { .. }) {
            self.nudge = Nudge::Settled;
        }
    }

    pub fn is_nudge_pending(&self) -> bool {
        matches!(self.nudge, Nudge::Pending { .. })
    }
}

/// In-memory viewport controller.
///
/// The focal point `(center_x, center_y)` sits at the middle of a container
/// of `container` pixels.
#[derive(Debug, Clone)]
pub struct Camera {
    center_x: f64,
    center_y: f64,
    zoom: f64,
    bounds: Option<ViewportBounds>,
    container: (f64, f64),
    relayout_supported: bool,
    relayouts: usize,
}

impl Camera {
    pub fn new(container_width: f64, container_height: f64) -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            zoom: 1.0,
            bounds: None,
            container: (container_width, container_height),
            relayout_supported: false,
            relayouts: 0,
        }
    }

    pub fn with_relayout_support(mut self) -> Self {
        self.relayout_supported = true;
        self
    }

    pub fn relayout_count(&self) -> usize {
        self.relayouts
    }

    pub fn container(&self) -> (f64, f64) {
        self.container
    }

    pub fn world_to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.center_x) * self.zoom + self.container.0 / 2.0,
            (y - self.center_y) * self.zoom + self.container.1 / 2.0,
        )
    }

    pub fn screen_to_world(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.container.0 / 2.0) / self.zoom + self.center_x,
            (y - self.container.1 / 2.0) / self.zoom + self.center_y,
        )
    }

    fn apply(&mut self, transform: Transform) {
        let transform = match &self.bounds {
            Some(bounds) => bounds.clamp(transform),
            None => transform,
        };
        self.center_x = transform.dx;
        self.center_y = transform.dy;
        self.zoom = transform.zoom;
    }
}

impl ViewportController for Camera {
    fn recenter(&mut self, x: f64, y: f64, zoom: f64) {
        self.apply(Transform::new(x, y, zoom));
    }

    fn set_bounds(&mut self, bounds: &ViewportBounds) {
        self.bounds = Some(*bounds);
        let current = self.transform();
        self.apply(current);
    }

    fn move_by(&mut self, dx: f64, dy: f64, dzoom: f64) {
        self.apply(Transform::new(
            self.center_x + dx,
            self.center_y + dy,
            self.zoom + dzoom,
        ));
    }

    fn center_x(&self) -> f64 {
        self.center_x
    }

    fn center_y(&self) -> f64 {
        self.center_y
    }

    fn zoom_factor(&self) -> f64 {
        self.zoom
    }

    fn request_relayout(&mut self) -> bool {
        if self.relayout_supported {
            self.relayouts += 1;
        }
        self.relayout_supported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(persisted: Transform) -> (TransformBridge, Camera) {
        let mut bridge = TransformBridge::default();
        let mut camera = Camera::new(800.0, 600.0);
        bridge.on_create(&mut camera, &persisted);
        (bridge, camera)
    }

    #[test]
    fn test_on_create_seeds_camera() {
        let (_, camera) = mounted(Transform::new(300.0, 150.0, 0.7));
        assert_eq!(camera.transform(), Transform::new(300.0, 150.0, 0.7));
    }

    #[test]
    fn test_bounds_clamp_seed_and_moves() {
        let (_, mut camera) = mounted(Transform::new(5000.0, -900.0, 0.01));
        assert_eq!(camera.transform(), Transform::new(1300.0, -450.0, 0.05));

        camera.move_by(0.0, 0.0, 5000.0);
        assert_eq!(camera.zoom_factor(), 999.7);
    }

    #[test]
    fn test_on_updated_reports_pose() {
        let (bridge, mut camera) = mounted(Transform::new(300.0, 150.0, 0.7));
        camera.move_by(25.0, -10.0, 0.3);
        assert_eq!(
            bridge.on_updated(&camera),
            ViewerAction::SetTransform {
                transform: Transform::new(325.0, 140.0, 0.7 + 0.3)
            }
        );
    }

    #[test]
    fn test_nudge_settles_to_exact_transform() {
        let persisted = Transform::new(300.0, 150.0, 0.7);
        let (mut bridge, mut camera) = mounted(persisted);
        let t0 = Instant::now();

        assert_eq!(bridge.begin_nudge(&mut camera, t0), NudgeStart::Scheduled);
        assert!(camera.zoom_factor() > 0.7);
        assert!(!bridge.poll_nudge(&mut camera, t0 + Duration::from_millis(999)));
        assert!(bridge.is_nudge_pending());

        assert!(bridge.poll_nudge(&mut camera, t0 + NUDGE_DELAY));
        assert_eq!(camera.transform(), persisted);
        assert!(!bridge.is_nudge_pending());
        assert!(!bridge.poll_nudge(&mut camera, t0 + NUDGE_DELAY * 2));
        assert_eq!(bridge.begin_nudge(&mut camera, t0), NudgeStart::AlreadyRan);
    }

    #[test]
    fn test_nudge_at_zoom_limit() {
        let persisted = Transform::new(0.0, 0.0, 999.7);
        let (mut bridge, mut camera) = mounted(persisted);
        let t0 = Instant::now();
        bridge.begin_nudge(&mut camera, t0);
        bridge.poll_nudge(&mut camera, t0 + NUDGE_DELAY);
        assert_eq!(camera.transform(), persisted);
    }

    #[test]
    fn test_nudge_keeps_user_pan() {
        let (mut bridge, mut camera) = mounted(Transform::new(300.0, 150.0, 0.5));
        let t0 = Instant::now();
        bridge.begin_nudge(&mut camera, t0);
        camera.move_by(40.0, 0.0, 0.0);
        bridge.poll_nudge(&mut camera, t0 + NUDGE_DELAY);

        let settled = camera.transform();
        assert_eq!(settled.dx, 340.0);
        assert!((settled.zoom - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_relayout_primitive_skips_motion() {
        let mut bridge = TransformBridge::default();
        let mut camera = Camera::new(800.0, 600.0).with_relayout_support();
        let persisted = Transform::new(300.0, 150.0, 0.7);
        bridge.on_create(&mut camera, &persisted);

        assert_eq!(bridge.begin_nudge(&mut camera, Instant::now()), NudgeStart::Relayout);
        assert_eq!(camera.relayout_count(), 1);
        assert_eq!(camera.transform(), persisted);
        assert!(!bridge.is_nudge_pending());
    }

    #[test]
    fn test_cancel_drops_reverse_move() {
        let (mut bridge, mut camera) = mounted(Transform::new(300.0, 150.0, 0.7));
        let t0 = Instant::now();
        bridge.begin_nudge(&mut camera, t0);
        let nudged = camera.transform();
        bridge.cancel_nudge();
        assert!(!bridge.poll_nudge(&mut camera, t0 + NUDGE_DELAY));
        assert_eq!(camera.transform(), nudged);
    }

    #[test]
    fn test_world_screen_projection() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.recenter(100.0, 50.0, 2.0);
        assert_eq!(camera.world_to_screen(100.0, 50.0), (400.0, 300.0));
        assert_eq!(camera.world_to_screen(110.0, 60.0), (420.0, 320.0));
        assert_eq!(camera.screen_to_world(420.0, 320.0), (110.0, 60.0));
    }

    #[test]
    fn test_transform_wire_names() {
        let json = serde_json::to_string(&Transform::new(300.0, 150.0, 0.7)).unwrap();
        assert_eq!(json, r#"{"dx":300.0,"dy":150.0,"dZoom":0.7}"#);
    }
}
