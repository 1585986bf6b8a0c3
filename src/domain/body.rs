use crate::core::{polygon_centroid, rotate_polygon, translate_polygon, RgbColor, Vec2};

use super::mass::Mass;

/// Stable handle to a body inside a scene.
///
/// Ids are handed out by the scene on `add_body`, start at 1 and are never
/// reused, so a stale id simply stops resolving once its body is purged.
/// A scene can hand out `u32::MAX - 1` ids; asking for more panics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u32);

impl BodyId {
    /// Id of a body that has not been added to a scene yet.
    pub const UNASSIGNED: BodyId = BodyId(0);

    pub const fn from_raw(raw: u32) -> Self {
        BodyId(raw)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Take the id in `counter` and advance it.
    pub(crate) fn allocate(counter: &mut u32) -> BodyId {
        let id = BodyId(*counter);
        *counter = match counter.checked_add(1) {
            Some(next) => next,
            None => panic!("body id space exhausted"),
        };
        id
    }
}

/// Rigid polygon - moves and spins as a unit
///
/// The shape is stored in world coordinates and is translated/rotated in
/// place, so `shape()` can be drawn and collided directly.
///
/// `T` is an opaque classification slot for game code ("wall", "ball", ...).
/// The engine never looks at it; it is dropped together with the body.
#[derive(Clone, Debug)]
pub struct Body<T = ()> {
    id: BodyId,

    // === Geometry ===
    shape: Vec<Vec2>,
    centroid: Vec2,
    /// Accumulated rotation (radians)
    orientation: f64,

    // === Physics State ===
    mass: Mass,
    velocity: Vec2,
    /// Cosmetic spin rate (radians per second), not torque-driven
    angular_velocity: f64,

    // === Per-tick accumulators, cleared by integrate() ===
    force: Vec2,
    impulse: Vec2,

    color: RgbColor,
    tag: T,
    removed: bool,
}

impl Body<()> {
    /// Create an untagged body.
    pub fn new(shape: Vec<Vec2>, mass: impl Into<Mass>, color: RgbColor) -> Self {
        Body::with_tag(shape, mass, color, ())
    }
}

impl<T> Body<T> {
    /// Create a body carrying a classification tag.
    ///
    /// Panics if the shape has fewer than 3 vertices, a vertex is not finite,
    /// or the mass is not strictly positive (or infinite).
    pub fn with_tag(shape: Vec<Vec2>, mass: impl Into<Mass>, color: RgbColor, tag: T) -> Self {
        assert!(
            shape.len() >= 3,
            "body shape needs at least 3 vertices, got {}",
            shape.len()
        );
        assert!(
            shape.iter().all(Vec2::is_finite),
            "body shape has non-finite vertices"
        );
        let mass = mass.into();
        assert!(mass.is_valid(), "body mass must be > 0 or infinite, got {mass:?}");
        let centroid = polygon_centroid(&shape);

        Self {
            id: BodyId::UNASSIGNED,
            shape,
            centroid,
            orientation: 0.0,
            mass,
            velocity: Vec2::zero(),
            angular_velocity: 0.0,
            force: Vec2::zero(),
            impulse: Vec2::zero(),
            color,
            tag,
            removed: false,
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: BodyId) {
        self.id = id;
    }

    // === Getters ===

    /// Current world-space vertices
    pub fn shape(&self) -> &[Vec2] {
        &self.shape
    }

    pub fn mass(&self) -> Mass {
        self.mass
    }

    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn color(&self) -> RgbColor {
        self.color
    }

    pub fn tag(&self) -> &T {
        &self.tag
    }

    pub fn tag_mut(&mut self) -> &mut T {
        &mut self.tag
    }

    /// Force accumulated so far this tick
    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// Impulse accumulated so far this tick
    pub fn impulse(&self) -> Vec2 {
        self.impulse
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    // === Setters ===

    /// Move the body so its centroid lands on `centroid` (translates all vertices).
    pub fn set_centroid(&mut self, centroid: Vec2) {
        caller_contract!(!self.removed, "set_centroid on a removed body" => return);
        translate_polygon(&mut self.shape, centroid - self.centroid);
        self.centroid = centroid;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        caller_contract!(!self.removed, "set_velocity on a removed body" => return);
        self.velocity = velocity;
    }

    /// Rotate the shape about its centroid so that its orientation becomes `angle`.
    pub fn set_orientation(&mut self, angle: f64) {
        caller_contract!(!self.removed, "set_orientation on a removed body" => return);
        rotate_polygon(&mut self.shape, angle - self.orientation, self.centroid);
        self.orientation = angle;
    }

    pub fn set_angular_velocity(&mut self, rate: f64) {
        caller_contract!(!self.removed, "set_angular_velocity on a removed body" => return);
        self.angular_velocity = rate;
    }

    pub fn set_color(&mut self, color: RgbColor) {
        self.color = color;
    }

    // === Accumulation ===

    /// Queue a force for this tick. Applied by `integrate`, scaled by dt/m.
    pub fn add_force(&mut self, force: Vec2) {
        caller_contract!(!self.removed, "add_force on a removed body" => return);
        self.force += force;
    }

    /// Queue an impulse for this tick. Applied by `integrate`, scaled by 1/m.
    pub fn add_impulse(&mut self, impulse: Vec2) {
        caller_contract!(!self.removed, "add_impulse on a removed body" => return);
        self.impulse += impulse;
    }

    /// Tombstone the body. The owning scene drops it during its next cleanup.
    pub fn mark_removed(&mut self) {
        self.removed = true;
    }

    /// Advance one tick:
    /// 1. fold accumulators into velocity
    /// 2. translate by velocity * dt
    /// 3. spin about the centroid (cosmetic)
    /// 4. clear accumulators
    ///
    /// Runs even when the body was tombstoned earlier in the same tick; the
    /// scene gives such bodies one last integration before purging them.
    pub fn integrate(&mut self, dt: f64) {
        let inv_mass = self.mass.inverse();
        self.velocity += self.force * (inv_mass * dt) + self.impulse * inv_mass;

        let translation = self.velocity * dt;
        translate_polygon(&mut self.shape, translation);
        self.centroid += translation;

        if self.angular_velocity != 0.0 {
            let delta = self.angular_velocity * dt;
            rotate_polygon(&mut self.shape, delta, self.centroid);
            self.orientation += delta;
        }

        self.force = Vec2::zero();
        self.impulse = Vec2::zero();
    }
}
