use log::debug;
use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Half size of every body's square hitbox, in cell units.
/// Kept under 0.5 so bodies in neighbouring cells never touch.
pub const BODY_HALF_EXTENT: f32 = 0.45;

/// Stable handle to a collider in a `CollisionWorld`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColliderHandle(pub usize);

/// Bit set of collision layers a query should consider
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Walls and actors: everything that stops movement
    pub const BLOCKING: LayerMask = LayerMask(1 << 0);
    /// Trigger volumes: food, soda, exit
    pub const ITEMS: LayerMask = LayerMask(1 << 1);

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Food,
    Soda,
    Exit,
}

/// What a collider belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Board edge: blocks movement, nothing can interact with it
    OuterWall,
    /// Breakable wall, see `Collider::hit_points`
    Wall,
    Player,
    Enemy,
    Pickup(PickupKind),
}

impl BodyKind {
    /// Layer a body of this kind lives on
    pub fn layer(self) -> LayerMask {
        match self {
            BodyKind::Pickup(_) => LayerMask::ITEMS,
            _ => LayerMask::BLOCKING,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Collider {
    pub handle: ColliderHandle,
    pub kind: BodyKind,
    pub layer: LayerMask,
    pub center: Position,
    pub half_extents: Position,
    /// Excluded from queries while false (an actor probing from inside itself)
    pub enabled: bool,
    /// False once the owning object is gone from the level
    pub active: bool,
    /// Remaining damage a wall can take; unused for other kinds
    pub hit_points: i32,
}

impl Collider {
    fn queryable(&self, mask: LayerMask) -> bool {
        self.enabled && self.active && self.layer.intersects(mask)
    }

    fn overlaps(&self, other: &Collider) -> bool {
        (self.center.x - other.center.x).abs() < self.half_extents.x + other.half_extents.x
            && (self.center.y - other.center.y).abs() < self.half_extents.y + other.half_extents.y
    }
}

/// First collider struck by a linecast
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub handle: ColliderHandle,
    pub kind: BodyKind,
    /// Where the segment entered the collider
    pub point: Position,
    /// Distance along the segment, 0 at start and 1 at end
    pub fraction: f32,
}

/// The physics surface the movement core depends on.
pub trait CollisionQuery {
    /// Nearest collider on `mask` crossed by the segment `start -> end`
    fn linecast(&self, start: Position, end: Position, mask: LayerMask) -> Option<Hit>;

    fn set_enabled(&mut self, handle: ColliderHandle, enabled: bool);

    fn set_position(&mut self, handle: ColliderHandle, position: Position);
}

/// Flat list of axis-aligned box colliders for one level
#[derive(Clone, Debug, Default)]
pub struct CollisionWorld {
    colliders: Vec<Collider>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        CollisionWorld {
            colliders: Vec::new(),
        }
    }

    /// Add a body centered at `center` with the default hitbox
    pub fn spawn(&mut self, kind: BodyKind, center: Position) -> ColliderHandle {
        let handle = ColliderHandle(self.colliders.len());
        self.colliders.push(Collider {
            handle,
            kind,
            layer: kind.layer(),
            center,
            half_extents: Position::new(BODY_HALF_EXTENT, BODY_HALF_EXTENT),
            enabled: true,
            active: true,
            hit_points: 0,
        });
        handle
    }

    pub fn spawn_wall(&mut self, center: Position, hit_points: i32) -> ColliderHandle {
        let handle = self.spawn(BodyKind::Wall, center);
        self.colliders[handle.0].hit_points = hit_points;
        handle
    }

    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle.0)
    }

    pub fn colliders(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.iter()
    }

    pub fn is_active(&self, handle: ColliderHandle) -> bool {
        self.get(handle).is_some_and(|c| c.active)
    }

    /// Remove an object from play. Its handle stays valid but is never hit again.
    pub fn deactivate(&mut self, handle: ColliderHandle) {
        if let Some(collider) = self.colliders.get_mut(handle.0) {
            collider.active = false;
        }
    }

    /// Chip `loss` hit points off a wall, removing it at zero.
    /// Returns the remaining hit points, or None if `handle` is not a live wall.
    pub fn damage_wall(&mut self, handle: ColliderHandle, loss: i32) -> Option<i32> {
        let collider = self.colliders.get_mut(handle.0)?;
        if collider.kind != BodyKind::Wall || !collider.active {
            return None;
        }
        collider.hit_points -= loss;
        if collider.hit_points <= 0 {
            collider.active = false;
            debug!("wall {} destroyed", handle.0);
        }
        Some(collider.hit_points)
    }

    /// Colliders on `mask` whose boxes overlap the box of `handle`
    pub fn overlapping(&self, handle: ColliderHandle, mask: LayerMask) -> Vec<(ColliderHandle, BodyKind)> {
        let Some(subject) = self.get(handle) else {
            return Vec::new();
        };
        self.colliders
            .iter()
            .filter(|c| c.handle != handle && c.queryable(mask) && c.overlaps(subject))
            .map(|c| (c.handle, c.kind))
            .collect()
    }
}

impl CollisionQuery for CollisionWorld {
    fn linecast(&self, start: Position, end: Position, mask: LayerMask) -> Option<Hit> {
        let mut nearest: Option<Hit> = None;
        for collider in self.colliders.iter().filter(|c| c.queryable(mask)) {
            let Some(fraction) = segment_enters_box(start, end, collider.center, collider.half_extents) else {
                continue;
            };
            if nearest.map_or(true, |hit| fraction < hit.fraction) {
                let dir = end - start;
                nearest = Some(Hit {
                    handle: collider.handle,
                    kind: collider.kind,
                    point: Position::new(start.x + dir.x * fraction, start.y + dir.y * fraction),
                    fraction,
                });
            }
        }
        nearest
    }

    fn set_enabled(&mut self, handle: ColliderHandle, enabled: bool) {
        if let Some(collider) = self.colliders.get_mut(handle.0) {
            collider.enabled = enabled;
        }
    }

    fn set_position(&mut self, handle: ColliderHandle, position: Position) {
        if let Some(collider) = self.colliders.get_mut(handle.0) {
            collider.center = position;
        }
    }
}

/// Slab test: fraction along `start -> end` where the segment first touches the box.
/// A segment starting inside the box hits at fraction 0.
fn segment_enters_box(start: Position, end: Position, center: Position, half: Position) -> Option<f32> {
    let dir = end - start;
    let mut t_min = 0.0f32;
    let mut t_max = 1.0f32;

    let axes = [
        (start.x, dir.x, center.x, half.x),
        (start.y, dir.y, center.y, half.y),
    ];
    for (origin, delta, mid, extent) in axes {
        let lo = mid - extent;
        let hi = mid + extent;
        if delta.abs() < f32::EPSILON {
            // Parallel to this slab
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }
        let inv = 1.0 / delta;
        let mut t1 = (lo - origin) * inv;
        let mut t2 = (hi - origin) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}
