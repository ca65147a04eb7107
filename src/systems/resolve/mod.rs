//! Pairwise Resolver - separate two overlapping bodies
//!
//! The contact axis comes from last frame's positions: boxes that already
//! overlapped on X must have met vertically, otherwise horizontally. The
//! yielding side is decided once per call from the collision classes.

mod separate;

use std::cell::Cell;

use crate::core::grid::TileGrid;
use crate::domain::collides::{CheckGroup, CollisionClass, GROUP_NONE};
use crate::systems::kinetic::KineticBody;
use crate::systems::trace::TraceStats;

use separate::{separate_on_x, separate_on_y, Role};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// Who moves in a resolved pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionKind {
    /// Normal collision, momentum is exchanged
    BothMove,
    /// One side yields and takes on the other's velocity
    WeakYields(Side),
    /// Two fixed bodies: nothing moves
    Immovable,
}

impl ResolutionKind {
    pub fn classify(a: CollisionClass, b: CollisionClass) -> Self {
        use CollisionClass::{Fixed, Lite};

        if a == Fixed && b == Fixed {
            ResolutionKind::Immovable
        } else if a == Lite || b == Fixed {
            ResolutionKind::WeakYields(Side::A)
        } else if b == Lite || a == Fixed {
            ResolutionKind::WeakYields(Side::B)
        } else {
            ResolutionKind::BothMove
        }
    }

    /// Role for an ordered (first, second) pair where `a_first` says whether
    /// body A is the first (top/left) one
    fn role(self, a_first: bool) -> Role {
        match self {
            ResolutionKind::BothMove => Role::BothMove,
            ResolutionKind::Immovable => Role::Immovable,
            ResolutionKind::WeakYields(side) => {
                if (side == Side::A) == a_first {
                    Role::FirstYields
                } else {
                    Role::SecondYields
                }
            }
        }
    }
}

/// Something the resolver can push around, with optional hooks
pub trait Collidable {
    fn body(&self) -> &KineticBody;
    fn body_mut(&mut self) -> &mut KineticBody;

    /// Groups this body belongs to
    fn group(&self) -> CheckGroup {
        GROUP_NONE
    }

    /// Groups whose members trigger `check` on this body
    fn check_against(&self) -> CheckGroup {
        GROUP_NONE
    }

    /// Overlap with a body from a group in `check_against`
    fn check(&mut self, _other: &KineticBody) {}

    /// Called after a resolved collision, with the contact axis
    fn collide_with(&mut self, _other: &KineticBody, _axis: Axis) {}
}

impl Collidable for KineticBody {
    fn body(&self) -> &KineticBody {
        self
    }

    fn body_mut(&mut self) -> &mut KineticBody {
        self
    }
}

/// World state the resolver needs for re-tracing nudged bodies
pub struct ResolveContext<'a> {
    pub grid: &'a TileGrid,
    pub gravity: f32,
    pub tick: f32,
    traced: Cell<TraceStats>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(grid: &'a TileGrid, gravity: f32, tick: f32) -> Self {
        Self { grid, gravity, tick, traced: Cell::new(TraceStats::default()) }
    }

    /// Traces run by nudges through this context so far
    pub fn trace_stats(&self) -> TraceStats {
        self.traced.get()
    }

    fn record_trace(&self, stats: TraceStats) {
        self.traced.set(self.traced.get().merge(stats));
    }
}

/// AABB predicate the broad phase uses to find candidate pairs
#[inline]
pub fn touches(a: &KineticBody, b: &KineticBody) -> bool {
    a.touches(b)
}

/// Axis of contact from last frame's positions, if any
pub fn contact_axis(a: &KineticBody, b: &KineticBody) -> Option<Axis> {
    if a.last_pos.x + a.size.x > b.last_pos.x && a.last_pos.x < b.last_pos.x + b.size.x {
        Some(Axis::Y)
    } else if a.last_pos.y + a.size.y > b.last_pos.y && a.last_pos.y < b.last_pos.y + b.size.y {
        Some(Axis::X)
    } else {
        None
    }
}

/// Run group checks, then resolve if the classes allow it.
///
/// Returns the contact axis when the pair was resolved.
pub fn check_pair<A, B>(a: &mut A, b: &mut B, ctx: &ResolveContext<'_>) -> Option<Axis>
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    if a.check_against() & b.group() != 0 {
        a.check(b.body());
    }
    if b.check_against() & a.group() != 0 {
        b.check(a.body());
    }
    resolve(a, b, ctx)
}

/// Separate two touching bodies and fire both collide hooks (a, then b).
///
/// Does nothing for pairs whose classes don't resolve (any `Never`, or no
/// `Active`/`Fixed` side). Returns the contact axis when resolved.
pub fn resolve<A, B>(a: &mut A, b: &mut B, ctx: &ResolveContext<'_>) -> Option<Axis>
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    let (class_a, class_b) = (a.body().collision_class, b.body().collision_class);
    if !CollisionClass::pair_resolves(class_a, class_b) {
        return None;
    }

    let kind = ResolutionKind::classify(class_a, class_b);
    let axis = contact_axis(a.body(), b.body())?;

    {
        let body_a = a.body_mut();
        let body_b = b.body_mut();
        match axis {
            Axis::Y => {
                if body_a.last_pos.y < body_b.last_pos.y {
                    separate_on_y(body_a, body_b, kind.role(true), ctx);
                } else {
                    separate_on_y(body_b, body_a, kind.role(false), ctx);
                }
            }
            Axis::X => {
                if body_a.last_pos.x < body_b.last_pos.x {
                    separate_on_x(body_a, body_b, kind.role(true), ctx);
                } else {
                    separate_on_x(body_b, body_a, kind.role(false), ctx);
                }
            }
        }
    }

    a.collide_with(b.body(), axis);
    b.collide_with(a.body(), axis);
    Some(axis)
}
