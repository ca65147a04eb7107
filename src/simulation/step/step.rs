use std::cell::RefCell;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::grid::TileGrid;
use crate::domain::collides::CheckGroup;
use crate::systems::kinetic::{self, KineticBody};
use crate::systems::resolve::{check_pair, touches, Axis, Collidable, ResolveContext};
use crate::systems::trace::TraceStats;

use super::bodies::BodySlot;
use super::events::{CollisionEvent, EventKind};
use super::perf_timer::{elapsed_ms, PerfTimer};
use super::WorldCore;

#[derive(Default)]
struct PairCounts {
    tested: u32,
    touching: u32,
    resolved: u32,
}

/// A slot taking part in the pair pass; its hooks append to the shared event list
struct Recording<'a> {
    slot: &'a mut BodySlot,
    events: &'a RefCell<Vec<CollisionEvent>>,
}

impl Recording<'_> {
    fn record(&self, other: &KineticBody, kind: EventKind) {
        self.events.borrow_mut().push(CollisionEvent {
            body: self.slot.body.id,
            other: other.id,
            kind,
        });
    }
}

impl Collidable for Recording<'_> {
    fn body(&self) -> &KineticBody {
        &self.slot.body
    }

    fn body_mut(&mut self) -> &mut KineticBody {
        &mut self.slot.body
    }

    fn group(&self) -> CheckGroup {
        self.slot.group
    }

    fn check_against(&self) -> CheckGroup {
        self.slot.check_against
    }

    fn check(&mut self, other: &KineticBody) {
        self.record(other, EventKind::Check);
    }

    fn collide_with(&mut self, other: &KineticBody, axis: Axis) {
        self.record(other, EventKind::collide(axis));
    }
}

pub(super) fn step(world: &mut WorldCore, dt: f32) {
    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
        world.perf_stats.bodies = world.bodies.len() as u32;
    }
    let step_start = PerfTimer::start_if(perf_on);

    world.events.clear();
    let tick = world.settings.tick(dt);

    // === INTEGRATION ===
    // Each body reads only the grid and writes only itself.
    // A zero tick leaves bodies (and their standing flags) untouched.
    let t0 = PerfTimer::start_if(perf_on);
    let integrated = if tick > 0.0 {
        integrate_bodies(&mut world.bodies, &world.grid, tick, world.settings.gravity)
    } else {
        TraceStats::default()
    };
    world.perf_stats.integrate_ms = elapsed_ms(t0);

    // === PAIR PASS ===
    let t0 = PerfTimer::start_if(perf_on);
    let ctx = ResolveContext::new(&world.grid, world.settings.gravity, tick);
    let events = RefCell::new(std::mem::take(&mut world.events));
    let counts = resolve_pairs(&mut world.bodies, &ctx, &events);
    world.events = events.into_inner();
    world.perf_stats.pairs_ms = elapsed_ms(t0);

    if perf_on {
        let traced = integrated.merge(ctx.trace_stats());
        world.perf_stats.pairs_tested = counts.tested;
        world.perf_stats.pairs_touching = counts.touching;
        world.perf_stats.resolved = counts.resolved;
        world.perf_stats.trace_calls = traced.calls;
        world.perf_stats.trace_substeps = traced.substeps;
        world.perf_stats.step_ms = elapsed_ms(step_start);
    }

    world.frame += 1;
}

/// Integrate every body, returning the trace work it took
fn integrate_bodies(bodies: &mut [BodySlot], grid: &TileGrid, tick: f32, gravity: f32) -> TraceStats {
    #[cfg(feature = "parallel")]
    {
        bodies
            .par_iter_mut()
            .map(|slot| TraceStats::of(&kinetic::step(&mut slot.body, tick, gravity, grid)))
            .reduce(TraceStats::default, TraceStats::merge)
    }
    #[cfg(not(feature = "parallel"))]
    {
        bodies
            .iter_mut()
            .map(|slot| TraceStats::of(&kinetic::step(&mut slot.body, tick, gravity, grid)))
            .fold(TraceStats::default(), TraceStats::merge)
    }
}

/// All-pairs broad phase: every touching pair goes to the resolver in
/// insertion order (lower index is `a`).
fn resolve_pairs(
    bodies: &mut [BodySlot],
    ctx: &ResolveContext<'_>,
    events: &RefCell<Vec<CollisionEvent>>,
) -> PairCounts {
    let mut counts = PairCounts::default();

    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        for other in tail.iter_mut() {
            let slot = &mut head[i];
            counts.tested += 1;
            if !touches(&slot.body, &other.body) {
                continue;
            }
            counts.touching += 1;

            let mut a = Recording { slot, events };
            let mut b = Recording { slot: other, events };
            if check_pair(&mut a, &mut b, ctx).is_some() {
                counts.resolved += 1;
            }
        }
    }

    counts
}
