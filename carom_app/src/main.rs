//! Headless carom simulation
//!
//! Pucks drift inside a walled table, bounce off the panels, knock into
//! each other and retire after enough contacts. The run exercises the whole
//! engine loop without a window: fixed update steps, sibling collision
//! tests with both hooks, deferred destruction and one draw pass into a
//! counting background.

mod config;

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use flat_engine::foundation::logging;
use flat_engine::foundation::math::{self, constants};
use flat_engine::prelude::*;
use rand::Rng;

use crate::config::{ArenaConfig, CaromConfig};

/// Shared counters for paint traffic across all entities
#[derive(Default)]
struct PaintTally {
    paints: Rc<Cell<u64>>,
    vertices: Rc<Cell<u64>>,
}

impl PaintTally {
    fn background(&self) -> TallyBackground {
        TallyBackground {
            paints: Rc::clone(&self.paints),
            vertices: Rc::clone(&self.vertices),
        }
    }
}

struct TallyBackground {
    paints: Rc<Cell<u64>>,
    vertices: Rc<Cell<u64>>,
}

impl Background for TallyBackground {
    fn apply(&self) {}

    fn paint(&self, vertices: &[Vec3], _mode: PaintMode) {
        self.paints.set(self.paints.get() + 1);
        self.vertices
            .set(self.vertices.get() + vertices.len() as u64);
    }
}

/// Bounces off walls, counts puck contacts and retires when worn out
struct PuckBehavior {
    arena: ArenaConfig,
    max_caroms: u32,
    caroms: u32,
    total_caroms: Rc<Cell<u64>>,
}

impl Behavior for PuckBehavior {
    fn on_collision(&mut self, scene: &mut Scene, me: EntityKey, other: EntityKey, point: Vec3) {
        let hit_wall = scene
            .get(other)
            .map_or(false, |entity| matches!(entity.mesh.kind(), ShapeKind::Rectangle(_)));

        if hit_wall {
            // flip toward the interior; re-applying while still touching
            // keeps pointing inward instead of jittering
            if let Some(entity) = scene.get_mut(me) {
                if point.x <= 0.0 {
                    entity.speed.x = entity.speed.x.abs();
                } else if point.x >= self.arena.width {
                    entity.speed.x = -entity.speed.x.abs();
                }
                if point.y <= 0.0 {
                    entity.speed.y = entity.speed.y.abs();
                } else if point.y >= self.arena.height {
                    entity.speed.y = -entity.speed.y.abs();
                }
            }
            return;
        }

        self.caroms += 1;
        self.total_caroms.set(self.total_caroms.get() + 1);
        log::debug!("carom of {:?} with {:?} at {:?}", me, other, point);

        // head away from the contact, keeping the pace
        if let Some(entity) = scene.get_mut(me) {
            let away = entity.position - point;
            if !math::is_zero(away) && !math::is_zero(entity.speed) {
                entity.speed = math::resize(away, entity.speed.norm());
            }
        }

        if self.caroms >= self.max_caroms {
            log::info!("puck {:?} retires after {} caroms", me, self.caroms);
            scene.destroy(me);
        }
    }
}

fn spawn_walls(scene: &mut Scene, root: EntityKey, arena: ArenaConfig, tally: &PaintTally) {
    let thickness = arena.wall_thickness;
    // top left corner, width, height; inner faces line up with the arena
    let panels = [
        (
            Vec3::new(0.0, arena.height + thickness, 0.0),
            arena.width,
            thickness,
        ),
        (Vec3::new(0.0, 0.0, 0.0), arena.width, thickness),
        (Vec3::new(-thickness, arena.height, 0.0), thickness, arena.height),
        (
            Vec3::new(arena.width, arena.height, 0.0),
            thickness,
            arena.height,
        ),
    ];

    for (position, width, height) in panels {
        let wall = scene.spawn(
            EntityParams::default()
                .with_position(position)
                .with_mesh(Shape::rectangle(Vec3::zeros(), width, height, 0.0))
                .with_collider(Shape::rectangle(Vec3::zeros(), width, height, 0.0))
                .with_background(tally.background()),
        );
        scene.add_child(root, wall);
    }
}

fn spawn_pucks(
    scene: &mut Scene,
    root: EntityKey,
    config: &CaromConfig,
    tally: &PaintTally,
    total_caroms: &Rc<Cell<u64>>,
) {
    let mut rng = rand::thread_rng();
    let margin = config.pucks.radius + config.arena.wall_thickness;

    for _ in 0..config.pucks.count {
        let pace = rng.gen_range(0.2..=1.0) * config.pucks.max_speed;
        let heading = rng.gen_range(0.0..2.0 * constants::PI);

        let puck = scene.spawn(
            EntityParams::default()
                .with_position(Vec3::new(
                    rng.gen_range(margin..config.arena.width - margin),
                    rng.gen_range(margin..config.arena.height - margin),
                    0.0,
                ))
                .with_speed(Vec3::new(pace * heading.cos(), pace * heading.sin(), 0.0))
                .with_mesh(Shape::circle(Vec3::zeros(), config.pucks.radius))
                .with_collider(Shape::circle(Vec3::zeros(), config.pucks.radius))
                .with_background(tally.background())
                .with_behavior(PuckBehavior {
                    arena: config.arena,
                    max_caroms: config.pucks.max_caroms,
                    caroms: 0,
                    total_caroms: Rc::clone(total_caroms),
                }),
        );
        scene.add_child(root, puck);
    }
}

fn main() {
    logging::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "carom.ron".to_string());
    let config: CaromConfig = flat_engine::core::config::load_or_default(Path::new(&path));
    log::info!(
        "carom table {}x{} with {} pucks for {} frames",
        config.arena.width,
        config.arena.height,
        config.pucks.count,
        config.simulation.frames
    );

    let tally = PaintTally::default();
    let total_caroms = Rc::new(Cell::new(0));

    let mut scene = Scene::new();
    let root = scene.spawn(EntityParams::default());
    spawn_walls(&mut scene, root, config.arena, &tally);
    spawn_pucks(&mut scene, root, &config, &tally, &total_caroms);
    log::info!("table set with {} entities", scene.len());

    let mut timer = Timer::new();
    for _ in 0..config.simulation.frames {
        timer.update();
        scene.update(root, timer.now(), timer.tick());
        scene.detect_collisions(root);
    }

    scene.draw(root, config.simulation.border_only);
    log::info!(
        "done: {} caroms, {} entities left, {} paint calls covering {} vertices",
        total_caroms.get(),
        scene.len(),
        tally.paints.get(),
        tally.vertices.get()
    );
}
