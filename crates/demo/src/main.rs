//! Headless tracker demo: orbiting targets around a fixed camera, with the
//! per-frame tracker pass printing indicator state to the log.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use glam::{Vec2, Vec3};
use hecs::{Entity, World};
use rand::Rng;

use tracker_core::{PerspectiveCamera, ScreenSpace, Transform, ViewportRect};
use tracker_hud::{TrackerConfig, TrackerWidget, TrackersController, WidgetFactory};

const SCREEN_WIDTH: f32 = 1280.0;
const SCREEN_HEIGHT: f32 = 720.0;
const FRAMES: u32 = 300;
const TARGET_COUNT: u32 = 6;

/// Indicator state observable from outside the controller.
#[derive(Debug, Default, Clone)]
struct IndicatorState {
    position: Vec2,
    rotation: f32,
    visible: bool,
    alpha: f32,
    label: String,
}

struct ConsoleWidget(Rc<RefCell<IndicatorState>>);

impl TrackerWidget for ConsoleWidget {
    fn set_local_position(&mut self, position: Vec2) {
        self.0.borrow_mut().position = position;
    }
    fn set_local_rotation(&mut self, radians: f32) {
        self.0.borrow_mut().rotation = radians;
    }
    fn set_visible(&mut self, visible: bool) {
        self.0.borrow_mut().visible = visible;
    }
    fn set_icon_alpha(&mut self, alpha: f32) {
        self.0.borrow_mut().alpha = alpha;
    }
    fn set_label(&mut self, text: &str) {
        self.0.borrow_mut().label = text.to_owned();
    }
}

/// Hands out console widgets and keeps a handle on each for reporting.
#[derive(Default)]
struct ConsoleFactory {
    live: Rc<RefCell<Vec<Rc<RefCell<IndicatorState>>>>>,
}

impl WidgetFactory for ConsoleFactory {
    fn instantiate(&mut self) -> Option<Box<dyn TrackerWidget>> {
        let state = Rc::new(RefCell::new(IndicatorState::default()));
        self.live.borrow_mut().push(state.clone());
        Some(Box::new(ConsoleWidget(state)))
    }

    fn destroy(&mut self, _widget: Box<dyn TrackerWidget>) {}
}

struct Orbit {
    radius: f32,
    angular_velocity: f32,
    phase: f32,
    height: f32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TrackerConfig::load();
    log::info!(
        "Tracker demo: {} targets, {} frames, rotate={}, rounded={}",
        TARGET_COUNT,
        FRAMES,
        config.rotate,
        config.rounded
    );

    let mut camera = PerspectiveCamera::new(Vec3::new(0.0, 6.0, 45.0));
    camera.set_viewport(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
    camera.look_at(Vec3::ZERO);

    let mut world = World::new();
    let player = world.spawn((Transform::from_position(camera.position()),));

    let mut rng = rand::thread_rng();
    let mut targets: Vec<(Entity, Orbit)> = Vec::new();
    for _ in 0..TARGET_COUNT {
        let orbit = Orbit {
            radius: rng.gen_range(10.0..80.0),
            angular_velocity: rng.gen_range(0.2..1.2),
            phase: rng.gen_range(0.0..std::f32::consts::TAU),
            height: rng.gen_range(-5.0..12.0),
        };
        let position = orbit_position(&orbit, 0.0);
        let entity = world.spawn((Transform::from_position(position),));
        targets.push((entity, orbit));
    }

    let factory = ConsoleFactory::default();
    let indicators = factory.live.clone();
    let mut controller = TrackersController::from_config(
        Box::new(factory),
        ViewportRect::from_size(SCREEN_WIDTH, SCREEN_HEIGHT),
        ScreenSpace::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        &config,
    );
    controller.fade_reference = Some(player);

    for (index, (entity, _)) in targets.iter().enumerate() {
        let id = controller.create_tracker(&world, &camera, *entity, index as u32)?;
        if let Some(tracker) = controller.get_tracker_mut(id) {
            tracker.widget_mut().set_label(&format!("target {id}"));
        }
    }
    log::info!("Registered {} trackers", controller.count());

    let dt = 1.0 / 60.0;
    for frame in 0..FRAMES {
        let time = frame as f32 * dt;
        for (entity, orbit) in &targets {
            if let Ok(mut transform) = world.get::<&mut Transform>(*entity) {
                transform.position = orbit_position(orbit, time);
            }
        }

        // Once per frame, after target transforms have settled.
        controller.update_trackers(&world, &camera);

        if frame % 60 == 0 {
            report(frame, &indicators.borrow());
        }
    }

    controller.clear();
    log::info!("Done, {} trackers left after clear", controller.count());
    Ok(())
}

fn orbit_position(orbit: &Orbit, time: f32) -> Vec3 {
    let angle = orbit.phase + orbit.angular_velocity * time;
    Vec3::new(
        orbit.radius * angle.cos(),
        orbit.height,
        orbit.radius * angle.sin(),
    )
}

fn report(frame: u32, indicators: &[Rc<RefCell<IndicatorState>>]) {
    for state in indicators {
        let s = state.borrow();
        log::info!(
            "frame {frame:3} {:10} pos=({:7.1},{:7.1}) rot={:5.2} visible={} alpha={:.2}",
            s.label,
            s.position.x,
            s.position.y,
            s.rotation,
            s.visible,
            s.alpha
        );
    }
}
