#[macro_use]
extern crate log;

use orrery::camera::{Camera, CameraProbe};
use orrery::camera_controller::{CameraController, Direction};
use orrery::config::SystemConfig;
use orrery::render::{HeadlessTarget, ResourceCache};
use orrery::timeline::{Clock, Timeline};
use orrery::world::World;
use std::time::Duration;

const DEFAULT_FRAMES: usize = 600;
const FRAME_TIME: Duration = Duration::from_millis(16);

fn main() {
    pretty_env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> orrery::Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SystemConfig::load(&path)?,
        None => SystemConfig::default(),
    };
    let frames = args
        .next()
        .and_then(|frames| frames.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut timeline = Timeline::new();
    let mut world = World::generate(&config, timeline.now())?;

    let mut camera = Camera::new();
    camera.set_aspect_ratio(2600.0 / 1600.0);
    let mut camera_controller = CameraController::new(50.0);
    camera_controller.press(Direction::Forward);

    let mut target = HeadlessTarget::default();
    let mut cache = ResourceCache::new();
    let mut collisions = 0;

    for frame in 0..frames {
        timeline.next_frame();
        camera_controller.tick(timeline.previous_frame_time(), &mut camera);

        if let Some(collision) = world.tick(timeline.now(), &camera) {
            collisions += 1;
            info!(
                "frame {}: bounced off {:?} at {}",
                frame,
                collision.body,
                camera.position()
            );
            camera_controller.bounce(&collision.push);
        }

        world.submit(&mut target, &mut cache, &camera.frustum())?;
        std::thread::sleep(FRAME_TIME);
    }

    info!(
        "{} frames, {} bodies, {} uploads, {} draws, {} triangles, {} collisions",
        frames,
        world.bodies().len(),
        target.uploads,
        target.draws,
        target.triangles_drawn,
        collisions
    );
    Ok(())
}
