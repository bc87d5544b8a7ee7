//! Discs under gravity, bouncing off each other and a pair of fixed
//! bumpers, rendered to a `<canvas id="rebound-canvas">`.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use rebound_engine::{World, WorldConfig};
use rebound_web::FrameDriver;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

mod contact;
mod disc;
mod rng;

use contact::DiscContact;
use disc::Disc;
use rng::Rng;

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;
const GRAVITY: Vec2 = Vec2::new(0.0, 500.0);
const BALL_COUNT: usize = 24;

const PALETTE: [&str; 4] = ["#e4572e", "#17bebb", "#ffc914", "#76b041"];

fn build_world() -> World<CanvasRenderingContext2d> {
    let config = WorldConfig {
        cps: 120,
        ..Default::default()
    };
    let mut world = World::new(config, DiscContact);

    // Two huge fixed discs poking up from below form the floor bowl.
    world.add_body(Disc::fixed(Vec2::new(WIDTH * 0.3, HEIGHT + 260.0), 320.0, "#394053"));
    world.add_body(Disc::fixed(Vec2::new(WIDTH * 0.7, HEIGHT + 260.0), 320.0, "#394053"));

    let mut rng = Rng::new(0xb0b);
    for i in 0..BALL_COUNT {
        let pos = Vec2::new(rng.range(60.0, WIDTH - 60.0), rng.range(40.0, 200.0));
        let vel = Vec2::new(rng.range(-120.0, 120.0), rng.range(-40.0, 40.0));
        let radius = rng.range(8.0, 22.0);
        let ball = Disc::dynamic(pos, radius, PALETTE[i % PALETTE.len()])
            .with_velocity(vel)
            .with_gravity(GRAVITY);
        world.add_body(ball);
    }

    world
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    rebound_web::init_log();

    let world = Rc::new(RefCell::new(build_world()));
    log::info!("bouncing-balls: {} bodies", world.borrow().body_count());

    FrameDriver::for_canvas_id(world, "rebound-canvas")?.start();
    Ok(())
}
