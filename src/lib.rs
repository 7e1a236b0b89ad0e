#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

extern crate nalgebra;
extern crate ncollide3d;

mod error;
mod id_arena;

pub mod camera;
pub mod camera_controller;
pub mod collision;
pub mod config;
pub mod frustum;
pub mod planet;
pub mod render;
pub mod ship;
pub mod timeline;
pub mod transform;
pub mod world;

pub use crate::error::{Error, Result};
pub use crate::id_arena::{Arena, Id};
