pub mod camera;
pub mod input;
pub mod state;
pub mod time;
