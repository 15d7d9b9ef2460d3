pub mod controller;
pub mod input;
pub mod intent;
pub mod physics;
