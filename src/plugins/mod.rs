pub mod movement_plugin;
pub mod scene_plugin;
