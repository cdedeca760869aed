// modubil_sim/src/simulation/plugins/debugging/mod.rs

use bevy::prelude::*;

// --- Sub-modules for organization ---
mod components;
mod systems;

// Re-export the public component so scenarios or examples can enable visuals directly.
pub use components::ShowDebugGizmos;

/// A top-level plugin that brings in the wheel force visualizations.
pub struct DebuggingPlugin;

impl Plugin for DebuggingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostStartup, systems::enable_configured_gizmos)
            .add_systems(
                Update,
                (
                    // Hotkey toggle
                    systems::toggle_wheel_force_gizmos,
                    // The actual drawing systems
                    systems::draw_wheel_forces,
                    systems::draw_suspension_rays,
                ),
            );
    }
}
