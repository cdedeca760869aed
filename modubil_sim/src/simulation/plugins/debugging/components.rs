// modubil_sim/src/simulation/plugins/debugging/components.rs

use bevy::prelude::Component;

/// A marker component that enables debug visualizations for the wheel it's attached to.
#[derive(Component)]
pub struct ShowDebugGizmos;
