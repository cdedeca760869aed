// modubil_sim/src/simulation/plugins/world.rs

use avian3d::prelude::*;

use crate::prelude::*;

/// Thickness of the ground slab collider, in meters.
const GROUND_THICKNESS: f32 = 0.2;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_ground, spawn_lighting_and_camera));
    }
}

/// A flat static slab whose top face is the plane `y = 0`.
fn spawn_ground(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let size = config.world.ground_size.max(1.0);
    info!("[SCENE] Spawning {size} m ground plane.");

    let ground = commands
        .spawn((
            Name::new("Ground"),
            RigidBody::Static,
            Collider::cuboid(size, GROUND_THICKNESS, size),
            Transform::from_xyz(0.0, -GROUND_THICKNESS / 2.0, 0.0),
        ))
        .id();

    // Visuals are optional so headless apps without a renderer still work.
    if let (Some(mut meshes), Some(mut materials)) = (meshes, materials) {
        commands.entity(ground).insert((
            Mesh3d(meshes.add(Cuboid::new(size, GROUND_THICKNESS, size))),
            MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        ));
    }
}

fn spawn_lighting_and_camera(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 15_000.0,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // A static chase-distance camera looking at the spawn area.
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-12.0, 8.0, 12.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
