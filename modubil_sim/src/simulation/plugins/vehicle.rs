// modubil_sim/src/simulation/plugins/vehicle.rs

use avian3d::prelude::*;
use bevy::transform::TransformSystem;

use crate::prelude::*;
use crate::simulation::core::components::{CenterOfMassMarker, WheelForceTotals};
use crate::simulation::core::convert::{
    bevy_global_transform_to_nalgebra_isometry, point_to_vec3, vec3_to_point, vec3_to_vector,
    vector_to_vec3, wheel_frame_from_global,
};

pub struct VehiclePlugin;

impl Plugin for VehiclePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_vehicles)
            .add_systems(PostStartup, validate_wheel_wiring)
            // Marker positions are only valid after transform propagation.
            .add_systems(
                PostUpdate,
                assign_center_of_mass.after(TransformSystem::TransformPropagate),
            )
            .add_systems(
                FixedUpdate,
                (
                    mass_distribution_system.in_set(VehicleSet::MassDistribution),
                    drivetrain_system.in_set(VehicleSet::Drivetrain),
                    wheel_friction_system.in_set(VehicleSet::Friction),
                    apply_wheel_forces.in_set(VehicleSet::Actuation),
                ),
            );
    }
}

// =========================================================================
// == Spawning ==
// =========================================================================

fn spawn_vehicles(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    mut meshes: Option<ResMut<Assets<Mesh>>>,
    mut materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    for vehicle in &config.vehicles {
        if let Err(e) = vehicle.validate() {
            error!("Skipping vehicle '{}': {}", vehicle.name, e);
            continue;
        }
        let [hx, hy, hz] = vehicle.chassis_half_extents;
        let [x, y, z] = vehicle.spawn_position;

        info!(
            "[SPAWN] Vehicle '{}' ({} kg, {} wheels) at {:?}.",
            vehicle.name,
            vehicle.mass,
            vehicle.wheels.len(),
            vehicle.spawn_position
        );

        let chassis = commands
            .spawn((
                Name::new(vehicle.name.clone()),
                Transform::from_xyz(x, y, z),
                RigidBody::Dynamic,
                Collider::cuboid(hx * 2.0, hy * 2.0, hz * 2.0),
                // The configured mass and box inertia replace the collider-derived ones.
                Mass(vehicle.mass as f32),
                AngularInertia::new(box_inertia(vehicle.mass as f32, [hx, hy, hz])),
                (NoAutoMass, NoAutoAngularInertia, NoAutoCenterOfMass),
                SleepingDisabled,
                DriverInput::default(),
                Drivetrain {
                    max_motor_torque: vehicle.max_motor_torque,
                    average_rpm: 0.0,
                },
                WheelForceTotals::default(),
            ))
            .id();

        if let (Some(meshes), Some(materials)) = (meshes.as_mut(), materials.as_mut()) {
            commands.entity(chassis).insert((
                Mesh3d(meshes.add(Cuboid::new(hx * 2.0, hy * 2.0, hz * 2.0))),
                MeshMaterial3d(materials.add(Color::srgb(0.7, 0.1, 0.1))),
            ));
        }

        if let Some([cx, cy, cz]) = vehicle.center_of_mass {
            let marker = commands
                .spawn((
                    Name::new(format!("{}/center_of_mass", vehicle.name)),
                    Transform::from_xyz(cx, cy, cz),
                    CenterOfMassMarker {
                        body: chassis,
                        applied: false,
                    },
                ))
                .id();
            commands.entity(chassis).add_child(marker);
        }

        let mut assembly = VehicleAssembly::default();
        for wheel in &vehicle.wheels {
            let model = match WheelFrictionModel::new(
                format!("{}/{}", vehicle.name, wheel.name),
                vehicle.friction,
                Some(wheel.geometry),
            ) {
                Ok(model) => model,
                Err(e) => {
                    error!(
                        "Skipping wheel '{}' of '{}': {}",
                        wheel.name, vehicle.name, e
                    );
                    continue;
                }
            };

            let [wx, wy, wz] = wheel.position;
            let mut wheel_entity = commands.spawn((
                Name::new(wheel.name.clone()),
                Transform::from_xyz(wx, wy, wz),
                WheelFriction(model),
                WheelOf(chassis),
                Suspension::new(wheel.suspension),
                WheelContact::default(),
            ));
            if wheel.driven {
                wheel_entity.insert(DrivenWheel);
            }
            let wheel_id = wheel_entity.id();

            // The visual tire hangs at rest length below the mount, rolled onto its side.
            if let (Some(meshes), Some(materials)) = (meshes.as_mut(), materials.as_mut()) {
                let radius = wheel.geometry.radius() as f32;
                let width = wheel.geometry.width() as f32;
                let tire = commands
                    .spawn((
                        Mesh3d(meshes.add(Cylinder::new(radius, width))),
                        MeshMaterial3d(materials.add(Color::srgb(0.1, 0.1, 0.1))),
                        Transform::from_xyz(0.0, -wheel.suspension.rest_length, 0.0)
                            .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
                    ))
                    .id();
                commands.entity(wheel_id).add_child(tire);
            }

            commands.entity(chassis).add_child(wheel_id);
            assembly.wheels.push(wheel_id);
        }

        commands.entity(chassis).insert(assembly);
    }
}

/// Principal moments of a solid box, from its half extents.
pub fn box_inertia(mass: f32, half_extents: [f32; 3]) -> Vec3 {
    let [x, y, z] = half_extents.map(|h| (2.0 * h) * (2.0 * h));
    Vec3::new(y + z, x + z, x + y) * (mass / 12.0)
}

/// Resolves each wheel's collaborators once. A wheel without a contact
/// sensor is inert for the rest of the run; one without a suspension keeps
/// ticking as a rigid mount but never receives any supported mass.
fn validate_wheel_wiring(
    vehicles: Query<(&Name, &VehicleAssembly, Has<RigidBody>)>,
    mut wheels: Query<(&mut WheelFriction, Has<WheelContact>, Has<Suspension>)>,
) {
    for (name, assembly, has_body) in &vehicles {
        for &wheel in &assembly.wheels {
            let Ok((mut friction, has_contact, has_suspension)) = wheels.get_mut(wheel) else {
                warn!("Vehicle '{}' lists wheel {:?} that has no friction model.", name, wheel);
                continue;
            };
            if !has_body {
                friction.0.disable(MissingDependency::RigidBody);
            }
            if !has_contact {
                friction.0.disable(MissingDependency::ContactSensor);
            }
            if !has_suspension {
                warn!(
                    "Wheel '{}' has no suspension; it will carry no mass.",
                    friction.0.name()
                );
            }
        }
    }
}

/// Copies each center of mass marker into the chassis `CenterOfMass`, in
/// chassis-local coordinates. Runs once per marker.
fn assign_center_of_mass(
    mut commands: Commands,
    mut markers: Query<(&GlobalTransform, &mut CenterOfMassMarker)>,
    bodies: Query<&GlobalTransform, With<RigidBody>>,
) {
    for (marker_transform, mut marker) in &mut markers {
        if marker.applied {
            continue;
        }
        let Ok(body_transform) = bodies.get(marker.body) else {
            continue;
        };
        let local = center_of_mass_from_marker(
            &bevy_global_transform_to_nalgebra_isometry(body_transform),
            &vec3_to_point(marker_transform.translation()),
        );
        debug!("Center of mass for {:?} set to {}", marker.body, local);
        commands
            .entity(marker.body)
            .insert(CenterOfMass(point_to_vec3(&local)));
        marker.applied = true;
    }
}

// =========================================================================
// == Per-Tick Systems ==
// =========================================================================

/// Splits each vehicle's mass across its wheels in proportion to their
/// current suspension loads.
fn mass_distribution_system(
    vehicles: Query<(&VehicleAssembly, &Mass)>,
    mut wheels: Query<(&mut WheelFriction, Option<&Suspension>)>,
) {
    for (assembly, mass) in &vehicles {
        let loads: Vec<(WheelId, f64)> = assembly
            .wheels
            .iter()
            .filter_map(|&entity| {
                let (_, suspension) = wheels.get(entity).ok()?;
                let load = suspension.map_or(0.0, |s| s.force_magnitude());
                Some((WheelId::from_entity(entity), load))
            })
            .collect();

        let allocation = distribute(&loads, mass.0 as f64);
        for (id, supported_mass) in allocation.iter() {
            if let Ok((mut friction, _)) = wheels.get_mut(id.to_entity()) {
                friction.0.set_supported_mass(supported_mass);
            }
        }
    }
}

/// Splits `throttle × max_motor_torque` evenly over the driven wheels and
/// reads their RPM back for the driver.
fn drivetrain_system(
    mut vehicles: Query<(&Name, &VehicleAssembly, &DriverInput, &mut Drivetrain)>,
    mut wheels: Query<&mut WheelFriction, With<DrivenWheel>>,
) {
    for (name, assembly, input, mut drivetrain) in &mut vehicles {
        let driven: Vec<Entity> = assembly
            .wheels
            .iter()
            .copied()
            .filter(|&entity| wheels.contains(entity))
            .collect();
        if driven.is_empty() {
            continue;
        }

        let throttle = input.throttle.clamp(-1.0, 1.0) as f64;
        let torque_per_wheel = throttle * drivetrain.max_motor_torque / driven.len() as f64;

        let mut rpm_sum = 0.0;
        for &entity in &driven {
            if let Ok(mut friction) = wheels.get_mut(entity) {
                friction.0.apply_torque(torque_per_wheel);
                rpm_sum += friction.0.rpm();
            }
        }
        let average_rpm = rpm_sum / driven.len() as f64;

        if (average_rpm - drivetrain.average_rpm).abs() > 50.0 {
            debug!("'{}' driven wheels at {:.0} rpm", name, average_rpm);
        }
        drivetrain.average_rpm = average_rpm;
    }
}

/// Runs every wheel of every vehicle against one `ForceAccumulator` built
/// from the chassis state, then stores the net force and torque.
fn wheel_friction_system(
    time: Res<Time>,
    mut vehicles: Query<(
        &VehicleAssembly,
        &mut WheelForceTotals,
        &GlobalTransform,
        &LinearVelocity,
        &AngularVelocity,
        &Mass,
        Option<&CenterOfMass>,
    )>,
    mut wheels: Query<(
        &mut WheelFriction,
        &mut WheelContact,
        Option<&Suspension>,
        &GlobalTransform,
    )>,
) {
    let dt = time.delta_secs_f64();

    for (assembly, mut totals, transform, linear, angular, mass, com) in &mut vehicles {
        let local_com = com.map_or(Vec3::ZERO, |com| com.0);
        let state = BodyState {
            linear_velocity: vec3_to_vector(linear.0),
            angular_velocity: vec3_to_vector(angular.0),
            mass: mass.0 as f64,
            world_center_of_mass: vec3_to_point(transform.transform_point(local_com)),
        };
        let mut body = ForceAccumulator::new(state);

        for &entity in &assembly.wheels {
            let Ok((mut friction, mut contact, suspension, wheel_transform)) =
                wheels.get_mut(entity)
            else {
                continue;
            };
            let frame = wheel_frame_from_global(wheel_transform);

            // The spring pushes the chassis up along the mount axis.
            let spring_force = suspension.map_or(0.0, |suspension| suspension.force);
            if contact.sample.is_some() && spring_force > 0.0 {
                body.add_force_at_position(&(frame.up.into_inner() * spring_force), &frame.position);
            }

            friction.0.tick(&frame, &mut *contact, &mut body, dt);
        }

        totals.force = body.force();
        totals.torque = body.torque();
    }
}

/// Hands the accumulated wheel forces to Avian for the coming physics step.
fn apply_wheel_forces(
    mut commands: Commands,
    vehicles: Query<(Entity, &WheelForceTotals), With<VehicleAssembly>>,
) {
    for (entity, totals) in &vehicles {
        commands.entity(entity).insert((
            ExternalForce::new(vector_to_vec3(&totals.force)),
            ExternalTorque::new(vector_to_vec3(&totals.torque)),
        ));
    }
}
