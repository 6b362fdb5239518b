use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::{GRAVITY, RigidBody};
use crate::resources::worldtime::WorldTime;

/// Integrate bodies: apply pending impulses, gravity, then velocity.
///
/// Bodies with gravity come to rest on the ground plane (`z = 0`).
pub fn movement_system(mut query: Query<(&mut MapPosition, &mut RigidBody)>, time: Res<WorldTime>) {
    let dt = time.delta;
    for (mut position, mut rigidbody) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        let impulse = std::mem::take(&mut rigidbody.impulse);
        rigidbody.velocity += impulse;

        let airborne = position.pos.z > 0.0 || rigidbody.velocity.z > 0.0;
        if rigidbody.gravity && airborne {
            rigidbody.velocity.z -= GRAVITY * dt;
        }

        position.pos += rigidbody.velocity * dt;

        if rigidbody.gravity && position.pos.z <= 0.0 {
            position.pos.z = 0.0;
            if rigidbody.velocity.z < 0.0 {
                rigidbody.velocity.z = 0.0;
            }
        }
    }
}
