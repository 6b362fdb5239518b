//! Sphere overlap detection.
//!
//! Tests every pair of [`SphereCollider`]s each tick and triggers an
//! [`OverlapEvent`] for pairs that were not overlapping on the previous
//! tick. Pairs that stay in contact are reported once.
use bevy_ecs::prelude::*;
use log::trace;
use rustc_hash::FxHashSet;

use crate::components::mapposition::MapPosition;
use crate::components::spherecollider::SphereCollider;
use crate::events::collision::OverlapEvent;

fn pair_key(a: Entity, b: Entity) -> (Entity, Entity) {
    if a < b { (a, b) } else { (b, a) }
}

pub fn overlap_detector(
    query: Query<(Entity, &MapPosition, &SphereCollider)>,
    mut touching: Local<FxHashSet<(Entity, Entity)>>,
    mut commands: Commands,
) {
    let mut current: FxHashSet<(Entity, Entity)> = FxHashSet::default();

    for [(entity_a, position_a, collider_a), (entity_b, position_b, collider_b)] in
        query.iter_combinations()
    {
        if collider_a.overlaps(position_a.pos, collider_b, position_b.pos) {
            current.insert(pair_key(entity_a, entity_b));
        }
    }

    let mut began: Vec<(Entity, Entity)> = current
        .iter()
        .filter(|pair| !touching.contains(*pair))
        .copied()
        .collect();
    began.sort();
    for (a, b) in began {
        trace!("Overlap began between {:?} and {:?}", a, b);
        commands.trigger(OverlapEvent { a, b });
    }

    *touching = current;
}
