use legion::systems::CommandBuffer;
use legion::world::SubWorld;
use legion::*;
use tracing::debug;

use crate::collision::Aabb;
use crate::components::*;
use crate::events::{FrameEvent, FrameEvents};
use crate::physics::{self, PlatformerPhysics, WorldBounds};

/// The per-tick schedule. Every system touches the player's position, so
/// they run one after another in this order.
pub fn tick_schedule() -> Schedule {
    Schedule::builder()
        .add_system(integrate_player_system())
        .add_system(keep_in_world_system())
        .add_system(resolve_obstacles_system())
        .add_system(collect_coins_system())
        .add_system(follow_camera_system())
        .build()
}

#[system(for_each)]
#[filter(component::<Player>())]
pub fn integrate_player(pos: &mut Position, vel: &Velocity) {
    pos.0 += vel.0;
}

#[system(for_each)]
#[filter(component::<Player>())]
pub fn keep_in_world(pos: &mut Position, hitbox: &Hitbox, #[resource] bounds: &WorldBounds) {
    physics::clamp_to_world(&mut pos.0, hitbox.0, bounds);
}

#[system(for_each)]
#[filter(component::<Player>())]
pub fn resolve_obstacles(
    pos: &mut Position,
    vel: &mut Velocity,
    hitbox: &Hitbox,
    #[resource] physics: &PlatformerPhysics,
    #[resource] bounds: &WorldBounds,
) {
    physics.update(&mut pos.0, &mut vel.0, hitbox.0, bounds);
}

/// Coins are removed through the command buffer, so they are gone once the
/// schedule finishes and can never be counted twice.
#[system]
pub fn collect_coins(
    world: &mut SubWorld,
    players: &mut Query<(&Player, &Position, &Hitbox)>,
    coins: &mut Query<(Entity, &Coin, &Position, &Hitbox)>,
    commands: &mut CommandBuffer,
    #[resource] score: &mut Score,
    #[resource] events: &mut FrameEvents,
) {
    let bodies: Vec<Aabb> = players
        .iter(world)
        .map(|(_, pos, hitbox)| hitbox.at(pos))
        .collect();

    for (entity, _, pos, hitbox) in coins.iter(world) {
        let coin = hitbox.at(pos);
        if !bodies.iter().any(|body| body.intersects(&coin)) {
            continue;
        }

        commands.remove(*entity);
        score.add(1);
        events.push(FrameEvent::CoinCollected {
            score: score.value(),
        });

        debug!(x = pos.0.x, y = pos.0.y, score = score.value(), "coin collected");
    }
}

#[system(for_each)]
#[filter(component::<Player>())]
pub fn follow_camera(pos: &Position, #[resource] camera: &mut Camera) {
    camera.position = pos.0;
}
