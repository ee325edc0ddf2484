use glam::DVec2;
use legion::storage::Component;
use legion::*;
use tracing::info;

use crate::collision::Aabb;
use crate::components::*;
use crate::events::{FrameEvent, FrameEvents};
use crate::level::Level;
use crate::physics::{Footing, PlatformerPhysics, StaticGeometry};
use crate::snapshot::{self, RenderFrame};
use crate::systems;
use crate::{GRAVITY, PLAYER_SIZE};

/// One play-through of a level: the world, its resources and the tick
/// schedule. Restarting throws the whole session away and builds a new one.
pub struct Session {
    world: World,
    resources: Resources,
    schedule: Schedule,
    player: Entity,
    ticks: u64,
}

impl Session {
    pub fn new(level: &Level) -> Self {
        let mut world = World::default();

        let player = world.push((
            Player,
            Position(level.spawn),
            Velocity::default(),
            Hitbox(PLAYER_SIZE),
            Appearance(SpriteKind::Player),
        ));

        for tile in &level.walls {
            world.push((
                Wall,
                Position(tile.center),
                Hitbox(tile.size),
                Appearance(tile.kind),
                DrawLayer(tile.layer),
            ));
        }
        for tile in &level.scenery {
            world.push((
                Scenery,
                Position(tile.center),
                Hitbox(tile.size),
                Appearance(tile.kind),
                DrawLayer(tile.layer),
            ));
        }
        for tile in &level.coins {
            world.push((
                Coin,
                Position(tile.center),
                Hitbox(tile.size),
                Appearance(tile.kind),
                DrawLayer(tile.layer),
            ));
        }

        let geometry = StaticGeometry::new(
            level
                .walls
                .iter()
                .map(|t| Aabb::from_center(t.center, t.size))
                .collect(),
        );

        let mut resources = Resources::default();
        resources.insert(level.bounds);
        resources.insert(PlatformerPhysics::new(geometry, GRAVITY));
        resources.insert(Score::new());
        resources.insert(Camera {
            position: level.spawn,
        });
        resources.insert(FrameEvents::default());

        info!(
            level = %level.name,
            walls = level.walls.len(),
            coins = level.coins.len(),
            "session set up"
        );

        Self {
            world,
            resources,
            schedule: systems::tick_schedule(),
            player,
            ticks: 0,
        }
    }

    /// Runs one fixed step and returns what happened during it.
    pub fn tick(&mut self) -> Vec<FrameEvent> {
        self.schedule.execute(&mut self.world, &mut self.resources);
        self.ticks += 1;

        self.resources
            .get_mut::<FrameEvents>()
            .map(|mut events| events.drain())
            .unwrap_or_default()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn player_component<T: Component + Copy>(&self) -> T {
        self.world
            .entry_ref(self.player)
            .ok()
            .and_then(|entry| entry.get_component::<T>().ok().copied())
            .expect("the player lives as long as its session")
    }

    pub fn player_position(&self) -> DVec2 {
        self.player_component::<Position>().0
    }

    pub fn player_velocity(&self) -> DVec2 {
        self.player_component::<Velocity>().0
    }

    pub fn player_body(&self) -> Aabb {
        self.player_component::<Hitbox>()
            .at(&self.player_component::<Position>())
    }

    pub fn set_player_velocity(&mut self, velocity: DVec2) {
        if let Ok(mut entry) = self.world.entry_mut(self.player) {
            if let Ok(vel) = entry.get_component_mut::<Velocity>() {
                vel.0 = velocity;
            }
        }
    }

    /// Moves the player without going through physics.
    pub fn place_player(&mut self, centre: DVec2) {
        if let Ok(mut entry) = self.world.entry_mut(self.player) {
            if let Ok(pos) = entry.get_component_mut::<Position>() {
                pos.0 = centre;
            }
        }
    }

    pub fn can_jump(&self) -> bool {
        let body = self.player_body();
        self.resources
            .get::<PlatformerPhysics>()
            .is_some_and(|physics| physics.can_jump(&body))
    }

    pub fn footing(&self) -> Footing {
        if self.can_jump() {
            Footing::Grounded
        } else {
            Footing::Airborne
        }
    }

    pub fn score(&self) -> u32 {
        self.resources.get::<Score>().map_or(0, |s| s.value())
    }

    pub fn score_text(&self) -> String {
        self.resources
            .get::<Score>()
            .map(|s| s.text().to_owned())
            .unwrap_or_default()
    }

    pub fn camera(&self) -> DVec2 {
        self.resources
            .get::<Camera>()
            .map(|c| c.position)
            .unwrap_or_default()
    }

    pub fn coins_remaining(&self) -> usize {
        <&Coin>::query().iter(&self.world).count()
    }

    pub fn coin_positions(&self) -> Vec<DVec2> {
        <(&Coin, &Position)>::query()
            .iter(&self.world)
            .map(|(_, pos)| pos.0)
            .collect()
    }

    pub fn snapshot(&self) -> RenderFrame {
        let score = self.resources.get::<Score>().map(|s| Score::clone(&s)).unwrap_or_default();
        snapshot::build_render_frame(&self.world, self.camera(), &score, self.ticks)
    }
}
