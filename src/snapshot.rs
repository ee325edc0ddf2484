//! Copies what a frame needs out of the world so drawing never touches it.

use glam::DVec2;
use legion::storage::Component;
use legion::*;

use crate::GAME_TITLE;
use crate::components::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteInstance {
    pub center: DVec2,
    pub size: DVec2,
    pub kind: SpriteKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    /// World point shown at the middle of the viewport.
    pub camera: DVec2,
    /// In draw order: level tiles by layer, then the player.
    pub sprites: Vec<SpriteInstance>,
    pub title: &'static str,
    pub score_text: String,
    pub coins_remaining: usize,
    pub tick: u64,
}

pub fn build_render_frame(world: &World, camera: DVec2, score: &Score, tick: u64) -> RenderFrame {
    let mut tiles = vec![];

    collect::<Wall>(world, &mut tiles);
    collect::<Scenery>(world, &mut tiles);
    let coins_remaining = collect::<Coin>(world, &mut tiles);

    // stable, so a layer shared by several kinds keeps walls under coins
    tiles.sort_by_key(|(layer, _)| *layer);

    let mut sprites: Vec<_> = tiles.into_iter().map(|(_, sprite)| sprite).collect();

    <(&Player, &Position, &Hitbox, &Appearance)>::query()
        .iter(world)
        .for_each(|(_, Position(center), Hitbox(size), Appearance(kind))| {
            sprites.push(SpriteInstance {
                center: *center,
                size: *size,
                kind: *kind,
            });
        });

    RenderFrame {
        camera,
        sprites,
        title: GAME_TITLE,
        score_text: score.text().to_owned(),
        coins_remaining,
        tick,
    }
}

fn collect<M: Component>(world: &World, out: &mut Vec<(DrawLayer, SpriteInstance)>) -> usize {
    let before = out.len();

    <(&M, &Position, &Hitbox, &Appearance, &DrawLayer)>::query()
        .iter(world)
        .for_each(|(_, Position(center), Hitbox(size), Appearance(kind), layer)| {
            let sprite = SpriteInstance {
                center: *center,
                size: *size,
                kind: *kind,
            };
            out.push((*layer, sprite));
        });

    out.len() - before
}

/// World coordinates have y up; screen coordinates have y down and the
/// camera in the middle of the viewport.
pub fn world_to_screen(point: DVec2, camera: DVec2, viewport: DVec2) -> DVec2 {
    DVec2::new(
        point.x - camera.x + viewport.x * 0.5,
        viewport.y * 0.5 - (point.y - camera.y),
    )
}
