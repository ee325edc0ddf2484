//! Gravity, wall collision and the "standing on something" check.

use glam::DVec2;

use crate::GROUND_PROBE_DISTANCE;
use crate::collision::Aabb;
use crate::quadtree::QuadTree;

const QUAD_CAPACITY: usize = 8;

/// A body wedged between several walls gets this many push-outs per tick.
const MAX_RESOLVE_PASSES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
}

impl WorldBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Keeps a box of `size` centred on `centre` inside the world.
///
/// Only one edge per axis is corrected: the left (bottom) edge wins, and the
/// right (top) edge is looked at only when the left (bottom) one was fine.
pub fn clamp_to_world(centre: &mut DVec2, size: DVec2, bounds: &WorldBounds) {
    let half = size * 0.5;

    if centre.x - half.x < 0.0 {
        centre.x = half.x;
    } else if centre.x + half.x > bounds.width - 1.0 {
        centre.x = bounds.width - 1.0 - half.x;
    }

    if centre.y - half.y < 0.0 {
        centre.y = half.y;
    } else if centre.y + half.y > bounds.height - 1.0 {
        centre.y = bounds.height - 1.0 - half.y;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Footing {
    Grounded,
    Airborne,
}

/// Immutable wall boxes plus a quadtree over them.
#[derive(Debug, Clone)]
pub struct StaticGeometry {
    walls: Vec<Aabb>,
    index: QuadTree<usize>,
}

impl StaticGeometry {
    pub fn new(walls: Vec<Aabb>) -> Self {
        let boundary = walls
            .iter()
            .copied()
            .reduce(|a, b| a.union(&b))
            .unwrap_or(Aabb::new(DVec2::ZERO, DVec2::ZERO));

        let mut index = QuadTree::new(QUAD_CAPACITY, boundary);
        for (i, wall) in walls.iter().enumerate() {
            index.push((*wall, i));
        }

        Self { walls, index }
    }

    pub fn walls(&self) -> &[Aabb] {
        &self.walls
    }

    /// Indices of the walls intersecting `area`, ascending, no duplicates.
    pub fn overlapping(&self, area: &Aabb) -> Vec<usize> {
        let mut hits = self.index.query(area);
        hits.sort_unstable();
        hits.dedup();
        hits
    }

    pub fn any_overlapping(&self, area: &Aabb) -> bool {
        !self.index.query(area).is_empty()
    }
}

/// Side-view physics: gravity pulls down, walls block, the floor of the
/// world holds the player up.
#[derive(Debug, Clone)]
pub struct PlatformerPhysics {
    geometry: StaticGeometry,
    gravity: f64,
}

impl PlatformerPhysics {
    pub fn new(geometry: StaticGeometry, gravity: f64) -> Self {
        Self { geometry, gravity }
    }

    pub fn geometry(&self) -> &StaticGeometry {
        &self.geometry
    }

    /// Pushes the body out of the walls it moved into this tick, then
    /// applies gravity for the next one.
    ///
    /// A push never carries the body past the edge of the world. A body
    /// squeezed between a wall and the edge stays overlapping the wall.
    pub fn update(
        &self,
        centre: &mut DVec2,
        velocity: &mut DVec2,
        size: DVec2,
        bounds: &WorldBounds,
    ) {
        for _ in 0..MAX_RESOLVE_PASSES {
            let body = Aabb::from_center(*centre, size);
            let Some(&first) = self.geometry.overlapping(&body).first() else {
                break;
            };

            let before = *centre;
            let push = separation(&body, &self.geometry.walls[first], *velocity);
            *centre += push;
            clamp_to_world(centre, size, bounds);

            let moved = *centre - before;
            if (moved.y > 0.0 && velocity.y < 0.0) || (moved.y < 0.0 && velocity.y > 0.0) {
                velocity.y = 0.0;
            }

            // the edge took the push back, another pass would do the same
            if moved == DVec2::ZERO {
                break;
            }
        }

        if centre.y - size.y * 0.5 <= 0.0 && velocity.y < 0.0 {
            velocity.y = 0.0;
        }

        velocity.y -= self.gravity;
    }

    pub fn can_jump(&self, body: &Aabb) -> bool {
        let probe = body.translated(DVec2::new(0.0, -GROUND_PROBE_DISTANCE));
        probe.bottom() < 0.0 || self.geometry.any_overlapping(&probe)
    }

    pub fn footing(&self, body: &Aabb) -> Footing {
        if self.can_jump(body) {
            Footing::Grounded
        } else {
            Footing::Airborne
        }
    }
}

/// Offset that moves `body` out of `wall`.
///
/// The push goes along the axis the body crossed this tick; when that is
/// unclear (a corner, or it started inside) the shallower axis is used.
fn separation(body: &Aabb, wall: &Aabb, velocity: DVec2) -> DVec2 {
    let previous = body.translated(-velocity);
    let depth = body.penetration(wall);

    let vertical = match (previous.overlaps_x(wall), previous.overlaps_y(wall)) {
        (true, false) => true,
        (false, true) => false,
        _ => depth.y <= depth.x,
    };

    if vertical {
        let dir = if body.center().y >= wall.center().y { 1.0 } else { -1.0 };
        DVec2::new(0.0, dir * depth.y)
    } else {
        let dir = if body.center().x >= wall.center().x { 1.0 } else { -1.0 };
        DVec2::new(dir * depth.x, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{GRAVITY, PLAYER_SIZE};

    fn bounds() -> WorldBounds {
        WorldBounds::new(1280.0, 720.0)
    }

    fn tile(x: f64, y: f64) -> Aabb {
        Aabb::from_center(DVec2::new(x, y), DVec2::splat(64.0))
    }

    fn ground() -> PlatformerPhysics {
        let mut walls: Vec<_> = (0..1250).step_by(64).map(|x| tile(x as f64, 32.0)).collect();
        walls.push(tile(256.0, 96.0));
        PlatformerPhysics::new(StaticGeometry::new(walls), GRAVITY)
    }

    #[test]
    fn clamp_snaps_the_left_edge() {
        let mut centre = DVec2::new(43.0, 300.0);
        clamp_to_world(&mut centre, PLAYER_SIZE, &bounds());

        assert_eq!(centre, DVec2::new(48.0, 300.0));
    }

    #[test]
    fn clamp_snaps_the_right_and_top_edges() {
        let mut centre = DVec2::new(1300.0, 700.0);
        clamp_to_world(&mut centre, PLAYER_SIZE, &bounds());

        assert_eq!(centre, DVec2::new(1279.0 - 48.0, 719.0 - 64.0));
    }

    #[test]
    fn clamp_fixes_only_one_edge_per_axis() {
        // wider and taller than the world: only left and bottom are corrected
        let size = DVec2::new(2000.0, 1000.0);
        let mut centre = DVec2::new(640.0, 360.0);
        clamp_to_world(&mut centre, size, &bounds());

        let body = Aabb::from_center(centre, size);
        assert_eq!(body.left(), 0.0);
        assert_eq!(body.bottom(), 0.0);
        assert!(body.right() > 1279.0);
        assert!(body.top() > 719.0);
    }

    #[test]
    fn landing_cancels_the_fall() {
        let physics = ground();
        // sank 3px into the grass after falling at 3px/tick
        let mut centre = DVec2::new(600.0, 125.0);
        let mut velocity = DVec2::new(0.0, -3.0);

        physics.update(&mut centre, &mut velocity, PLAYER_SIZE, &bounds());

        assert_eq!(centre, DVec2::new(600.0, 128.0));
        assert_eq!(velocity, DVec2::new(0.0, -GRAVITY));
    }

    #[test]
    fn walking_into_a_crate_keeps_horizontal_speed() {
        let physics = ground();
        // crate spans x 224..288, player moved right by 5 into it
        let mut centre = DVec2::new(224.0 - 48.0 + 3.0, 128.0);
        let mut velocity = DVec2::new(5.0, 0.0);

        physics.update(&mut centre, &mut velocity, PLAYER_SIZE, &bounds());

        assert_eq!(centre, DVec2::new(176.0, 128.0));
        assert_eq!(velocity.x, 5.0);
    }

    #[test]
    fn bumping_a_ceiling_stops_the_rise() {
        let ceiling = tile(600.0, 400.0);
        let physics = PlatformerPhysics::new(StaticGeometry::new(vec![ceiling]), GRAVITY);
        // top edge went 4px into the ceiling's bottom (368)
        let mut centre = DVec2::new(600.0, 368.0 - 64.0 + 4.0);
        let mut velocity = DVec2::new(0.0, 10.0);

        physics.update(&mut centre, &mut velocity, PLAYER_SIZE, &bounds());

        assert_eq!(centre.y, 304.0);
        assert_eq!(velocity.y, -GRAVITY);
    }

    #[test]
    fn floor_of_the_world_holds_the_player() {
        let physics = PlatformerPhysics::new(StaticGeometry::new(vec![]), GRAVITY);
        let mut centre = DVec2::new(300.0, 64.0);
        let mut velocity = DVec2::new(0.0, -7.0);

        physics.update(&mut centre, &mut velocity, PLAYER_SIZE, &bounds());
        assert_eq!(velocity.y, -GRAVITY);

        let body = Aabb::from_center(centre, PLAYER_SIZE);
        assert_eq!(physics.footing(&body), Footing::Grounded);
    }

    #[test]
    fn push_out_stops_at_the_world_edge() {
        // 120 wide wall ending 40px before the right edge of a 400 wide world
        let wall = Aabb::from_center(DVec2::new(300.0, 200.0), DVec2::new(120.0, 400.0));
        let physics = PlatformerPhysics::new(StaticGeometry::new(vec![wall]), GRAVITY);
        let bounds = WorldBounds::new(400.0, 720.0);
        let mut centre = DVec2::new(399.0 - 48.0, 200.0);
        let mut velocity = DVec2::new(5.0, 0.0);

        physics.update(&mut centre, &mut velocity, PLAYER_SIZE, &bounds);

        let body = Aabb::from_center(centre, PLAYER_SIZE);
        assert_eq!(body.right(), 399.0);
        assert!(body.intersects(&wall));
        assert_eq!(velocity.x, 5.0);
    }

    #[test]
    fn standing_on_grass_is_grounded() {
        let physics = ground();

        let standing = Aabb::from_center(DVec2::new(64.0, 128.0), PLAYER_SIZE);
        assert!(physics.can_jump(&standing));

        let hovering = standing.translated(DVec2::new(0.0, 4.0));
        assert!(physics.can_jump(&hovering));

        let jumping = standing.translated(DVec2::new(0.0, 20.0));
        assert_eq!(physics.footing(&jumping), Footing::Airborne);
    }

    #[test]
    fn standing_on_a_crate_is_grounded() {
        let physics = ground();
        // crate top is at 128
        let on_crate = Aabb::from_center(DVec2::new(256.0, 192.0), PLAYER_SIZE);

        assert!(physics.can_jump(&on_crate));
    }

    #[test]
    fn overlapping_reports_each_wall_once() {
        let physics = ground();
        let hits = physics
            .geometry()
            .overlapping(&Aabb::from_center(DVec2::new(64.0, 60.0), PLAYER_SIZE));

        assert_eq!(hits, vec![0, 1, 2]);
    }

    proptest! {
        #[test]
        fn clamped_body_stays_in_the_world(x in -5000.0f64..5000.0, y in -5000.0f64..5000.0) {
            let mut centre = DVec2::new(x, y);
            clamp_to_world(&mut centre, PLAYER_SIZE, &bounds());

            let body = Aabb::from_center(centre, PLAYER_SIZE);
            prop_assert!(body.left() >= 0.0);
            prop_assert!(body.right() <= 1279.0);
            prop_assert!(body.bottom() >= 0.0);
            prop_assert!(body.top() <= 719.0);
        }
    }
}
