use crate::collision::Aabb;

const MAX_DEPTH: usize = 8;

/// Make sure not to put a big object as the generic
/// type parameter since there's a lot of cloning.
///
/// A box that straddles a split is stored in every child it touches,
/// so [`QuadTree::query`] can report the same item more than once.
#[derive(Debug, Clone)]
pub struct QuadTree<T: Clone> {
    boundary: Aabb,
    capacity: usize,
    depth: usize,
    items: Vec<(Aabb, T)>,
    children: Option<Box<[QuadTree<T>; 4]>>,
}

impl<T: Clone> QuadTree<T> {
    pub fn new(capacity: usize, boundary: Aabb) -> Self {
        Self::with_depth(capacity, boundary, 0)
    }

    fn with_depth(capacity: usize, boundary: Aabb, depth: usize) -> Self {
        Self {
            capacity,
            boundary,
            depth,
            items: Vec::with_capacity(capacity),
            children: None,
        }
    }

    pub fn boundary(&self) -> Aabb {
        self.boundary
    }

    /// Number of stored entries, counting every copy of a straddling box.
    pub fn len(&self) -> usize {
        self.items.len()
            + self
                .children
                .as_ref()
                .map(|i| i.iter().map(|i| i.len()).sum())
                .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get all the items whose box intersects the specified area
    pub fn query(&self, area: &Aabb) -> Vec<T> {
        let mut found = vec![];
        self.query_into(area, &mut found);
        found
    }

    fn query_into(&self, area: &Aabb, found: &mut Vec<T>) {
        if !self.boundary.touches(area) {
            return;
        }

        found.extend(
            self.items
                .iter()
                .filter(|(bounds, _)| bounds.intersects(area))
                .map(|(_, data)| data.clone()),
        );

        if let Some(children) = &self.children {
            children.iter().for_each(|c| c.query_into(area, found));
        }
    }

    pub fn push(&mut self, item: (Aabb, T)) {
        if !self.boundary.touches(&item.0) {
            return;
        }

        if self.items.len() < self.capacity || self.depth >= MAX_DEPTH {
            self.items.push(item);
            return;
        }

        // sub-divide into 4 parts

        if self.children.is_none() {
            let Aabb { min, max } = self.boundary;
            let mid = self.boundary.center();
            let depth = self.depth + 1;
            let capacity = self.capacity;

            self.children = Some(Box::new([
                // bottom left
                QuadTree::with_depth(capacity, Aabb::new(min, mid), depth),
                // bottom right
                QuadTree::with_depth(
                    capacity,
                    Aabb::new((mid.x, min.y).into(), (max.x, mid.y).into()),
                    depth,
                ),
                // top left
                QuadTree::with_depth(
                    capacity,
                    Aabb::new((min.x, mid.y).into(), (mid.x, max.y).into()),
                    depth,
                ),
                // top right
                QuadTree::with_depth(capacity, Aabb::new(mid, max), depth),
            ]));
        }

        if let Some(children) = self.children.as_mut() {
            children.iter_mut().for_each(|c| c.push(item.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;

    fn tile(x: f64, y: f64) -> Aabb {
        Aabb::from_center(DVec2::new(x, y), DVec2::splat(64.0))
    }

    fn world() -> Aabb {
        Aabb::new(DVec2::ZERO, DVec2::new(1280.0, 720.0))
    }

    #[test]
    fn finds_only_intersecting_items() {
        let mut qt = QuadTree::new(4, world());
        for (i, x) in (0..1250).step_by(64).enumerate() {
            qt.push((tile(x as f64, 32.0), i));
        }

        let mut hits = qt.query(&tile(70.0, 60.0));
        hits.sort_unstable();
        hits.dedup();

        assert_eq!(hits, vec![1, 2]);
        assert!(qt.query(&tile(640.0, 400.0)).is_empty());
    }

    #[test]
    fn straddling_items_are_not_lost() {
        let mut qt = QuadTree::new(1, world());
        qt.push((tile(100.0, 100.0), 'a'));
        qt.push((tile(640.0, 360.0), 'b'));
        qt.push((tile(1000.0, 600.0), 'c'));

        assert!(qt.query(&tile(640.0, 300.0)).contains(&'b'));
        assert!(qt.query(&tile(680.0, 400.0)).contains(&'b'));
    }

    #[test]
    fn items_outside_the_boundary_are_dropped() {
        let mut qt = QuadTree::new(4, world());
        qt.push((tile(-200.0, -200.0), 0));

        assert!(qt.is_empty());
    }

    #[test]
    fn stacked_items_stop_splitting() {
        let mut qt = QuadTree::new(1, world());
        for i in 0..32 {
            qt.push((tile(10.0, 10.0), i));
        }

        let mut hits = qt.query(&tile(10.0, 10.0));
        hits.sort_unstable();
        hits.dedup();

        assert_eq!(hits.len(), 32);
    }
}
