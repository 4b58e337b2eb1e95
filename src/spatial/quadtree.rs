//! Region quadtree over rectangles.
//!
//! Each bucket holds the items that fit entirely inside it. When a bucket
//! holds more than `max_objects` items and is shallower than `max_levels`, it
//! splits into four equal quadrants and pushes down every item that lies
//! strictly on one side of both midpoints. Items straddling a midpoint stay in
//! the parent bucket.
//!
//! Items moved down during a split are placed without re-checking the child's
//! capacity; a child splits on the next insert that lands in it. A cluster of
//! items therefore causes one split at a time rather than a cascade.
//!
//! Quadrants are numbered 0 = top-right, 1 = top-left, 2 = bottom-left,
//! 3 = bottom-right.

use crate::geometry::Rect;

#[derive(Debug, Clone)]
struct Item<T> {
    bounds: Rect,
    value: T,
}

/// A quadtree storing values of `T` keyed by their bounds.
#[derive(Debug, Clone)]
pub struct Quadtree<T> {
    bounds: Rect,
    max_objects: usize,
    max_levels: usize,
    level: usize,
    items: Vec<Item<T>>,
    nodes: Vec<Quadtree<T>>,
    total: usize,
}

impl<T> Quadtree<T> {
    /// Create an empty tree covering `bounds`.
    pub fn new(bounds: Rect, max_objects: usize, max_levels: usize) -> Self {
        Self::at_level(bounds, max_objects, max_levels, 0)
    }

    fn at_level(bounds: Rect, max_objects: usize, max_levels: usize, level: usize) -> Self {
        Self {
            bounds,
            max_objects,
            max_levels,
            level,
            items: Vec::new(),
            nodes: Vec::new(),
            total: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Depth of this bucket; the root is level 0.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Number of items stored in this bucket and below.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of sub-buckets below this one.
    pub fn total_nodes(&self) -> usize {
        self.nodes.iter().map(|node| 1 + node.total_nodes()).sum()
    }

    /// Items held directly by this bucket.
    pub fn local_len(&self) -> usize {
        self.items.len()
    }

    /// The four quadrants, or an empty slice before the first split.
    pub fn quadrants(&self) -> &[Quadtree<T>] {
        &self.nodes
    }

    /// Remove every item and collapse the tree back to a single bucket.
    pub fn clear(&mut self) {
        self.items.clear();
        self.nodes.clear();
        self.total = 0;
    }

    /// Insert `value` with the given bounds.
    pub fn insert(&mut self, bounds: Rect, value: T) {
        self.total += 1;
        if !self.nodes.is_empty() {
            if let Some(index) = self.index_of(bounds) {
                self.nodes[index].insert(bounds, value);
                return;
            }
        }
        self.items.push(Item { bounds, value });

        if self.items.len() > self.max_objects && self.level < self.max_levels {
            if self.nodes.is_empty() {
                self.split();
            }
            self.push_down();
        }
    }

    /// Every item that could intersect `query`. May include false positives.
    pub fn retrieve(&self, query: Rect) -> Vec<&T> {
        let mut found = Vec::new();
        self.collect(query, &mut found);
        found
    }

    /// Items whose bounds actually intersect `query`.
    pub fn retrieve_intersections(&self, query: Rect) -> Vec<&T> {
        let mut found = Vec::new();
        self.collect_items(query, &mut |item| {
            if item.bounds.intersects(query) {
                found.push(&item.value);
            }
        });
        found
    }

    fn collect<'a>(&'a self, query: Rect, found: &mut Vec<&'a T>) {
        self.collect_items(query, &mut |item| found.push(&item.value));
    }

    fn collect_items<'a>(&'a self, query: Rect, visit: &mut impl FnMut(&'a Item<T>)) {
        for item in &self.items {
            visit(item);
        }
        if self.nodes.is_empty() {
            return;
        }
        match self.index_of(query) {
            Some(index) => self.nodes[index].collect_items(query, visit),
            None => {
                for node in &self.nodes {
                    node.collect_items(query, visit);
                }
            }
        }
    }

    fn split(&mut self) {
        let half_width = self.bounds.width() / 2.0;
        let half_height = self.bounds.height() / 2.0;
        let x = self.bounds.x();
        let y = self.bounds.y();
        let level = self.level + 1;
        log::trace!("quadtree split at level {} over {:?}", self.level, self.bounds);
        self.nodes = [
            Rect::new(x + half_width, y, half_width, half_height),
            Rect::new(x, y, half_width, half_height),
            Rect::new(x, y + half_height, half_width, half_height),
            Rect::new(x + half_width, y + half_height, half_width, half_height),
        ]
        .into_iter()
        .map(|bounds| Self::at_level(bounds, self.max_objects, self.max_levels, level))
        .collect();
    }

    /// Move every local item that fits a quadrant into it.
    fn push_down(&mut self) {
        let items = std::mem::take(&mut self.items);
        for item in items {
            match self.index_of(item.bounds) {
                Some(index) => self.nodes[index].place(item),
                None => self.items.push(item),
            }
        }
    }

    /// Store an item in the finest existing bucket that fits it, without splitting.
    fn place(&mut self, item: Item<T>) {
        self.total += 1;
        if !self.nodes.is_empty() {
            if let Some(index) = self.index_of(item.bounds) {
                self.nodes[index].place(item);
                return;
            }
        }
        self.items.push(item);
    }

    /// The quadrant `rect` lies strictly inside, if any.
    fn index_of(&self, rect: Rect) -> Option<usize> {
        let vertical_mid = self.bounds.x() + self.bounds.width() / 2.0;
        let horizontal_mid = self.bounds.y() + self.bounds.height() / 2.0;

        let top = rect.y() < horizontal_mid && rect.bottom() < horizontal_mid;
        let bottom = rect.y() > horizontal_mid && rect.bottom() > horizontal_mid;
        let left = rect.x() < vertical_mid && rect.right() < vertical_mid;
        let right = rect.x() > vertical_mid && rect.right() > vertical_mid;

        match (left, right, top, bottom) {
            (true, _, true, _) => Some(1),
            (true, _, _, true) => Some(2),
            (_, true, true, _) => Some(0),
            (_, true, _, true) => Some(3),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tree() -> Quadtree<usize> {
        Quadtree::new(Rect::new(0.0, 0.0, 1000.0, 1000.0), 4, 8)
    }

    #[test]
    fn empty_tree() {
        let qt = tree();
        assert!(qt.is_empty());
        assert_eq!(qt.total_nodes(), 0);
        assert!(qt.retrieve(Rect::new(10.0, 10.0, 0.0, 0.0)).is_empty());
    }

    #[test]
    fn no_split_at_capacity() {
        let mut qt = tree();
        for i in 0..4 {
            qt.insert(Rect::new(10.0 * i as f64, 10.0, 5.0, 5.0), i);
        }
        assert_eq!(qt.total_nodes(), 0);
        assert_eq!(qt.local_len(), 4);
    }

    #[test]
    fn clustered_objects_split_once() {
        let mut qt = tree();
        for i in 0..5 {
            let offset = 20.0 * i as f64;
            qt.insert(Rect::new(100.0 + offset, 100.0 + offset, 10.0, 10.0), i);
        }
        assert_eq!(qt.total_nodes(), 4);
        assert_eq!(qt.len(), 5);
        assert_eq!(qt.local_len(), 0);
        assert_eq!(qt.quadrants()[1].local_len(), 5);

        // A point in the opposite quadrant sees none of them.
        assert!(qt.retrieve(Rect::new(900.0, 900.0, 0.0, 0.0)).is_empty());
        assert_eq!(qt.retrieve(Rect::new(105.0, 105.0, 0.0, 0.0)).len(), 5);
    }

    #[test]
    fn next_insert_into_full_child_splits_it() {
        let mut qt = tree();
        for i in 0..6 {
            let offset = 20.0 * i as f64;
            qt.insert(Rect::new(100.0 + offset, 100.0 + offset, 10.0, 10.0), i);
        }
        assert_eq!(qt.total_nodes(), 8);
        assert_eq!(qt.quadrants()[1].quadrants()[1].local_len(), 6);
    }

    #[test]
    fn straddling_items_stay_in_parent() {
        let mut qt = tree();
        for i in 0..4 {
            qt.insert(Rect::new(100.0 + i as f64, 100.0, 5.0, 5.0), i);
        }
        // Crosses the vertical midpoint.
        qt.insert(Rect::new(490.0, 100.0, 20.0, 20.0), 99);
        assert_eq!(qt.total_nodes(), 4);
        assert_eq!(qt.local_len(), 1);
        // Always returned because it lives at the top.
        assert_eq!(qt.retrieve(Rect::new(900.0, 900.0, 0.0, 0.0)), vec![&99]);
    }

    #[test]
    fn item_on_midpoint_is_not_pushed_down() {
        let mut qt = tree();
        for i in 0..5 {
            qt.insert(Rect::new(500.0, 100.0 + i as f64, 0.0, 0.0), i);
        }
        assert_eq!(qt.local_len(), 5);
    }

    #[test]
    fn max_levels_caps_depth() {
        let mut qt: Quadtree<usize> = Quadtree::new(Rect::new(0.0, 0.0, 1000.0, 1000.0), 1, 1);
        for i in 0..10 {
            qt.insert(Rect::new(10.0 + i as f64, 10.0, 1.0, 1.0), i);
        }
        assert_eq!(qt.total_nodes(), 4);
        assert_eq!(qt.quadrants()[1].level(), 1);
        assert_eq!(qt.quadrants()[1].local_len(), 10);
    }

    #[test]
    fn retrieve_intersections_filters_candidates() {
        let mut qt = tree();
        qt.insert(Rect::new(0.0, 0.0, 100.0, 100.0), 0);
        qt.insert(Rect::new(200.0, 200.0, 10.0, 10.0), 1);
        let hits = qt.retrieve_intersections(Rect::new(50.0, 50.0, 0.0, 0.0));
        assert_eq!(hits, vec![&0]);
        // Touching edges count.
        let touching = qt.retrieve_intersections(Rect::new(100.0, 100.0, 5.0, 5.0));
        assert_eq!(touching, vec![&0]);
    }

    #[test]
    fn clear_resets() {
        let mut qt = tree();
        for i in 0..20 {
            qt.insert(Rect::new(i as f64 * 40.0, i as f64 * 40.0, 5.0, 5.0), i);
        }
        assert!(qt.total_nodes() > 0);
        qt.clear();
        assert!(qt.is_empty());
        assert_eq!(qt.total_nodes(), 0);
    }

    /// Small deterministic generator for property checks.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> f64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (self.0 >> 33) as f64 / (1u64 << 31) as f64
        }

        fn rect(&mut self, max_extent: f64) -> Rect {
            let x = self.next() * 1100.0 - 50.0;
            let y = self.next() * 1100.0 - 50.0;
            Rect::new(x, y, self.next() * max_extent, self.next() * max_extent)
        }
    }

    #[test]
    fn retrieve_never_misses_an_intersecting_item() {
        let mut rng = Lcg(7);
        for round in 0..20 {
            let mut qt: Quadtree<usize> =
                Quadtree::new(Rect::new(0.0, 0.0, 1000.0, 1000.0), 1 + round % 5, 1 + round % 8);
            let rects: Vec<Rect> = (0..200).map(|_| rng.rect(120.0)).collect();
            for (i, rect) in rects.iter().enumerate() {
                qt.insert(*rect, i);
            }
            assert_eq!(qt.len(), rects.len());

            for _ in 0..100 {
                let query = if rng.next() < 0.5 {
                    rng.rect(0.0)
                } else {
                    rng.rect(80.0)
                };
                let candidates = qt.retrieve(query);
                for (i, rect) in rects.iter().enumerate() {
                    if rect.intersects(query) {
                        assert!(
                            candidates.contains(&&i),
                            "item {i} at {rect:?} missed for query {query:?}"
                        );
                    }
                }
            }
        }
    }
}
