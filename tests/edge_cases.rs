use obstacle_index::{Coord, Obstacle, ObstacleIndex, TraversalOrder};
use std::collections::BTreeSet;

/// Deterministic linear congruential generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn coord(&mut self, span: u64, lanes: u64) -> (i64, i64) {
        ((self.next_u64() % span) as i64, (self.next_u64() % lanes) as i64)
    }
}

fn height_bound(n: usize) -> f64 {
    1.44 * ((n + 2) as f64).log2()
}

fn keys(obstacles: &[Obstacle]) -> Vec<Coord> {
    obstacles.iter().map(Obstacle::coord).collect()
}

/// Test 1: Random insert/delete mix keeps every invariant
#[test]
fn test_random_operations_keep_invariants() {
    let mut rng = Lcg(42);
    let mut index = ObstacleIndex::new();
    let mut model = BTreeSet::new();

    for step in 0..3_000 {
        let (x, y) = rng.coord(400, 6);
        if rng.next_u64() % 3 == 0 {
            let removed = index.delete(x, y);
            assert_eq!(removed.is_some(), model.remove(&Coord::new(x, y)));
        } else {
            let inserted = index.insert(Obstacle::new(x, y, "roca"));
            assert_eq!(inserted, model.insert(Coord::new(x, y)));
        }

        if step % 100 == 0 {
            index
                .verify()
                .unwrap_or_else(|e| panic!("step {}: {}", step, e));
        }
        assert!(index.height() as f64 <= height_bound(model.len()));
    }

    index.verify().expect("final tree should be valid");
    let ordered: Vec<Coord> = model.into_iter().collect();
    assert_eq!(keys(&index.inorder()), ordered);
}

/// Test 2: Sequential inserts are the worst case for an unbalanced BST
#[test]
fn test_sequential_inserts_stay_logarithmic() {
    let mut index = ObstacleIndex::new();
    for x in 0..1_000 {
        index.insert(Obstacle::new(x, 0, "cono"));
    }

    assert_eq!(index.count(), 1_000);
    assert!(index.height() as f64 <= height_bound(1_000));
    index.verify().expect("tree should be balanced");

    // Delete from one end to force repeated rebalancing on one side
    for x in 0..900 {
        assert!(index.delete(x, 0).is_some());
    }
    assert_eq!(index.count(), 100);
    assert!(index.height() as f64 <= height_bound(100));
    index.verify().expect("tree should be balanced");
}

/// Test 3: Insert then delete restores the key set
#[test]
fn test_insert_delete_roundtrip() {
    let mut rng = Lcg(7);
    let mut index = ObstacleIndex::new();
    for _ in 0..200 {
        let (x, y) = rng.coord(1_000, 6);
        index.insert(Obstacle::new(x, y, "hueco"));
    }
    let before = keys(&index.inorder());

    assert!(index.insert(Obstacle::new(5_000, 3, "roca")));
    assert!(index.delete(5_000, 3).is_some());

    assert_eq!(index.count(), before.len());
    assert_eq!(keys(&index.inorder()), before);
    index.verify().expect("tree should be balanced");
}

/// Test 4: A second insert of the same coordinate changes nothing
#[test]
fn test_duplicate_insert_is_idempotent() {
    let mut index = ObstacleIndex::new();
    for x in [8, 3, 12, 1, 5] {
        index.insert(Obstacle::new(x, 1, "roca"));
    }
    let inorder = index.inorder();
    let preorder = index.preorder();

    assert!(!index.insert(Obstacle::new(5, 1, "aceite")));
    assert_eq!(index.count(), 5);
    assert_eq!(index.inorder(), inorder);
    assert_eq!(index.preorder(), preorder);
}

/// Test 5: All traversal orders visit the same records
#[test]
fn test_traversals_share_records() {
    let mut rng = Lcg(99);
    let mut index = ObstacleIndex::new();
    for _ in 0..300 {
        let (x, y) = rng.coord(150, 6);
        index.insert(Obstacle::new(x, y, "cono"));
    }

    let mut inorder = keys(&index.traverse(TraversalOrder::Inorder));
    let mut preorder = keys(&index.traverse(TraversalOrder::Preorder));
    let mut postorder = keys(&index.traverse(TraversalOrder::Postorder));

    assert_eq!(inorder.len(), index.count());
    assert!(inorder.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(preorder.first(), index.root().map(Obstacle::coord).as_ref());
    assert_eq!(postorder.last(), index.root().map(Obstacle::coord).as_ref());

    inorder.sort();
    preorder.sort();
    postorder.sort();
    assert_eq!(inorder, preorder);
    assert_eq!(inorder, postorder);
}

/// Test 6: Range search matches a brute-force filter
#[test]
fn test_range_search_matches_filter() {
    let mut rng = Lcg(2024);
    let mut index = ObstacleIndex::new();
    for _ in 0..500 {
        let (x, y) = rng.coord(2_000, 6);
        index.insert(Obstacle::new(x, y, "roca"));
    }
    let all = index.inorder();

    for _ in 0..50 {
        let (a, y_a) = rng.coord(2_000, 6);
        let (b, y_b) = rng.coord(2_000, 6);
        let (x_min, x_max) = (a.min(b), a.max(b));
        let (y_min, y_max) = (y_a.min(y_b), y_a.max(y_b));

        let mut found = keys(&index.range_search(x_min, x_max, y_min, y_max));
        found.sort();
        let expected: Vec<Coord> = all
            .iter()
            .map(Obstacle::coord)
            .filter(|c| (x_min..=x_max).contains(&c.x) && (y_min..=y_max).contains(&c.y))
            .collect();
        assert_eq!(found, expected);
    }
}

/// Test 7: Empty index
#[test]
fn test_empty_index_queries() {
    let mut index = ObstacleIndex::new();

    assert_eq!(index.height(), 0);
    assert_eq!(index.count(), 0);
    assert!(index.inorder().is_empty());
    assert!(index.range_search(i64::MIN, i64::MAX, i64::MIN, i64::MAX).is_empty());
    assert!(index.visible_records(0, 800).is_empty());
    assert!(index.evict_behind(10_000).is_empty());
    assert!(index.delete(0, 0).is_none());
    assert!(index.structure().is_empty());
    assert!(index.verify().is_ok());
}

/// Test 8: Extreme coordinates do not overflow
#[test]
fn test_extreme_coordinates() {
    let mut index = ObstacleIndex::new();
    index.insert(Obstacle::new(i64::MAX, 0, "roca"));
    index.insert(Obstacle::new(i64::MIN, 0, "roca"));
    index.insert(Obstacle::new(0, i64::MAX, "roca"));

    assert_eq!(index.range_search(i64::MIN, i64::MAX, 0, 0).len(), 2);
    assert_eq!(index.visible_records(i64::MAX, i64::MAX).len(), 1);
    assert_eq!(index.evict_behind(i64::MIN).len(), 0);
    assert_eq!(index.evict_behind(i64::MAX).len(), 2);
    index.verify().expect("tree should be balanced");
}

/// Test 9: Inverted bounds match nothing
#[test]
fn test_inverted_bounds() {
    let mut index = ObstacleIndex::new();
    for x in 0..10 {
        index.insert(Obstacle::new(x, 0, "cono"));
    }
    assert!(index.range_search(8, 2, 0, 5).is_empty());
    assert!(index.range_search(0, 9, 5, 0).is_empty());
}

/// Test 10: Same x in every lane relies on the y tiebreak
#[test]
fn test_single_column_all_lanes() {
    let mut index = ObstacleIndex::new();
    for y in (0..6).rev() {
        index.insert(Obstacle::new(100, y, "aceite"));
    }

    assert_eq!(index.count(), 6);
    assert_eq!(
        keys(&index.inorder()),
        (0..6).map(|y| Coord::new(100, y)).collect::<Vec<_>>()
    );
    assert_eq!(index.range_search(100, 100, 2, 3).len(), 2);
    index.verify().expect("tree should be balanced");
}
