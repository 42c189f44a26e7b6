//! Property-based invariant tests for the scene graph.
//!
//! 1. `node_count` equals the number of nodes reachable from the root plus
//!    detached subtrees that were never removed.
//! 2. Removing a subtree invalidates every handle inside it.
//! 3. A hit is only reported inside the world bounds of a tagged node.
//! 4. Hidden subtrees never produce hits.

use proptest::prelude::*;
use rankbar_core::geometry::{Point, Rect};
use rankbar_render::scene::RectShape;
use rankbar_render::{HitId, HitRegion, NodeId, Rgba, Scene};

fn subtree_size(scene: &Scene, id: NodeId) -> usize {
    1 + scene
        .children(id)
        .iter()
        .map(|&child| subtree_size(scene, child))
        .sum::<usize>()
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (0.0f64..200.0, 0.0f64..200.0, 1.0f64..80.0, 1.0f64..80.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn node_count_matches_tree(groups in 1usize..10, per_group in 0usize..10) {
        let mut scene = Scene::new(400.0, 400.0);
        let root = scene.root();
        for _ in 0..groups {
            let g = scene.add_group(root);
            for _ in 0..per_group {
                scene.add_rect(g, RectShape::new(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba::BLACK));
            }
        }
        prop_assert_eq!(scene.node_count(), subtree_size(&scene, root));
        prop_assert_eq!(scene.node_count(), 1 + groups * (1 + per_group));
    }
}

proptest! {
    #[test]
    fn removal_invalidates_handles(depth in 1usize..8, victim in 0usize..8) {
        let mut scene = Scene::new(100.0, 100.0);
        let mut chain = vec![scene.root()];
        for _ in 0..depth {
            let parent = *chain.last().unwrap();
            chain.push(scene.add_group(parent));
        }
        let victim = 1 + victim % depth;
        prop_assert!(scene.remove(chain[victim]));
        for (i, id) in chain.iter().enumerate() {
            prop_assert_eq!(scene.contains(*id), i < victim);
        }
        prop_assert_eq!(scene.node_count(), victim);
    }
}

proptest! {
    #[test]
    fn hits_stay_inside_world_bounds(
        bounds in rect_strategy(),
        dx in -50.0f64..50.0,
        dy in -50.0f64..50.0,
        px in -100.0f64..400.0,
        py in -100.0f64..400.0,
    ) {
        let mut scene = Scene::new(400.0, 400.0);
        let root = scene.root();
        let group = scene.add_group(root);
        scene.set_translate(group, dx, dy);
        let rect = scene.add_rect(group, RectShape::new(bounds, Rgba::WHITE));
        scene.set_hit(rect, HitId::new(9), HitRegion::Content, 3);

        let world = scene.world_bounds(rect).unwrap();
        let hit = scene.hit_test(Point::new(px, py));
        prop_assert_eq!(hit.is_some(), world.contains(Point::new(px, py)));
    }
}

proptest! {
    #[test]
    fn hidden_subtrees_never_hit(bounds in rect_strategy(), px in 0.0f64..300.0, py in 0.0f64..300.0) {
        let mut scene = Scene::new(400.0, 400.0);
        let root = scene.root();
        let group = scene.add_group(root);
        let rect = scene.add_rect(group, RectShape::new(bounds, Rgba::WHITE));
        scene.set_hit(rect, HitId::new(1), HitRegion::Content, 0);
        scene.set_visible(group, false);
        prop_assert_eq!(scene.hit_test(Point::new(px, py)), None);
    }
}
