// Copyright @yucwang 2021

use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

#[derive(Debug, Clone, Copy)]
enum BVHChild {
    Interior(usize),
    Leaf(usize),
}

#[derive(Debug, Clone, Copy)]
struct BVHNode {
    bounds: AABB,
    /// Split axis chosen at build time; traversal orders children by the
    /// ray direction's sign on this axis.
    axis: usize,
    left: BVHChild,
    right: BVHChild,
}

/// Median-split bounding volume hierarchy. Stores only primitive bounds and
/// centroids; intersection is delegated to callbacks so the same tree serves
/// closest-hit and any-hit queries.
pub struct BVH {
    nodes: Vec<BVHNode>,
    root: Option<BVHChild>,
    prim_bounds: Vec<AABB>,
    prim_centroids: Vec<Vector3f>,
}

impl BVH {
    pub fn new(prim_bounds: Vec<AABB>, prim_centroids: Vec<Vector3f>) -> Self {
        debug_assert_eq!(prim_bounds.len(), prim_centroids.len());

        let mut bvh = Self {
            nodes: Vec::new(),
            root: None,
            prim_bounds,
            prim_centroids,
        };

        if !bvh.prim_bounds.is_empty() {
            let mut indices: Vec<usize> = (0..bvh.prim_bounds.len()).collect();
            let root = bvh.build(&mut indices);
            bvh.root = Some(root);
        }

        bvh
    }

    /// Closest hit reported by `hit_fn`. The callback receives a ray whose
    /// `max_t` is already tightened to the best hit found so far, so
    /// primitives beyond it can reject cheaply.
    pub fn ray_intersection<F, T>(&self, ray: &Ray3f, mut hit_fn: F) -> Option<(usize, T)>
    where
        F: FnMut(usize, &Ray3f) -> Option<(T, Float)>,
    {
        let root = self.root?;
        let mut closest: Option<(usize, T, Float)> = None;
        self.visit(&root, ray, &mut closest, &mut hit_fn);
        closest.map(|(idx, hit, _)| (idx, hit))
    }

    fn visit<F, T>(&self, child: &BVHChild, ray: &Ray3f,
                   closest: &mut Option<(usize, T, Float)>, hit_fn: &mut F)
    where
        F: FnMut(usize, &Ray3f) -> Option<(T, Float)>,
    {
        let closest_t = closest.as_ref().map_or(ray.max_t, |c| c.2);
        let probe = ray.clipped(closest_t);

        match *child {
            BVHChild::Leaf(prim_idx) => {
                if let Some((hit, t)) = hit_fn(prim_idx, &probe) {
                    if t < closest_t {
                        *closest = Some((prim_idx, hit, t));
                    }
                }
            }
            BVHChild::Interior(node_idx) => {
                let node = &self.nodes[node_idx];
                if !node.bounds.ray_intersect(&probe) {
                    return;
                }

                // Front-to-back: the child on the near side of the split
                // axis first, so its hits shrink the interval before the
                // far child is tested.
                let (first, second) = if ray.dir()[node.axis] >= 0.0 {
                    (&node.left, &node.right)
                } else {
                    (&node.right, &node.left)
                };
                self.visit(first, ray, closest, hit_fn);
                self.visit(second, ray, closest, hit_fn);
            }
        }
    }

    /// Early-out traversal for shadow rays.
    pub fn ray_intersection_t<F>(&self, ray: &Ray3f, mut hit_fn: F) -> bool
    where
        F: FnMut(usize, &Ray3f) -> bool,
    {
        let root = match self.root {
            Some(root) => root,
            None => return false,
        };

        let mut stack = vec![root];
        while let Some(child) = stack.pop() {
            match child {
                BVHChild::Leaf(prim_idx) => {
                    if hit_fn(prim_idx, ray) {
                        return true;
                    }
                }
                BVHChild::Interior(node_idx) => {
                    let node = &self.nodes[node_idx];
                    if node.bounds.ray_intersect(ray) {
                        stack.push(node.left);
                        stack.push(node.right);
                    }
                }
            }
        }

        false
    }

    fn build(&mut self, indices: &mut [usize]) -> BVHChild {
        if indices.len() == 1 {
            return BVHChild::Leaf(indices[0]);
        }

        let mut bounds = AABB::default();
        let mut centroid_bounds = AABB::default();
        for &idx in indices.iter() {
            bounds.expand_by_aabb(&self.prim_bounds[idx]);
            centroid_bounds.expand_by_point(&self.prim_centroids[idx]);
        }
        let axis = centroid_bounds.max_extent();

        // Median split: sort by centroid along the widest axis and cut the
        // range in half. Stable sort keeps the build deterministic when
        // centroids coincide.
        let centroids = &self.prim_centroids;
        indices.sort_by(|&a, &b| {
            centroids[a][axis].partial_cmp(&centroids[b][axis])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = indices.len() / 2;
        let (left_indices, right_indices) = indices.split_at_mut(mid);
        let left = self.build(left_indices);
        let right = self.build(right_indices);

        let node_idx = self.nodes.len();
        self.nodes.push(BVHNode { bounds, axis, left, right });
        BVHChild::Interior(node_idx)
    }
}
