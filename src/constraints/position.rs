use crate::constraints::{distance::constrain_offset, Op};
use crate::graph::{NodeId, Storage};
use crate::shape::split_inverse_mass;
use crate::vector::{Gradient, Vec2, ZERO_THRESHOLD};

fn subtree_translation(storage: &Storage, node: NodeId, delta: Vec2) -> Vec<Gradient> {
    let mut out = vec![Gradient::new(storage.node(node).center, delta)];
    for descendant in storage.descendants(node) {
        out.push(Gradient::new(storage.node(descendant).center, delta));
    }
    out
}

/// If `u` and `v`'s shape bounds overlap, separates them along whichever
/// axis (x or y) needs the smaller correction. Descendants are translated
/// by the same delta as their moved ancestor, so nested layouts don't warp.
pub fn position_no_overlap(storage: &Storage, u: NodeId, v: NodeId) -> Vec<Gradient> {
    let nu = storage.node(u);
    let nv = storage.node(v);
    let cu = storage.point(nu.center);
    let cv = storage.point(nv.center);
    let bu = nu.shape.bounds(cu, storage.point(nu.shape.control));
    let bv = nv.shape.bounds(cv, storage.point(nv.shape.control));

    let dx = cv.x - cu.x;
    let dy = cv.y - cu.y;
    let needed_x = bu.width() / 2.0 + bv.width() / 2.0;
    let needed_y = bu.height() / 2.0 + bv.height() / 2.0;
    let overlap_x = needed_x - dx.abs();
    let overlap_y = needed_y - dy.abs();

    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return Vec::new();
    }

    let (wu, wv) = split_inverse_mass(storage.mass(nu.center), storage.mass(nv.center));
    let mut out = Vec::new();
    if overlap_x <= overlap_y {
        let sign = if dx >= 0.0 { 1.0 } else { -1.0 };
        out.extend(subtree_translation(storage, u, Vec2::new(-sign * overlap_x * wu, 0.0)));
        out.extend(subtree_translation(storage, v, Vec2::new(sign * overlap_x * wv, 0.0)));
    } else {
        let sign = if dy >= 0.0 { 1.0 } else { -1.0 };
        out.extend(subtree_translation(storage, u, Vec2::new(0.0, -sign * overlap_y * wu)));
        out.extend(subtree_translation(storage, v, Vec2::new(0.0, sign * overlap_y * wv)));
    }
    out
}

/// Constrains the projected distance between `u` and `v`'s centers along
/// the perpendicular of `axis` to zero, i.e. keeps them aligned on `axis`.
pub fn position_alignment(storage: &Storage, u: NodeId, v: NodeId, axis: Vec2) -> Vec<Gradient> {
    let nu = storage.node(u);
    let nv = storage.node(v);
    let masses = (storage.mass(nu.center), storage.mass(nv.center));
    constrain_offset(storage, nu.center, nv.center, Op::Eq, 0.0, axis.perp(), masses)
}

/// The sum of `u`'s and `v`'s half-interiors along the u→v axis: how far
/// each shape extends from its center toward the other, so `separation +
/// half_interior(u, v)` is the center-to-center distance at which their
/// boundaries are exactly `separation` apart.
pub fn half_interior(storage: &Storage, u: NodeId, v: NodeId) -> Option<f64> {
    let nu = storage.node(u);
    let nv = storage.node(v);
    let cu = storage.point(nu.center);
    let cv = storage.point(nv.center);
    let dir = (cv - cu).normalize();
    if dir == Vec2::zero() {
        return None;
    }
    let control_u = storage.point(nu.shape.control);
    let control_v = storage.point(nv.shape.control);
    let half_u = (nu.shape.boundary(cu, control_u, dir, 0.0) - cu).length();
    let half_v = (nv.shape.boundary(cv, control_v, -dir, 0.0) - cv).length();
    Some(half_u + half_v)
}

/// The gap between `u`'s and `v`'s shape boundaries along the line joining
/// their centers (negative/zero once the shapes overlap).
pub fn boundary_gap(storage: &Storage, u: NodeId, v: NodeId) -> f64 {
    let cu = storage.point(storage.node(u).center);
    let cv = storage.point(storage.node(v).center);
    match half_interior(storage, u, v) {
        Some(half) => (cv - cu).length() - half,
        None => 0.0,
    }
}

/// Constrains `u`/`v`'s center distance to `separation` plus the sum of
/// their half-interiors along the u→v axis.
pub fn position_separation(storage: &Storage, u: NodeId, v: NodeId, op: Op, separation: f64, masses: (f64, f64)) -> Vec<Gradient> {
    let nu = storage.node(u);
    let nv = storage.node(v);
    let Some(half) = half_interior(storage, u, v) else {
        return Vec::new();
    };
    let target = separation + half;
    crate::constraints::distance::constrain_distance(storage, nu.center, nv.center, op, target, None, masses)
}

/// Constrains `u`'s center to the nearest floor-grid point at spacing
/// `(dx, dy)`.
pub fn position_grid_snap(storage: &Storage, u: NodeId, dx: f64, dy: f64) -> Vec<Gradient> {
    let node = storage.node(u);
    let center = storage.point(node.center);
    let target = Vec2::new((center.x / dx).floor() * dx, (center.y / dy).floor() * dy);
    let delta = target - center;
    if delta.length() < ZERO_THRESHOLD {
        return Vec::new();
    }
    vec![Gradient::new(node.center, delta)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Preserve, Shape, ShapeType};

    fn node(storage: &mut Storage, id: &str, center: Vec2, half: Vec2) -> NodeId {
        let center_id = storage.alloc_point(center, 1.0);
        let control_id = storage.alloc_point(half, 1.0);
        let node_id = NodeId(storage.nodes.len());
        storage.nodes.push(crate::graph::Node {
            id: id.to_string(),
            center: center_id,
            shape: Shape::new(ShapeType::Rectangle, control_id, Preserve::None, half),
            fixed: false,
            parent: None,
            children: Vec::new(),
            ports: Vec::new(),
            metadata: Default::default(),
        });
        storage.node_index.insert(id.to_string(), node_id);
        node_id
    }

    #[test]
    fn no_overlap_is_empty_when_bounds_are_separated() {
        let mut storage = Storage::new();
        let u = node(&mut storage, "u", Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let v = node(&mut storage, "v", Vec2::new(10.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(position_no_overlap(&storage, u, v).is_empty());
    }

    #[test]
    fn no_overlap_separates_on_the_shorter_axis() {
        let mut storage = Storage::new();
        let u = node(&mut storage, "u", Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let v = node(&mut storage, "v", Vec2::new(1.5, 0.2), Vec2::new(1.0, 1.0));
        let g = position_no_overlap(&storage, u, v);
        assert_eq!(g.len(), 2);
        assert!(g[0].delta.x != 0.0);
        assert_eq!(g[0].delta.y, 0.0);
    }

    #[test]
    fn grid_snap_targets_the_floor_cell() {
        let mut storage = Storage::new();
        let u = node(&mut storage, "u", Vec2::new(13.0, 27.0), Vec2::new(1.0, 1.0));
        let g = position_grid_snap(&storage, u, 10.0, 10.0);
        assert_eq!(g[0].delta, Vec2::new(-3.0, -7.0));
    }
}
