use crate::graph::{NodeId, Storage};
use crate::shape::ShapeMasses;
use crate::vector::{Gradient, Vec2};

const AXIS_NORMALS: [Vec2; 4] = [Vec2 { x: 1.0, y: 0.0 }, Vec2 { x: -1.0, y: 0.0 }, Vec2 { x: 0.0, y: 1.0 }, Vec2 { x: 0.0, y: -1.0 }];

/// For every direct child of `parent`, locates its support point along each
/// of the four axis normals and applies the parent's boundary constraint
/// there (offset inward by `padding`), growing the parent (per `expansion`)
/// only where containment is currently violated. The support-point gradient
/// is translated back onto the child's own center, since a rigid
/// translation moves a convex shape's support point identically.
pub fn constrain_shapes_within(storage: &Storage, parent: NodeId, padding: f64, expansion: f64) -> Vec<Gradient> {
    let parent_node = storage.node(parent);
    let parent_center = storage.point(parent_node.center);
    let parent_control = storage.point(parent_node.shape.control);
    let parent_mass = storage.mass(parent_node.center);
    let parent_shape = parent_node.shape;

    let mut out = Vec::new();
    for &child in &parent_node.children {
        let child_node = storage.node(child);
        let child_center = storage.point(child_node.center);
        let child_control = storage.point(child_node.shape.control);
        let masses = ShapeMasses::new(storage.mass(child_node.center), parent_mass);

        for &axis in &AXIS_NORMALS {
            let support = child_node.shape.support(child_center, child_control, axis);
            let (point_delta, center_delta, control_delta) =
                parent_shape.constrain_shape_within(parent_center, parent_control, support, masses, expansion, padding);

            if point_delta != Vec2::zero() {
                out.push(Gradient::new(child_node.center, point_delta));
            }
            if center_delta != Vec2::zero() {
                out.push(Gradient::new(parent_node.center, center_delta));
            }
            if control_delta != Vec2::zero() {
                out.push(Gradient::new(parent_node.shape.control, control_delta));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;
    use crate::shape::{Preserve, Shape, ShapeType};

    fn rect_node(storage: &mut Storage, id: &str, center: Vec2, half: Vec2, parent: Option<NodeId>) -> NodeId {
        let center_id = storage.alloc_point(center, 1.0);
        let control_id = storage.alloc_point(half, 1.0);
        let node_id = NodeId(storage.nodes.len());
        storage.nodes.push(Node {
            id: id.to_string(),
            center: center_id,
            shape: Shape::new(ShapeType::Rectangle, control_id, Preserve::None, half),
            fixed: false,
            parent,
            children: Vec::new(),
            ports: Vec::new(),
            metadata: Default::default(),
        });
        storage.node_index.insert(id.to_string(), node_id);
        if let Some(p) = parent {
            storage.node_mut(p).children.push(node_id);
        }
        node_id
    }

    #[test]
    fn no_gradients_when_children_already_contained() {
        let mut storage = Storage::new();
        let parent = rect_node(&mut storage, "p", Vec2::zero(), Vec2::new(10.0, 10.0), None);
        rect_node(&mut storage, "c", Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0), Some(parent));
        assert!(constrain_shapes_within(&storage, parent, 0.0, 1.0).is_empty());
    }

    #[test]
    fn grows_parent_when_child_escapes() {
        let mut storage = Storage::new();
        let parent = rect_node(&mut storage, "p", Vec2::zero(), Vec2::new(2.0, 2.0), None);
        rect_node(&mut storage, "c", Vec2::new(5.0, 0.0), Vec2::new(1.0, 1.0), Some(parent));
        let gradients = constrain_shapes_within(&storage, parent, 0.0, 1.0);
        assert!(!gradients.is_empty());
    }
}
