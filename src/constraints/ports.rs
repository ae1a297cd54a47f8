use crate::constraints::{constrain_distance, constrain_offset, Op, PORT_MASS_BIAS};
use crate::graph::port::Location;
use crate::graph::{NodeId, Storage};
use crate::vector::{Gradient, Vec2};

/// Default minimum tangential spacing between adjacent-order ports sharing
/// a location.
pub const DEFAULT_PORT_SEPARATION: f64 = 10.0;

fn half_extent_on(control: Vec2, location: Location) -> f64 {
    match location {
        Location::North | Location::South => control.y,
        Location::East | Location::West => control.x,
    }
}

/// Placement constraints for every port on `node`: locate ports on their
/// cardinal side and bound their tangential drift, pin unlocated (or
/// center-located) ports to the node center, and keep same-location ports
/// at least `min_separation` apart in ascending `order`.
pub fn constrain_node_ports(storage: &Storage, node: NodeId, min_separation: f64) -> Vec<Gradient> {
    let n = storage.node(node);
    let center = n.center;
    let control = storage.point(n.shape.control);
    let node_mass = storage.mass(center);
    let masses = (node_mass, PORT_MASS_BIAS);

    let mut out = Vec::new();
    for port in &n.ports {
        match port.location {
            None | Some(Location::Center) => {
                out.extend(constrain_distance(storage, center, port.point, Op::Eq, 0.0, None, masses));
            }
            Some(location) => {
                let normal = location.normal();
                let half = half_extent_on(control, location);
                out.extend(constrain_offset(storage, center, port.point, Op::Eq, half, normal, masses));

                let tangent = normal.perp();
                let bound = match location {
                    Location::North | Location::South => control.x,
                    Location::East | Location::West => control.y,
                    Location::Center => 0.0,
                };
                out.extend(constrain_offset(storage, center, port.point, Op::Le, bound, tangent, masses));
                out.extend(constrain_offset(storage, center, port.point, Op::Ge, -bound, tangent, masses));
            }
        }
    }

    out.extend(ordered_separation(storage, node, min_separation));
    out
}

fn ordered_separation(storage: &Storage, node: NodeId, min_separation: f64) -> Vec<Gradient> {
    let n = storage.node(node);
    let mut by_location: std::collections::HashMap<Location, Vec<(i64, crate::vector::PointId)>> = std::collections::HashMap::new();
    for port in &n.ports {
        if let (Some(location), Some(order)) = (port.location, port.order) {
            if location != Location::Center {
                by_location.entry(location).or_default().push((order, port.point));
            }
        }
    }

    let mut out = Vec::new();
    for (location, mut ports) in by_location {
        ports.sort_by_key(|(order, _)| *order);
        let tangent = location.normal().perp();
        for pair in ports.windows(2) {
            let (_, p) = pair[0];
            let (_, q) = pair[1];
            out.extend(constrain_offset(storage, p, q, Op::Ge, min_separation, tangent, (PORT_MASS_BIAS, PORT_MASS_BIAS)));
        }
    }
    out
}
