//! A 2D constraint-and-force iterative graph layout engine.
//!
//! A host owns a [`graph::Storage`], builds a [`layout::Layout`] out of
//! [`generators`]/[`optimizer`] pairs, calls `start()`, and reads the node,
//! port and edge state back. An optional [`router`] pass produces orthogonal
//! edge paths once the layout has settled.

pub mod constraints;
pub mod error;
pub mod generators;
pub mod graph;
pub mod layout;
pub mod optimizer;
pub mod router;
pub mod scheduler;
pub mod shape;
pub mod vector;

pub use error::{LayoutError, LayoutResult};
pub use graph::{Edge, EdgeId, Node, NodeId, Port, Storage};
pub use layout::{Layout, Stage};
pub use vector::{Gradient, PointId, Vec2};
