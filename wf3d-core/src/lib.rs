/// WF3D Core Library - Geometry kernel for the wireframe viewer
///
/// This library provides homogeneous-coordinate transforms, the catalogue of
/// solid generators, Roberts-style face visibility and the session state that
/// ties them together. It knows nothing about windows or terminals.

pub mod catalogue;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod mesh_file;
pub mod projection;
pub mod scene;
pub mod sphere;
pub mod transform;
pub mod visibility;

// Re-export commonly used types
pub use catalogue::Solid;
pub use error::{GeometryError, Result};
pub use geometry::{Mesh, Node, NodeList, Triangle};
pub use matrix::{Matrix, Vector};
pub use projection::{Frame, ProjectionMode};
pub use scene::{Gestures, Scene, SceneOptions};
pub use transform::{AffineOp, AffineOperations, Axis, DividePolicy, Transform};
pub use visibility::VisibilityEngine;
