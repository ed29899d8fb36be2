pub mod file_id;
pub mod scene_graph;
pub mod transform;

pub use file_id::FileId;
pub use scene_graph::SceneGraph;
pub use transform::{Quat, TransformData, Vec3};
