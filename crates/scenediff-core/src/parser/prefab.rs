//! Prefab-instance override accumulation

use crate::model::{Quat, TransformData, Vec3};

use super::tokens::unquote;

/// Sparse overrides collected for one prefab instance
///
/// Numbers are parsed leniently: a literal that does not parse, or parses to
/// a non-finite value, leaves the component unset, and it falls back to its
/// default when the instance is folded into the graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrefabOverrides {
    name: Option<String>,
    position: [Option<f32>; 3],
    rotation: [Option<f32>; 4],
    scale: [Option<f32>; 3],
}

impl PrefabOverrides {
    /// Record one `propertyPath` / `value` pair. Unknown paths are ignored.
    pub fn apply(&mut self, path: &str, value: &str) {
        if path == "m_Name" {
            let name = unquote(value);
            if !name.is_empty() {
                self.name = Some(name.to_string());
            }
            return;
        }

        let slot = match path {
            "m_LocalPosition.x" => &mut self.position[0],
            "m_LocalPosition.y" => &mut self.position[1],
            "m_LocalPosition.z" => &mut self.position[2],
            "m_LocalRotation.x" => &mut self.rotation[0],
            "m_LocalRotation.y" => &mut self.rotation[1],
            "m_LocalRotation.z" => &mut self.rotation[2],
            "m_LocalRotation.w" => &mut self.rotation[3],
            "m_LocalScale.x" => &mut self.scale[0],
            "m_LocalScale.y" => &mut self.scale[1],
            "m_LocalScale.z" => &mut self.scale[2],
            _ => return,
        };
        match value.trim().parse::<f32>() {
            Ok(parsed) if parsed.is_finite() => *slot = Some(parsed),
            _ => {}
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Concrete name and transform, or `None` when no name override exists.
    ///
    /// Instances without a name override are not emitted at all, whatever
    /// transform overrides they carry.
    pub fn finish(self) -> Option<(String, TransformData)> {
        let name = self.name?;
        let [px, py, pz] = self.position;
        let [rx, ry, rz, rw] = self.rotation;
        let [sx, sy, sz] = self.scale;

        let transform = TransformData {
            position: Vec3::new(px.unwrap_or(0.0), py.unwrap_or(0.0), pz.unwrap_or(0.0)),
            rotation: Quat::new(
                rx.unwrap_or(0.0),
                ry.unwrap_or(0.0),
                rz.unwrap_or(0.0),
                rw.unwrap_or(1.0),
            ),
            scale: Vec3::new(sx.unwrap_or(1.0), sy.unwrap_or(1.0), sz.unwrap_or(1.0)),
        };
        Some((name, transform))
    }
}
