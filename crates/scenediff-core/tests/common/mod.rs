use std::fmt::Write as _;
use std::path::PathBuf;

/// Directory holding the sample scene documents
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Read one fixture document into a string
#[allow(dead_code)]
pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("fixture {name} should be readable: {e}"))
}

/// Transform record written by [`SceneDoc::transform`]
#[allow(dead_code)]
#[derive(Clone, Debug)]
pub struct TransformDef {
    pub owner: i64,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub children: Vec<i64>,
}

#[allow(dead_code)]
impl TransformDef {
    pub fn owned_by(owner: i64) -> Self {
        Self {
            owner,
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0, 1.0, 1.0],
            children: Vec::new(),
        }
    }

    pub fn position(mut self, position: [f32; 3]) -> Self {
        self.position = position;
        self
    }

    pub fn rotation(mut self, rotation: [f32; 4]) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn scale(mut self, scale: [f32; 3]) -> Self {
        self.scale = scale;
        self
    }

    pub fn children(mut self, children: &[i64]) -> Self {
        self.children = children.to_vec();
        self
    }
}

/// Builder for small scene documents in the editor's text layout
#[allow(dead_code)]
#[derive(Default)]
pub struct SceneDoc {
    text: String,
}

#[allow(dead_code)]
impl SceneDoc {
    pub fn new() -> Self {
        Self {
            text: "%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n".to_string(),
        }
    }

    pub fn object(mut self, id: i64, name: &str) -> Self {
        let _ = write!(
            self.text,
            "--- !u!1 &{id}\nGameObject:\n  m_ObjectHideFlags: 0\n  serializedVersion: 6\n  m_Layer: 0\n  m_Name: {name}\n  m_IsActive: 1\n"
        );
        self
    }

    pub fn transform(mut self, id: i64, def: TransformDef) -> Self {
        let [px, py, pz] = def.position;
        let [rx, ry, rz, rw] = def.rotation;
        let [sx, sy, sz] = def.scale;
        let _ = write!(
            self.text,
            "--- !u!4 &{id}\nTransform:\n  m_ObjectHideFlags: 0\n  m_GameObject: {{fileID: {}}}\n  serializedVersion: 2\n  m_LocalRotation: {{x: {rx}, y: {ry}, z: {rz}, w: {rw}}}\n  m_LocalPosition: {{x: {px}, y: {py}, z: {pz}}}\n  m_LocalScale: {{x: {sx}, y: {sy}, z: {sz}}}\n",
            def.owner
        );
        if def.children.is_empty() {
            self.text.push_str("  m_Children: []\n");
        } else {
            self.text.push_str("  m_Children:\n");
            for child in &def.children {
                let _ = writeln!(self.text, "  - {{fileID: {child}}}");
            }
        }
        self.text.push_str("  m_Father: {fileID: 0}\n");
        self
    }

    pub fn prefab(mut self, id: i64, modifications: &[(&str, &str)]) -> Self {
        let _ = write!(
            self.text,
            "--- !u!1001 &{id}\nPrefabInstance:\n  m_ObjectHideFlags: 0\n  serializedVersion: 2\n  m_Modification:\n    serializedVersion: 3\n    m_TransformParent: {{fileID: 0}}\n    m_Modifications:\n"
        );
        for (path, value) in modifications {
            let _ = write!(
                self.text,
                "    - target: {{fileID: 400000, guid: 0123456789abcdef0123456789abcdef, type: 3}}\n      propertyPath: {path}\n      value: {value}\n      objectReference: {{fileID: 0}}\n"
            );
        }
        self.text.push_str(
            "    m_RemovedComponents: []\n  m_SourcePrefab: {fileID: 100100000, guid: 0123456789abcdef0123456789abcdef, type: 3}\n",
        );
        self
    }

    /// Append a record of a kind the parser does not understand
    pub fn component(mut self, kind: u32, id: i64, owner: i64) -> Self {
        let _ = write!(
            self.text,
            "--- !u!{kind} &{id}\nMonoBehaviour:\n  m_ObjectHideFlags: 0\n  m_GameObject: {{fileID: {owner}}}\n  m_Enabled: 1\n"
        );
        self
    }

    pub fn build(self) -> String {
        self.text
    }
}
