//! Forward-scan state machine
//!
//! [`transition`] is a pure function from `(state, line)` to
//! `(next state, effect)`. [`ForwardScan`] owns the per-document scratch
//! tables and applies effects in document order.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::errors::{ExError, SceneDiffError};
use crate::model::{FileId, Quat, TransformData, Vec3};

use super::prefab::PrefabOverrides;
use super::tokens::{
    tokenize, unquote, Token, KIND_OBJECT, KIND_PREFAB_INSTANCE, KIND_TRANSFORM,
};

/// Scanner position within the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState<'a> {
    #[default]
    Idle,
    InObjectBody {
        object: FileId,
        named: bool,
    },
    InTransformBody {
        transform: FileId,
    },
    InChildrenList {
        transform: FileId,
    },
    InPrefabBody {
        prefab: FileId,
    },
    InPrefabModifications {
        prefab: FileId,
        target: Option<FileId>,
        path: Option<&'a str>,
    },
}

/// What a single line contributes to the scratch tables
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<'a> {
    None,
    OpenObject(FileId),
    SetName {
        object: FileId,
        name: &'a str,
    },
    BindTransform {
        transform: FileId,
        object: FileId,
    },
    Position {
        transform: FileId,
        literals: [&'a str; 3],
    },
    Rotation {
        transform: FileId,
        literals: [&'a str; 4],
    },
    Scale {
        transform: FileId,
        literals: [&'a str; 3],
    },
    Child {
        parent_transform: FileId,
        child_transform: FileId,
    },
    PrefabOverride {
        prefab: FileId,
        target: Option<FileId>,
        path: &'a str,
        value: &'a str,
    },
}

/// Advance the state machine by one line.
///
/// Headers switch state from anywhere: recognized kinds open their body,
/// any other record kind closes the current body. Unexpected lines leave
/// the state as it is, except inside the modifications block, which ends
/// at the first non-blank line that is not indented like a modification
/// entry.
pub fn transition<'a>(state: ScanState<'a>, line: &'a str) -> (ScanState<'a>, Effect<'a>) {
    let token = tokenize(line);

    if token == Token::OtherHeader {
        return (ScanState::Idle, Effect::None);
    }
    if let Token::Header { kind, id } = token {
        return match kind {
            KIND_OBJECT => (
                ScanState::InObjectBody {
                    object: id,
                    named: false,
                },
                Effect::OpenObject(id),
            ),
            KIND_TRANSFORM => (ScanState::InTransformBody { transform: id }, Effect::None),
            KIND_PREFAB_INSTANCE => (ScanState::InPrefabBody { prefab: id }, Effect::None),
            _ => (state, Effect::None),
        };
    }

    match state {
        ScanState::Idle => (state, Effect::None),

        ScanState::InObjectBody { object, named } => match token {
            Token::Name(name) if !named => (
                ScanState::InObjectBody {
                    object,
                    named: true,
                },
                Effect::SetName { object, name },
            ),
            _ => (state, Effect::None),
        },

        ScanState::InTransformBody { transform } => match transform_line(transform, &token) {
            Some(effect) => (state, effect),
            None if token == Token::ChildrenMarker => {
                (ScanState::InChildrenList { transform }, Effect::None)
            }
            None => (state, Effect::None),
        },

        ScanState::InChildrenList { transform } => {
            if let Some(effect) = transform_line(transform, &token) {
                return (state, effect);
            }
            match token {
                Token::ChildEntry(child) => (
                    state,
                    Effect::Child {
                        parent_transform: transform,
                        child_transform: child,
                    },
                ),
                Token::ChildrenMarker => (state, Effect::None),
                _ if line.trim_start().starts_with('-') => (state, Effect::None),
                _ => (ScanState::InTransformBody { transform }, Effect::None),
            }
        }

        ScanState::InPrefabBody { prefab } => match token {
            Token::ModificationsMarker => (
                ScanState::InPrefabModifications {
                    prefab,
                    target: None,
                    path: None,
                },
                Effect::None,
            ),
            _ => (state, Effect::None),
        },

        ScanState::InPrefabModifications {
            prefab,
            target,
            path,
        } => match token {
            Token::ModificationTarget(id) => (
                ScanState::InPrefabModifications {
                    prefab,
                    target: Some(id),
                    path: None,
                },
                Effect::None,
            ),
            Token::PropertyPath(p) => (
                ScanState::InPrefabModifications {
                    prefab,
                    target,
                    path: Some(p),
                },
                Effect::None,
            ),
            Token::Value(value) if path.is_some() => (
                ScanState::InPrefabModifications {
                    prefab,
                    target,
                    path: None,
                },
                Effect::PrefabOverride {
                    prefab,
                    target,
                    path: path.unwrap_or_default(),
                    value,
                },
            ),
            _ if ends_modifications(line) => (ScanState::Idle, Effect::None),
            _ => (state, Effect::None),
        },
    }
}

fn transform_line<'a>(transform: FileId, token: &Token<'a>) -> Option<Effect<'a>> {
    match *token {
        Token::GameObjectRef(object) => Some(Effect::BindTransform { transform, object }),
        Token::LocalPosition(literals) => Some(Effect::Position {
            transform,
            literals,
        }),
        Token::LocalRotation(literals) => Some(Effect::Rotation {
            transform,
            literals,
        }),
        Token::LocalScale(literals) => Some(Effect::Scale {
            transform,
            literals,
        }),
        _ => None,
    }
}

fn ends_modifications(line: &str) -> bool {
    let trimmed = line.trim();
    !line.starts_with("    ")
        && !line.starts_with("  -")
        && !trimmed.is_empty()
        && !trimmed.starts_with("m_")
}

/// A child-list entry, still expressed in transform identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildEvent {
    pub parent_transform: FileId,
    pub child_transform: FileId,
}

/// Scratch tables produced by one pass over the document
///
/// Nothing here is keyed by final object identity except `names` and
/// `objects`; everything transform-shaped is remapped in
/// [`ForwardScan::resolve`](super::resolve).
#[derive(Debug, Default)]
pub struct ForwardScan {
    pub(super) objects: BTreeSet<FileId>,
    pub(super) names: BTreeMap<FileId, String>,
    pub(super) owners: HashMap<FileId, FileId>,
    /// Transform data in order of first appearance
    pub(super) transform_data: Vec<(FileId, TransformData)>,
    transform_slots: HashMap<FileId, usize>,
    pub(super) child_events: Vec<ChildEvent>,
    pub(super) prefabs: BTreeMap<FileId, PrefabOverrides>,
    pub(super) line_count: usize,
}

impl ForwardScan {
    /// Run the state machine over every line of `text`.
    ///
    /// # Errors
    ///
    /// `InvalidNumber` when a transform component literal is malformed.
    pub fn run(text: &str) -> Result<Self, ExError> {
        let mut scan = ForwardScan::default();
        let mut state = ScanState::Idle;

        for (index, raw) in text.split('\n').enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let (next, effect) = transition(state, line);
            scan.apply(effect, index + 1)?;
            state = next;
            scan.line_count = index + 1;
        }

        Ok(scan)
    }

    fn apply(&mut self, effect: Effect<'_>, line: usize) -> Result<(), ExError> {
        match effect {
            Effect::None => {}
            Effect::OpenObject(object) => {
                self.objects.insert(object);
            }
            Effect::SetName { object, name } => {
                self.names.insert(object, unquote(name).to_string());
            }
            Effect::BindTransform { transform, object } => {
                self.owners.insert(transform, object);
            }
            Effect::Position {
                transform,
                literals,
            } => {
                let [x, y, z] = strict_all(transform, "m_LocalPosition", literals, line)?;
                self.transform_mut(transform).position = Vec3::new(x, y, z);
            }
            Effect::Rotation {
                transform,
                literals,
            } => {
                let [x, y, z, w] = strict_all(transform, "m_LocalRotation", literals, line)?;
                self.transform_mut(transform).rotation = Quat::new(x, y, z, w);
            }
            Effect::Scale {
                transform,
                literals,
            } => {
                let [x, y, z] = strict_all(transform, "m_LocalScale", literals, line)?;
                self.transform_mut(transform).scale = Vec3::new(x, y, z);
            }
            Effect::Child {
                parent_transform,
                child_transform,
            } => self.child_events.push(ChildEvent {
                parent_transform,
                child_transform,
            }),
            Effect::PrefabOverride {
                prefab,
                target,
                path,
                value,
            } => {
                tracing::trace!(prefab = prefab.get(), target = ?target, path, "prefab override");
                self.prefabs.entry(prefab).or_default().apply(path, value);
            }
        }
        Ok(())
    }

    fn transform_mut(&mut self, transform: FileId) -> &mut TransformData {
        let slot = match self.transform_slots.get(&transform) {
            Some(&slot) => slot,
            None => {
                self.transform_data
                    .push((transform, TransformData::IDENTITY));
                let slot = self.transform_data.len() - 1;
                self.transform_slots.insert(transform, slot);
                slot
            }
        };
        &mut self.transform_data[slot].1
    }
}

fn strict_all<const N: usize>(
    transform: FileId,
    field: &'static str,
    literals: [&str; N],
    line: usize,
) -> Result<[f32; N], ExError> {
    let mut out = [0.0_f32; N];
    for (slot, literal) in out.iter_mut().zip(literals) {
        *slot = literal.parse::<f32>().map_err(|_| {
            ExError::from(SceneDiffError::MalformedNumber {
                transform_id: transform,
                field,
                literal: literal.to_string(),
                line,
            })
        })?;
    }
    Ok(out)
}
