use rustc_hash::FxHashMap;

use super::Transform;

#[derive(Debug, Clone, PartialEq)]
pub struct BoneInfo {
    pub name: String,
    /// Parent bone index. Parents always precede their children.
    pub parent: Option<usize>,
}

/// Bone hierarchy with a local-space reference pose.
///
/// Used to author hand poses from a rig and to map hand joints onto a
/// rendered hand mesh.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSkeleton {
    pub name: String,

    bones: Vec<BoneInfo>,
    ref_pose: Vec<Transform>,
    lookup: FxHashMap<String, usize>,
}

impl ReferenceSkeleton {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Appends a bone and returns its index.
    ///
    /// A parent index that does not precede the new bone is dropped with a
    /// warning, leaving the bone as a root.
    pub fn add_bone(&mut self, name: &str, parent: Option<usize>, local_pose: Transform) -> usize {
        let index = self.bones.len();
        let parent = match parent {
            Some(p) if p >= index => {
                log::warn!(
                    "Skeleton '{}': parent {p} of bone '{name}' does not precede it; treating as root",
                    self.name
                );
                None
            }
            other => other,
        };

        self.bones.push(BoneInfo {
            name: name.to_string(),
            parent,
        });
        self.ref_pose.push(local_pose);
        self.lookup.insert(name.to_string(), index);
        index
    }

    #[inline]
    #[must_use]
    pub fn num_bones(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    #[must_use]
    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    #[must_use]
    pub fn bones(&self) -> &[BoneInfo] {
        &self.bones
    }

    #[must_use]
    pub fn ref_pose(&self) -> &[Transform] {
        &self.ref_pose
    }

    /// Reference pose resolved into component space.
    #[must_use]
    pub fn component_space_pose(&self) -> Vec<Transform> {
        self.fill_component_space(&self.ref_pose)
    }

    /// Resolves a full local-space pose into component space.
    ///
    /// Bones missing from `local_pose` fall back to the reference pose.
    #[must_use]
    pub fn fill_component_space(&self, local_pose: &[Transform]) -> Vec<Transform> {
        let mut out: Vec<Transform> = Vec::with_capacity(self.bones.len());
        for (index, bone) in self.bones.iter().enumerate() {
            let local = local_pose.get(index).unwrap_or(&self.ref_pose[index]);
            let resolved = match bone.parent {
                Some(parent) => out[parent].mul_transform(local),
                None => *local,
            };
            out.push(resolved);
        }
        out
    }
}
