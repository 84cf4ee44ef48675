//! Hand Visual
//!
//! Drives a rendered hand skeleton from a live joint source. Each frame the
//! tracked joints are blended with any active grab pose override and written
//! into the mapped skeleton bones, while the hand root either follows the
//! tracked root pose or snaps onto the grabbed object.

use std::sync::Arc;

use crate::cache::GrabPoseProperties;
use crate::hand::bones::DEFAULT_BONE_NAMES;
use crate::hand::{HAND_JOINT_COUNT, HandData, HandJoints, HandPoseData, Handedness, RootPose};
use crate::matcher::GrabPoseMatch;
use crate::scene::{ActorKey, ReferenceSkeleton, Transform, World};

use super::blend::{LerpState, PoseBlend};
use super::root_blend::RootSnapBlend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SkeletonMappingState {
    /// Not attempted yet for the current skeleton.
    #[default]
    None,
    Invalid,
    Valid,
}

#[derive(Debug, Default)]
pub struct HandVisual {
    pub name: String,
    /// Keep the last written pose and skip all updates.
    pub pause_skeleton_updates: bool,
    /// Leave the world transform alone instead of following the root pose.
    pub ignore_root_pose: bool,
    /// Apply grab poses instantly even when they carry a lerp time.
    pub inhibit_pose_lerping: bool,

    skeleton: Option<Arc<ReferenceSkeleton>>,
    mapped_skeleton: Option<Arc<ReferenceSkeleton>>,
    mapping_state: SkeletonMappingState,
    mapped_bone_names: Vec<String>,
    mapped_bone_indices: [usize; HAND_JOINT_COUNT],

    /// Component-space bone transforms, one per skeleton bone.
    bone_transforms: Vec<Transform>,
    world_transform: Transform,
    handedness: Handedness,
    displayed: HandData,

    pose_blend: PoseBlend,
    root_blend: RootSnapBlend,
}

impl HandVisual {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mapped_bone_names: vec![String::new(); HAND_JOINT_COUNT],
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_skeleton(mut self, skeleton: Arc<ReferenceSkeleton>) -> Self {
        self.set_skeleton(Some(skeleton));
        self
    }

    // ========================================================================
    // Skeleton & Mapping
    // ========================================================================

    /// Swaps the rendered skeleton and resets every bone to its reference
    /// pose. The bone mapping is redone on the next tick.
    pub fn set_skeleton(&mut self, skeleton: Option<Arc<ReferenceSkeleton>>) {
        self.bone_transforms = skeleton
            .as_deref()
            .map(ReferenceSkeleton::component_space_pose)
            .unwrap_or_default();
        self.skeleton = skeleton;
        self.clear_mapping_state();
    }

    #[must_use]
    pub fn skeleton(&self) -> Option<&Arc<ReferenceSkeleton>> {
        self.skeleton.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn mapping_state(&self) -> SkeletonMappingState {
        self.mapping_state
    }

    #[must_use]
    pub fn mapped_bone_names(&self) -> &[String] {
        &self.mapped_bone_names
    }

    /// Maps every hand joint onto a custom skeleton bone name.
    pub fn set_mapped_bone_names(&mut self, names: [&str; HAND_JOINT_COUNT]) {
        self.mapped_bone_names = names.iter().map(ToString::to_string).collect();
        self.clear_mapping_state();
    }

    pub fn set_mapped_bone_names_as_default(&mut self) {
        self.set_mapped_bone_names(DEFAULT_BONE_NAMES);
    }

    #[must_use]
    pub fn are_mapped_bone_names_valid(&self) -> bool {
        self.mapped_bone_names.len() == HAND_JOINT_COUNT && self.mapped_bone_names.iter().all(|n| !n.is_empty())
    }

    pub fn clear_mapping_state(&mut self) {
        self.mapping_state = SkeletonMappingState::None;
        self.mapped_skeleton = None;
    }

    /// Re-evaluates the bone mapping. Mapping is attempted at most once per
    /// skeleton and only while a joint source is connected.
    pub fn update_mapping_state(&mut self, has_joint_source: bool) {
        let Some(skeleton) = self.skeleton.clone() else {
            self.mapping_state = SkeletonMappingState::Invalid;
            self.mapped_skeleton = None;
            return;
        };

        let same_skeleton = self
            .mapped_skeleton
            .as_ref()
            .is_some_and(|mapped| Arc::ptr_eq(mapped, &skeleton));
        if !same_skeleton {
            self.clear_mapping_state();
        }

        if self.mapping_state == SkeletonMappingState::None && has_joint_source {
            if !self.are_mapped_bone_names_valid() {
                self.set_mapped_bone_names_as_default();
            }
            self.initialize_skeleton(&skeleton);
        }
    }

    fn initialize_skeleton(&mut self, skeleton: &Arc<ReferenceSkeleton>) {
        self.mapped_skeleton = Some(Arc::clone(skeleton));
        for (joint, name) in self.mapped_bone_names.iter().enumerate() {
            let Some(bone) = skeleton.find_bone(name) else {
                log::error!(
                    "Hand visual '{}': bone '{name}' has no match in skeleton '{}'",
                    self.name,
                    skeleton.name
                );
                self.mapping_state = SkeletonMappingState::Invalid;
                return;
            };
            self.mapped_bone_indices[joint] = bone;
        }
        self.mapping_state = SkeletonMappingState::Valid;
    }

    // ========================================================================
    // Transforms
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn world_transform(&self) -> Transform {
        self.world_transform
    }

    pub fn set_world_transform(&mut self, transform: Transform) {
        self.world_transform = transform;
    }

    #[must_use]
    pub fn bone_transforms(&self) -> &[Transform] {
        &self.bone_transforms
    }

    /// Component-space transform of a skeleton bone by name.
    #[must_use]
    pub fn bone_transform_by_name(&self, name: &str) -> Option<Transform> {
        let index = self.skeleton.as_ref()?.find_bone(name)?;
        self.bone_transforms.get(index).copied()
    }

    /// Current joints in hand joint order. Empty until the mapping is valid.
    #[must_use]
    pub fn joint_transforms(&self) -> Vec<Transform> {
        if self.mapping_state != SkeletonMappingState::Valid {
            return Vec::new();
        }
        self.mapped_bone_indices
            .iter()
            .map(|&bone| self.bone_transforms.get(bone).copied().unwrap_or(Transform::IDENTITY))
            .collect()
    }

    /// World transform of the palm bone.
    #[must_use]
    pub fn root_world_transform(&self) -> Transform {
        self.joint_transforms()
            .first()
            .map_or(Transform::IDENTITY, |palm| self.world_transform.mul_transform(palm))
    }

    /// Writes the displayed bone positions and rotations back into `data`.
    /// Used by authoring tools to capture a hand shaped in the visual.
    pub fn push_transforms_to_data(&self, data: &mut HandData) -> bool {
        if self.mapping_state != SkeletonMappingState::Valid {
            log::warn!("Hand visual '{}': cannot push transforms without a valid bone mapping", self.name);
            return false;
        }
        for (joint, &bone) in data.joint_poses_mut().iter_mut().zip(&self.mapped_bone_indices) {
            let Some(bone) = self.bone_transforms.get(bone) else {
                continue;
            };
            joint.position = bone.position;
            joint.rotation = bone.rotation;
        }
        true
    }

    // ========================================================================
    // Grab Pose Override
    // ========================================================================

    #[must_use]
    pub fn pose_blend(&self) -> &PoseBlend {
        &self.pose_blend
    }

    #[must_use]
    pub fn root_blend(&self) -> &RootSnapBlend {
        &self.root_blend
    }

    #[inline]
    #[must_use]
    pub fn is_hand_pose_overridden(&self) -> bool {
        self.pose_blend.is_overridden()
    }

    #[inline]
    #[must_use]
    pub fn hand_pose_lerp_state(&self) -> LerpState {
        self.pose_blend.state()
    }

    /// Overrides the tracked hand with `pose`. With an `interactable` the
    /// root also follows it according to `properties.pose_mode`.
    pub fn set_hand_pose_override(
        &mut self,
        pose: Arc<HandPoseData>,
        root_offset: Transform,
        properties: &GrabPoseProperties,
        interactable: Option<ActorKey>,
        root: Option<&dyn RootPose>,
    ) {
        self.pose_blend.apply(pose, self.inhibit_pose_lerping);

        if let Some(actor) = interactable {
            let current_root = self.current_root(root);
            self.root_blend.begin(
                actor,
                root_offset,
                properties.pose_mode,
                properties.snap_move_duration,
                current_root,
            );
        }
    }

    /// Applies a matcher result to this hand.
    pub fn apply_grab_match(&mut self, grab: &GrabPoseMatch, interactable: ActorKey, root: Option<&dyn RootPose>) {
        self.set_hand_pose_override(
            Arc::clone(&grab.pose),
            grab.root_offset,
            &grab.properties,
            Some(interactable),
            root,
        );
    }

    /// Releases the override, blending back to the tracked hand.
    pub fn reset_hand_pose_override(&mut self, world: &World, root: Option<&dyn RootPose>) {
        self.pose_blend.release();

        let current_root = self.current_root(root);
        let actor_transform = self
            .root_blend
            .actor()
            .and_then(|actor| world.actor(actor))
            .map(|actor| actor.transform);
        self.root_blend.release(actor_transform.as_ref(), &current_root);
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances blends and writes this frame's pose into the skeleton.
    pub fn tick(&mut self, dt: f32, world: &World, joints: Option<&dyn HandJoints>, root: Option<&dyn RootPose>) {
        if self.pause_skeleton_updates {
            return;
        }

        self.pose_blend.advance(dt);
        self.root_blend.advance(dt);

        self.update_mapping_state(joints.is_some());
        if self.mapping_state != SkeletonMappingState::Valid {
            return;
        }

        self.update_root(world, root);

        let Some(joints) = joints else {
            return;
        };
        self.handedness = joints.handedness();

        let mut blended = self.joint_transforms();
        self.pose_blend.blend_joints(joints.joint_poses(), &mut blended);
        for (joint, &bone) in blended.iter().zip(&self.mapped_bone_indices) {
            if let Some(slot) = self.bone_transforms.get_mut(bone) {
                *slot = *joint;
            }
        }
        if self.displayed.set_joint_poses(&blended).is_err() {
            log::warn!("Hand visual '{}': joint source returned a malformed pose", self.name);
        }

        self.pose_blend.finish();
    }

    fn update_root(&mut self, world: &World, root: Option<&dyn RootPose>) {
        if self.ignore_root_pose {
            return;
        }
        let Some(root) = root.filter(|r| r.is_root_pose_valid()) else {
            return;
        };
        let root_pose = root.root_pose();

        let actor_transform = if self.root_blend.is_overriding_root() {
            self.root_blend
                .actor()
                .and_then(|actor| world.actor(actor))
                .map(|actor| actor.transform)
        } else {
            None
        };

        self.world_transform = match actor_transform {
            Some(actor_transform) => self.root_blend.resolve(&actor_transform, &root_pose),
            None => root_pose,
        };
    }

    fn current_root(&self, root: Option<&dyn RootPose>) -> Transform {
        root.filter(|r| r.is_root_pose_valid())
            .map_or(self.world_transform, |r| r.root_pose())
    }
}

impl HandJoints for HandVisual {
    fn hand_data(&self) -> &HandData {
        &self.displayed
    }

    fn handedness(&self) -> Handedness {
        self.handedness
    }

    fn is_hand_joint_data_valid(&self) -> bool {
        self.mapping_state == SkeletonMappingState::Valid
    }
}
