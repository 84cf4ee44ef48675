//! Hand Bone Model
//!
//! The 26-joint OpenXR hand layout shared by tracked hands, pose assets and
//! rendered hand meshes, plus the per-finger bone chains used to walk a
//! finger from metacarpal to tip.

/// Number of joints in every joint array.
pub const HAND_JOINT_COUNT: usize = 26;

/// Number of fingers, thumb included.
pub const FINGER_COUNT: usize = 5;

/// Hand joints in storage order.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandBone {
    Palm = 0,
    Wrist = 1,

    ThumbMetacarpal = 2,
    ThumbProximal = 3,
    ThumbDistal = 4,
    ThumbTip = 5,

    IndexMetacarpal = 6,
    IndexProximal = 7,
    IndexIntermediate = 8,
    IndexDistal = 9,
    IndexTip = 10,

    MiddleMetacarpal = 11,
    MiddleProximal = 12,
    MiddleIntermediate = 13,
    MiddleDistal = 14,
    MiddleTip = 15,

    RingMetacarpal = 16,
    RingProximal = 17,
    RingIntermediate = 18,
    RingDistal = 19,
    RingTip = 20,

    LittleMetacarpal = 21,
    LittleProximal = 22,
    LittleIntermediate = 23,
    LittleDistal = 24,
    LittleTip = 25,
}

impl HandBone {
    /// All bones in storage order.
    pub const ALL: [HandBone; HAND_JOINT_COUNT] = [
        HandBone::Palm,
        HandBone::Wrist,
        HandBone::ThumbMetacarpal,
        HandBone::ThumbProximal,
        HandBone::ThumbDistal,
        HandBone::ThumbTip,
        HandBone::IndexMetacarpal,
        HandBone::IndexProximal,
        HandBone::IndexIntermediate,
        HandBone::IndexDistal,
        HandBone::IndexTip,
        HandBone::MiddleMetacarpal,
        HandBone::MiddleProximal,
        HandBone::MiddleIntermediate,
        HandBone::MiddleDistal,
        HandBone::MiddleTip,
        HandBone::RingMetacarpal,
        HandBone::RingProximal,
        HandBone::RingIntermediate,
        HandBone::RingDistal,
        HandBone::RingTip,
        HandBone::LittleMetacarpal,
        HandBone::LittleProximal,
        HandBone::LittleIntermediate,
        HandBone::LittleDistal,
        HandBone::LittleTip,
    ];

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human readable name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            HandBone::Palm => "Palm",
            HandBone::Wrist => "Wrist",
            HandBone::ThumbMetacarpal => "Thumb Metacarpal",
            HandBone::ThumbProximal => "Thumb Proximal",
            HandBone::ThumbDistal => "Thumb Distal",
            HandBone::ThumbTip => "Thumb Tip",
            HandBone::IndexMetacarpal => "Index Metacarpal",
            HandBone::IndexProximal => "Index Proximal",
            HandBone::IndexIntermediate => "Index Intermediate",
            HandBone::IndexDistal => "Index Distal",
            HandBone::IndexTip => "Index Tip",
            HandBone::MiddleMetacarpal => "Middle Metacarpal",
            HandBone::MiddleProximal => "Middle Proximal",
            HandBone::MiddleIntermediate => "Middle Intermediate",
            HandBone::MiddleDistal => "Middle Distal",
            HandBone::MiddleTip => "Middle Tip",
            HandBone::RingMetacarpal => "Ring Metacarpal",
            HandBone::RingProximal => "Ring Proximal",
            HandBone::RingIntermediate => "Ring Intermediate",
            HandBone::RingDistal => "Ring Distal",
            HandBone::RingTip => "Ring Tip",
            HandBone::LittleMetacarpal => "Pinky Metacarpal",
            HandBone::LittleProximal => "Pinky Proximal",
            HandBone::LittleIntermediate => "Pinky Intermediate",
            HandBone::LittleDistal => "Pinky Distal",
            HandBone::LittleTip => "Pinky Tip",
        }
    }

    /// Skeleton bone name used by default hand rigs.
    #[must_use]
    pub fn default_bone_name(self) -> &'static str {
        DEFAULT_BONE_NAMES[self.index()]
    }

    #[must_use]
    pub fn finger(self) -> Option<Finger> {
        match self.index() {
            2..=5 => Some(Finger::Thumb),
            6..=10 => Some(Finger::Index),
            11..=15 => Some(Finger::Middle),
            16..=20 => Some(Finger::Ring),
            21..=25 => Some(Finger::Little),
            _ => None,
        }
    }

    /// Previous bone in this bone's finger chain. The first bone of every
    /// chain reports the wrist. Palm and wrist are in no chain.
    #[must_use]
    pub fn parent_in_chain(self) -> Option<HandBone> {
        let (chain, position) = BoneChain::locate(self)?;
        if position == 0 {
            Some(HandBone::Wrist)
        } else {
            chain.bones[position - 1]
        }
    }

    /// Next bone in this bone's finger chain, `None` past the tip.
    #[must_use]
    pub fn child_in_chain(self) -> Option<HandBone> {
        let (chain, position) = BoneChain::locate(self)?;
        chain.bones.get(position + 1).copied().flatten()
    }
}

/// Default OpenXR bone names, in [`HandBone`] order.
pub const DEFAULT_BONE_NAMES: [&str; HAND_JOINT_COUNT] = [
    "XRHand_Palm",
    "XRHand_Wrist",
    "XRHand_ThumbMetacarpal",
    "XRHand_ThumbProximal",
    "XRHand_ThumbDistal",
    "XRHand_ThumbTip",
    "XRHand_IndexMetacarpal",
    "XRHand_IndexProximal",
    "XRHand_IndexIntermediate",
    "XRHand_IndexDistal",
    "XRHand_IndexTip",
    "XRHand_MiddleMetacarpal",
    "XRHand_MiddleProximal",
    "XRHand_MiddleIntermediate",
    "XRHand_MiddleDistal",
    "XRHand_MiddleTip",
    "XRHand_RingMetacarpal",
    "XRHand_RingProximal",
    "XRHand_RingIntermediate",
    "XRHand_RingDistal",
    "XRHand_RingTip",
    "XRHand_LittleMetacarpal",
    "XRHand_LittleProximal",
    "XRHand_LittleIntermediate",
    "XRHand_LittleDistal",
    "XRHand_LittleTip",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Little,
}

impl Finger {
    pub const ALL: [Finger; FINGER_COUNT] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Little,
    ];

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn chain(self) -> &'static BoneChain {
        &BONE_CHAINS[self.index()]
    }
}

/// How far a finger may deviate from the authored pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JointFreedom {
    #[default]
    Free,
    Constrained,
    Locked,
}

/// Ordered joints of one finger. The thumb has no intermediate joint, so
/// its fifth slot is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoneChain {
    pub finger: Finger,
    pub bones: [Option<HandBone>; 5],
}

impl BoneChain {
    /// Joint at `position`, `None` for an empty slot or out of range.
    #[must_use]
    pub fn joint(&self, position: usize) -> Option<HandBone> {
        self.bones.get(position).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = HandBone> + '_ {
        self.bones.iter().filter_map(|b| *b)
    }

    fn locate(bone: HandBone) -> Option<(&'static BoneChain, usize)> {
        let chain = bone.finger()?.chain();
        let position = chain.bones.iter().position(|b| *b == Some(bone))?;
        Some((chain, position))
    }
}

pub const BONE_CHAINS: [BoneChain; FINGER_COUNT] = [
    BoneChain {
        finger: Finger::Thumb,
        bones: [
            Some(HandBone::ThumbMetacarpal),
            Some(HandBone::ThumbProximal),
            Some(HandBone::ThumbDistal),
            Some(HandBone::ThumbTip),
            None,
        ],
    },
    BoneChain {
        finger: Finger::Index,
        bones: [
            Some(HandBone::IndexMetacarpal),
            Some(HandBone::IndexProximal),
            Some(HandBone::IndexIntermediate),
            Some(HandBone::IndexDistal),
            Some(HandBone::IndexTip),
        ],
    },
    BoneChain {
        finger: Finger::Middle,
        bones: [
            Some(HandBone::MiddleMetacarpal),
            Some(HandBone::MiddleProximal),
            Some(HandBone::MiddleIntermediate),
            Some(HandBone::MiddleDistal),
            Some(HandBone::MiddleTip),
        ],
    },
    BoneChain {
        finger: Finger::Ring,
        bones: [
            Some(HandBone::RingMetacarpal),
            Some(HandBone::RingProximal),
            Some(HandBone::RingIntermediate),
            Some(HandBone::RingDistal),
            Some(HandBone::RingTip),
        ],
    },
    BoneChain {
        finger: Finger::Little,
        bones: [
            Some(HandBone::LittleMetacarpal),
            Some(HandBone::LittleProximal),
            Some(HandBone::LittleIntermediate),
            Some(HandBone::LittleDistal),
            Some(HandBone::LittleTip),
        ],
    },
];
