//! Hand Pose Subsystem
//!
//! Owns the variation cache for one world and everything generated while
//! filling it. Grab pose components register once when they start playing;
//! interactors then ask for the best pose whenever a hand selects an actor.
//!
//! # Frame Order
//!
//! 1. Components call [`HandPoseSubsystem::register_hand_pose_data`].
//! 2. Interactors call [`HandPoseSubsystem::check_for_hand_pose`] and apply
//!    the result to their [`HandVisual`](crate::animation::HandVisual).
//! 3. [`HandPoseSubsystem::tick`] destroys at most one queued component and
//!    records debug shapes.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::animation::HandVisual;
use crate::assets::GeneratedPoseStorage;
use crate::cache::{
    GrabPoseMode, MirrorMode, NewVariation, PoseDataGroup, VariationCache, VariationIndex, VariationLookup,
};
use crate::debug::{DebugDraw, DebugShape};
use crate::errors::{HandPoseError, Result};
use crate::hand::mirror::mirrored_pose_data;
use crate::hand::{HandJoints, HandPoseData, Handedness};
use crate::interaction::InteractorStateEvent;
use crate::matcher::{GrabPoseMatch, PoseMatcher};
use crate::scene::{ActorKey, Axis, ComponentKey, Transform, World};
use crate::settings::HandPoseSettings;

/// What a registration did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The pose is disabled; nothing was cached.
    Disabled,
    /// Mirror references are registered through their parent pose.
    DeferredToParent,
    /// An equivalent variation already existed and now applies to the actor.
    Reused(VariationIndex),
    /// A new variation was cached, plus a separate mirror entry if one was
    /// created.
    Created {
        variation: VariationIndex,
        mirror: Option<VariationIndex>,
    },
}

#[derive(Debug)]
pub struct HandPoseSubsystem {
    pub settings: HandPoseSettings,

    cache: VariationCache,
    generated: GeneratedPoseStorage,
    destroy_queue: VecDeque<ComponentKey>,
    /// Appended to generated mirror names. Wraps instead of overflowing.
    last_mirrored_suffix: u32,
    debug: DebugDraw,
}

impl Default for HandPoseSubsystem {
    fn default() -> Self {
        Self::new(HandPoseSettings::default())
    }
}

impl HandPoseSubsystem {
    #[must_use]
    pub fn new(settings: HandPoseSettings) -> Self {
        Self {
            settings,
            cache: VariationCache::new(),
            generated: GeneratedPoseStorage::new(),
            destroy_queue: VecDeque::new(),
            last_mirrored_suffix: 1,
            debug: DebugDraw::default(),
        }
    }

    #[must_use]
    pub fn variation_cache(&self) -> &VariationCache {
        &self.cache
    }

    #[must_use]
    pub fn generated_mirrors(&self) -> &GeneratedPoseStorage {
        &self.generated
    }

    /// Mirrored pose assets created while registering `component`.
    pub fn mirrors_requested_by(&self, component: ComponentKey) -> impl Iterator<Item = Arc<HandPoseData>> + '_ {
        self.generated
            .requested_by(component)
            .iter()
            .filter_map(|&handle| self.generated.get(handle))
    }

    /// Components waiting to be destroyed, next first.
    #[must_use]
    pub fn pending_destruction(&self) -> &VecDeque<ComponentKey> {
        &self.destroy_queue
    }

    #[must_use]
    pub fn debug_shapes(&self) -> &[DebugShape] {
        self.debug.shapes()
    }

    /// Queues `component` for destruction on a later tick.
    pub fn queue_destroy(&mut self, component: ComponentKey) {
        self.destroy_queue.push_back(component);
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Caches the grab pose `component` for its actor's class.
    ///
    /// With `destroy_after_registration` the component (and a consumed manual
    /// mirror reference) is queued for destruction once registered.
    pub fn register_hand_pose_data(
        &mut self,
        world: &mut World,
        component: ComponentKey,
        destroy_after_registration: bool,
    ) -> Result<RegistrationOutcome> {
        let Some(grab_pose) = world.component(component) else {
            log::error!("register_hand_pose_data: grab pose {component:?} is invalid");
            return Err(HandPoseError::InvalidComponent(component));
        };
        let Some((actor_key, actor)) = world.owning_actor(component) else {
            log::error!("register_hand_pose_data: owning actor of '{}' is invalid", grab_pose.name);
            return Err(HandPoseError::InvalidActor(grab_pose.owner()));
        };
        let class = actor.class;

        if grab_pose.properties.pose_mode == GrabPoseMode::MirrorReference {
            log::debug!("'{}' is a mirror reference; its parent registers it", grab_pose.name);
            return Ok(RegistrationOutcome::DeferredToParent);
        }

        if grab_pose.pose_disabled {
            if destroy_after_registration {
                self.queue_destroy(component);
            }
            return Ok(RegistrationOutcome::Disabled);
        }

        let name = grab_pose.name.clone();
        let transform = grab_pose.relative_transform;
        let properties = grab_pose.properties;
        let children = grab_pose.children().to_vec();
        let Some(pose) = grab_pose.pose_data.clone() else {
            log::error!("register_hand_pose_data: '{name}' has no hand pose data");
            return Err(HandPoseError::MissingPoseData(name));
        };

        if let VariationLookup::Existing(index) =
            self.cache.should_create_new_variation(class, &transform, &properties, &pose)
        {
            self.cache.add_existing_variation_to_instance(class, actor_key, index);
            world.set_registered(component, true);
            if destroy_after_registration {
                self.queue_destroy(component);
            }
            log::debug!("'{name}' reuses variation {index} of '{class}'");
            return Ok(RegistrationOutcome::Reused(index));
        }

        let mut primary_group = PoseDataGroup::from_pose(Arc::clone(&pose));
        let mut mirror_entry: Option<NewVariation> = None;
        let mut consumed_reference: Option<ComponentKey> = None;

        match properties.mirroring_mode {
            MirrorMode::None => {}
            MirrorMode::Automatic => {
                let mirrored = self.generate_mirrored_hand_pose_data(component, &pose);
                if properties.mirror_location_and_rotation {
                    mirror_entry = Some(NewVariation {
                        transform: transform.mirrored(properties.mirror_axis, Axis::X),
                        name: mirrored.name.clone(),
                        pose_group: PoseDataGroup::from_pose(mirrored),
                        properties,
                    });
                } else {
                    primary_group.insert(mirrored.handedness, mirrored);
                }
            }
            MirrorMode::Manual => match find_mirror_reference(world, &name, &children) {
                Some(reference) => {
                    let (reference_transform, reference_pose) = world
                        .component(reference)
                        .map(|r| (r.relative_transform, r.pose_data.clone()))
                        .unwrap_or_default();
                    let source = reference_pose.unwrap_or_else(|| Arc::clone(&pose));
                    let mirrored = self.generate_mirrored_hand_pose_data(component, &source);
                    mirror_entry = Some(NewVariation {
                        transform: transform.mul_transform(&reference_transform),
                        name: mirrored.name.clone(),
                        pose_group: PoseDataGroup::from_pose(mirrored),
                        properties,
                    });
                    consumed_reference = Some(reference);
                }
                None => {
                    log::error!("'{name}' requested manual mirroring but has no MirrorReference child");
                }
            },
        }

        let variation = self.cache.add_variation(
            class,
            actor_key,
            NewVariation {
                transform,
                pose_group: primary_group,
                name: name.clone(),
                properties,
            },
        );
        let mirror = mirror_entry.map(|entry| {
            let mirror = self.cache.add_variation(class, actor_key, entry);
            self.cache.record_mirror(class, variation, mirror);
            mirror
        });

        world.set_registered(component, true);
        if let Some(reference) = consumed_reference {
            world.set_registered(reference, true);
        }
        if destroy_after_registration {
            if let Some(reference) = consumed_reference {
                self.queue_destroy(reference);
            }
            self.queue_destroy(component);
        }

        Ok(RegistrationOutcome::Created { variation, mirror })
    }

    /// Generates the opposite-hand version of `source`, owned by this
    /// subsystem on behalf of `requester`.
    pub fn generate_mirrored_hand_pose_data(
        &mut self,
        requester: ComponentKey,
        source: &HandPoseData,
    ) -> Arc<HandPoseData> {
        let mirrored = Arc::new(mirrored_pose_data(source, self.last_mirrored_suffix));
        self.last_mirrored_suffix = self.last_mirrored_suffix.wrapping_add(1);

        let handle = self.generated.add(requester, Arc::clone(&mirrored));
        log::debug!("Generated mirrored pose '{}' ({handle:?}) from '{}'", mirrored.name, source.name);
        mirrored
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Best cached grab pose on `actor` for a hand at `hand_transform`.
    ///
    /// Only selection events run a match; anything else returns `None`.
    pub fn check_for_hand_pose(
        &mut self,
        world: &World,
        actor: ActorKey,
        handedness: Handedness,
        hand_transform: &Transform,
        event: &InteractorStateEvent,
    ) -> Option<GrabPoseMatch> {
        if !event.triggers_pose_match() {
            log::trace!("Skipping pose match for {event:?}");
            return None;
        }
        let Some(actor_ref) = world.actor(actor) else {
            log::warn!("check_for_hand_pose: interactable actor {actor:?} is invalid");
            return None;
        };

        if self.settings.debug_pose_vectors {
            let start = hand_transform.position;
            let end = start + hand_transform.up_vector().normalize_or_zero() * self.settings.debug_arrow_length;
            self.debug.arrow(start, end);
        }

        let found = PoseMatcher::new(&self.cache).find_best_match(
            actor_ref.class,
            actor,
            &actor_ref.transform,
            handedness,
            hand_transform,
        );
        if let Some(found) = &found {
            log::debug!(
                "Matched '{}' (variation {}) on '{}' with score {}",
                found.pose.name,
                found.variation,
                actor_ref.name,
                found.distance
            );
        }
        found
    }

    /// [`check_for_hand_pose`](Self::check_for_hand_pose) for a hand visual,
    /// using its handedness and world transform.
    pub fn check_for_hand_visual(
        &mut self,
        world: &World,
        actor: ActorKey,
        visual: &HandVisual,
        event: &InteractorStateEvent,
    ) -> Option<GrabPoseMatch> {
        let handedness = visual.handedness();
        let hand_transform = visual.world_transform();
        self.check_for_hand_pose(world, actor, handedness, &hand_transform, event)
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Destroys the oldest queued component, then records debug shapes.
    pub fn tick(&mut self, world: &mut World, _dt: f32) {
        self.debug.clear();

        if let Some(component) = self.destroy_queue.pop_front() {
            world.set_registered(component, false);
            if !world.destroy_component(component) {
                log::trace!("Queued grab pose {component:?} was already destroyed");
            }
        }

        if self.settings.debug_pose_transforms {
            self.record_pose_transforms(world);
        }
    }

    fn record_pose_transforms(&mut self, world: &World) {
        let axis_length = self.settings.debug_axis_length;
        for (key, actor) in world.actors() {
            if !actor.has_begun_play {
                continue;
            }
            let Some(class_cache) = self.cache.class(actor.class) else {
                continue;
            };
            let Some(variations) = class_cache.instance_variations(key) else {
                continue;
            };

            self.debug.coordinate_system(actor.transform, axis_length);
            for &index in variations {
                if let Some(entry) = class_cache.entry(index) {
                    self.debug
                        .coordinate_system(entry.transform.placed_on(&actor.transform), axis_length);
                }
            }
        }
    }
}

/// First direct child in `MirrorReference` mode. Extra references are
/// ignored with a warning.
fn find_mirror_reference(world: &World, name: &str, children: &[ComponentKey]) -> Option<ComponentKey> {
    let mut references = children.iter().copied().filter(|&child| {
        world
            .component(child)
            .is_some_and(|c| c.properties.pose_mode == GrabPoseMode::MirrorReference)
    });
    let first = references.next()?;
    if references.next().is_some() {
        log::warn!("Found multiple mirror references for '{name}'; only the first is used");
    }
    Some(first)
}
