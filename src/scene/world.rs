use std::sync::Arc;

use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::cache::GrabPoseProperties;
use crate::errors::{HandPoseError, Result};
use crate::hand::HandPoseData;
use crate::utils::ClassName;

use super::{ActorKey, ComponentKey, Transform};

/// An interactable object placed in the world.
#[derive(Debug, Clone)]
pub struct Actor {
    pub name: String,
    pub class: ClassName,
    pub transform: Transform,
    pub has_begun_play: bool,

    components: SmallVec<[ComponentKey; 4]>,
}

impl Actor {
    #[must_use]
    pub fn components(&self) -> &[ComponentKey] {
        &self.components
    }
}

/// A grab pose attached to an actor, optionally under another grab pose.
#[derive(Debug, Clone)]
pub struct GrabPoseComponent {
    pub name: String,
    /// Transform relative to the parent grab pose, or to the actor when
    /// attached at the root.
    pub relative_transform: Transform,
    pub properties: GrabPoseProperties,
    pub pose_data: Option<Arc<HandPoseData>>,
    /// Disabled poses never create variations.
    pub pose_disabled: bool,

    owner: ActorKey,
    parent: Option<ComponentKey>,
    children: SmallVec<[ComponentKey; 2]>,
    registered: bool,
}

impl GrabPoseComponent {
    #[must_use]
    pub fn new(name: &str, pose_data: Option<Arc<HandPoseData>>) -> Self {
        Self {
            name: name.to_string(),
            relative_transform: Transform::IDENTITY,
            properties: GrabPoseProperties::default(),
            pose_data,
            pose_disabled: false,
            owner: ActorKey::default(),
            parent: None,
            children: SmallVec::new(),
            registered: false,
        }
    }

    #[must_use]
    pub fn with_relative_transform(mut self, transform: Transform) -> Self {
        self.relative_transform = transform;
        self
    }

    #[must_use]
    pub fn with_properties(mut self, properties: GrabPoseProperties) -> Self {
        self.properties = properties;
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.pose_disabled = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn owner(&self) -> ActorKey {
        self.owner
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<ComponentKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[ComponentKey] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.registered
    }
}

/// Arena of actors and their grab pose components.
#[derive(Debug, Default)]
pub struct World {
    actors: SlotMap<ActorKey, Actor>,
    components: SlotMap<ComponentKey, GrabPoseComponent>,
}

impl World {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Actors
    // ========================================================================

    pub fn spawn_actor(&mut self, name: &str, class: impl Into<ClassName>, transform: Transform) -> ActorKey {
        self.actors.insert(Actor {
            name: name.to_string(),
            class: class.into(),
            transform,
            has_begun_play: false,
            components: SmallVec::new(),
        })
    }

    pub fn begin_play(&mut self, actor: ActorKey) {
        if let Some(actor) = self.actors.get_mut(actor) {
            actor.has_begun_play = true;
        }
    }

    #[must_use]
    pub fn actor(&self, key: ActorKey) -> Option<&Actor> {
        self.actors.get(key)
    }

    pub fn actor_mut(&mut self, key: ActorKey) -> Option<&mut Actor> {
        self.actors.get_mut(key)
    }

    pub fn actors(&self) -> impl Iterator<Item = (ActorKey, &Actor)> {
        self.actors.iter()
    }

    pub fn set_actor_transform(&mut self, key: ActorKey, transform: Transform) {
        if let Some(actor) = self.actors.get_mut(key) {
            actor.transform = transform;
        }
    }

    /// Removes an actor together with all of its components.
    pub fn destroy_actor(&mut self, key: ActorKey) -> bool {
        let Some(actor) = self.actors.remove(key) else {
            return false;
        };
        for component in actor.components {
            self.components.remove(component);
        }
        true
    }

    // ========================================================================
    // Components
    // ========================================================================

    /// Attaches a grab pose to `owner`, under `parent` when given.
    pub fn attach_grab_pose(
        &mut self,
        owner: ActorKey,
        parent: Option<ComponentKey>,
        mut component: GrabPoseComponent,
    ) -> Result<ComponentKey> {
        if !self.actors.contains_key(owner) {
            log::warn!("Cannot attach '{}': actor {owner:?} does not exist", component.name);
            return Err(HandPoseError::InvalidActor(owner));
        }
        if let Some(parent) = parent {
            let valid_parent = self.components.get(parent).is_some_and(|p| p.owner == owner);
            if !valid_parent {
                log::warn!("Cannot attach '{}': parent {parent:?} is not a grab pose of {owner:?}", component.name);
                return Err(HandPoseError::InvalidComponent(parent));
            }
        }

        component.owner = owner;
        component.parent = parent;
        component.children.clear();
        component.registered = false;

        let key = self.components.insert(component);
        if let Some(actor) = self.actors.get_mut(owner) {
            actor.components.push(key);
        }
        if let Some(parent) = parent.and_then(|p| self.components.get_mut(p)) {
            parent.children.push(key);
        }
        Ok(key)
    }

    #[must_use]
    pub fn component(&self, key: ComponentKey) -> Option<&GrabPoseComponent> {
        self.components.get(key)
    }

    pub fn component_mut(&mut self, key: ComponentKey) -> Option<&mut GrabPoseComponent> {
        self.components.get_mut(key)
    }

    #[must_use]
    pub fn contains_component(&self, key: ComponentKey) -> bool {
        self.components.contains_key(key)
    }

    #[must_use]
    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// Owning actor of a live component attached to a live actor.
    #[must_use]
    pub fn owning_actor(&self, key: ComponentKey) -> Option<(ActorKey, &Actor)> {
        let owner = self.components.get(key)?.owner;
        self.actors.get(owner).map(|actor| (owner, actor))
    }

    /// World transform of a component, resolved through its parent chain.
    #[must_use]
    pub fn component_world_transform(&self, key: ComponentKey) -> Option<Transform> {
        let component = self.components.get(key)?;
        let base = match component.parent {
            Some(parent) => self.component_world_transform(parent)?,
            None => self.actors.get(component.owner)?.transform,
        };
        Some(base.mul_transform(&component.relative_transform))
    }

    pub(crate) fn set_registered(&mut self, key: ComponentKey, registered: bool) {
        if let Some(component) = self.components.get_mut(key) {
            component.registered = registered;
        }
    }

    /// Unregisters and removes a component. Its children move to the
    /// actor root. Returns false when the component is already gone.
    pub fn destroy_component(&mut self, key: ComponentKey) -> bool {
        let Some(component) = self.components.remove(key) else {
            return false;
        };

        if let Some(parent) = component.parent.and_then(|p| self.components.get_mut(p)) {
            parent.children.retain(|c| *c != key);
        }
        if let Some(actor) = self.actors.get_mut(component.owner) {
            actor.components.retain(|c| *c != key);
        }
        for child in component.children {
            if let Some(child) = self.components.get_mut(child) {
                child.parent = None;
            }
        }
        log::trace!("Destroyed grab pose '{}'", component.name);
        true
    }
}
