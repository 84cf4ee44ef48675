//! Hand Pose Subsystem Tests
//!
//! Tests for:
//! - Registration outcomes (created, reused, disabled, mirror reference)
//! - Automatic mirroring with shared and reflected placement
//! - Manual mirroring through a MirrorReference child
//! - Destruction queue: FIFO, one component per tick
//! - Selection gating and debug shape recording

use std::sync::Arc;

use glam::{Quat, Vec3};

use grabpose::cache::{GrabPoseMode, GrabPoseProperties, MirrorMode, VariationIndex};
use grabpose::debug::DebugShape;
use grabpose::hand::{HandPoseData, Handedness};
use grabpose::interaction::{InteractorState, InteractorStateEvent};
use grabpose::scene::{ActorKey, Axis, ComponentKey, GrabPoseComponent, Transform, World};
use grabpose::settings::HandPoseSettings;
use grabpose::subsystem::{HandPoseSubsystem, RegistrationOutcome};
use grabpose::utils::ClassName;
use grabpose::HandPoseError;

const EPSILON: f32 = 1e-4;

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn grip_pose() -> Arc<HandPoseData> {
    Arc::new(HandPoseData::new("Grip", Handedness::Left))
}

fn spawn(world: &mut World, name: &str, class: ClassName) -> ActorKey {
    let actor = world.spawn_actor(name, class, Transform::IDENTITY);
    world.begin_play(actor);
    actor
}

fn attach(
    world: &mut World,
    actor: ActorKey,
    parent: Option<ComponentKey>,
    component: GrabPoseComponent,
) -> anyhow::Result<ComponentKey> {
    Ok(world.attach_grab_pose(actor, parent, component)?)
}

// ============================================================================
// Basic Registration
// ============================================================================

#[test]
fn first_registration_creates_a_variation() -> anyhow::Result<()> {
    init_logging();
    let class = ClassName::new("BP_Sub_First");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::default();
    let actor = spawn(&mut world, "Mug", class);
    let grip = attach(&mut world, actor, None, GrabPoseComponent::new("Grip", Some(grip_pose())))?;

    let outcome = subsystem.register_hand_pose_data(&mut world, grip, false)?;

    assert_eq!(
        outcome,
        RegistrationOutcome::Created {
            variation: VariationIndex(0),
            mirror: None
        }
    );
    assert!(world.component(grip).is_some_and(GrabPoseComponent::is_registered));
    assert_eq!(
        subsystem.variation_cache().instance_variations(class, actor),
        Some(&[VariationIndex(0)][..])
    );
    assert!(subsystem.pending_destruction().is_empty());
    Ok(())
}

#[test]
fn second_instance_reuses_the_variation() -> anyhow::Result<()> {
    let class = ClassName::new("BP_Sub_Reuse");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::default();
    let pose = grip_pose();
    let a = spawn(&mut world, "MugA", class);
    let b = spawn(&mut world, "MugB", class);
    let grip_a = attach(&mut world, a, None, GrabPoseComponent::new("Grip", Some(Arc::clone(&pose))))?;
    let grip_b = attach(&mut world, b, None, GrabPoseComponent::new("Grip", Some(pose)))?;

    subsystem.register_hand_pose_data(&mut world, grip_a, false)?;
    let outcome = subsystem.register_hand_pose_data(&mut world, grip_b, true)?;

    assert_eq!(outcome, RegistrationOutcome::Reused(VariationIndex(0)));
    let class_cache = subsystem.variation_cache().class(class).expect("class cached");
    assert_eq!(class_cache.len(), 1);
    assert_eq!(class_cache.instance_variations(b), Some(&[VariationIndex(0)][..]));
    assert_eq!(subsystem.pending_destruction().iter().copied().collect::<Vec<_>>(), vec![grip_b]);
    Ok(())
}

#[test]
fn disabled_pose_is_skipped_but_destroyed() -> anyhow::Result<()> {
    let class = ClassName::new("BP_Sub_Disabled");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::default();
    let actor = spawn(&mut world, "Mug", class);
    let grip = attach(
        &mut world,
        actor,
        None,
        GrabPoseComponent::new("Grip", Some(grip_pose())).disabled(),
    )?;

    let outcome = subsystem.register_hand_pose_data(&mut world, grip, true)?;

    assert_eq!(outcome, RegistrationOutcome::Disabled);
    assert!(subsystem.variation_cache().class(class).is_none());
    assert_eq!(subsystem.pending_destruction().len(), 1);
    Ok(())
}

#[test]
fn missing_pose_data_is_an_error() -> anyhow::Result<()> {
    init_logging();
    let class = ClassName::new("BP_Sub_NoPose");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::default();
    let actor = spawn(&mut world, "Mug", class);
    let grip = attach(&mut world, actor, None, GrabPoseComponent::new("Grip", None))?;

    let result = subsystem.register_hand_pose_data(&mut world, grip, true);

    assert_eq!(result, Err(HandPoseError::MissingPoseData("Grip".into())));
    assert!(subsystem.variation_cache().class(class).is_none());
    assert!(subsystem.pending_destruction().is_empty());
    Ok(())
}

#[test]
fn destroyed_component_cannot_register() -> anyhow::Result<()> {
    let class = ClassName::new("BP_Sub_Gone");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::default();
    let actor = spawn(&mut world, "Mug", class);
    let grip = attach(&mut world, actor, None, GrabPoseComponent::new("Grip", Some(grip_pose())))?;
    assert!(world.destroy_component(grip));

    let result = subsystem.register_hand_pose_data(&mut world, grip, false);
    assert_eq!(result, Err(HandPoseError::InvalidComponent(grip)));
    Ok(())
}

#[test]
fn mirror_reference_is_left_to_its_parent() -> anyhow::Result<()> {
    let class = ClassName::new("BP_Sub_RefAlone");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::default();
    let actor = spawn(&mut world, "Mug", class);
    let reference = attach(
        &mut world,
        actor,
        None,
        GrabPoseComponent::new("Ref", None)
            .with_properties(GrabPoseProperties::default().with_pose_mode(GrabPoseMode::MirrorReference)),
    )?;

    let outcome = subsystem.register_hand_pose_data(&mut world, reference, true)?;

    assert_eq!(outcome, RegistrationOutcome::DeferredToParent);
    assert!(subsystem.variation_cache().class(class).is_none());
    assert!(subsystem.pending_destruction().is_empty());
    Ok(())
}

// ============================================================================
// Automatic Mirroring
// ============================================================================

#[test]
fn automatic_mirror_shares_the_placement() -> anyhow::Result<()> {
    let class = ClassName::new("BP_Sub_AutoShared");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::default();
    let actor = spawn(&mut world, "Mug", class);
    let grip = attach(
        &mut world,
        actor,
        None,
        GrabPoseComponent::new("Grip", Some(grip_pose()))
            .with_properties(GrabPoseProperties::default().with_mirroring(MirrorMode::Automatic)),
    )?;

    let outcome = subsystem.register_hand_pose_data(&mut world, grip, false)?;

    assert_eq!(
        outcome,
        RegistrationOutcome::Created {
            variation: VariationIndex(0),
            mirror: None
        }
    );
    let group = subsystem
        .variation_cache()
        .pose_group(class, VariationIndex(0))
        .expect("variation cached");
    assert_eq!(group.len(), 2);
    let right = group.get(Handedness::Right).expect("mirrored pose");
    assert_eq!(right.name, "Grip_Mirror_1");
    assert!(right.is_mirrored);

    let generated: Vec<_> = subsystem.mirrors_requested_by(grip).collect();
    assert_eq!(generated.len(), 1);
    assert!(Arc::ptr_eq(&generated[0], right));
    Ok(())
}

#[test]
fn automatic_mirror_reflects_the_placement() -> anyhow::Result<()> {
    let class = ClassName::new("BP_Sub_AutoPlaced");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::default();
    let a = spawn(&mut world, "MugA", class);
    let b = spawn(&mut world, "MugB", class);
    let pose = grip_pose();
    let properties = GrabPoseProperties::default()
        .with_mirroring(MirrorMode::Automatic)
        .with_mirrored_location(Axis::X);
    let placement = Transform::from_translation(Vec3::new(4.0, 2.0, 1.0));

    let grip_a = attach(
        &mut world,
        a,
        None,
        GrabPoseComponent::new("Grip", Some(Arc::clone(&pose)))
            .with_relative_transform(placement)
            .with_properties(properties),
    )?;
    let grip_b = attach(
        &mut world,
        b,
        None,
        GrabPoseComponent::new("Grip", Some(pose))
            .with_relative_transform(placement)
            .with_properties(properties),
    )?;

    let outcome = subsystem.register_hand_pose_data(&mut world, grip_a, false)?;
    assert_eq!(
        outcome,
        RegistrationOutcome::Created {
            variation: VariationIndex(0),
            mirror: Some(VariationIndex(1))
        }
    );

    let class_cache = subsystem.variation_cache().class(class).expect("class cached");
    let mirror = class_cache.entry(VariationIndex(1)).expect("mirror entry");
    assert!(approx_vec(mirror.transform.position, Vec3::new(-4.0, 2.0, 1.0)));
    assert!(mirror.pose_group.contains(Handedness::Right));
    assert!(!mirror.pose_group.contains(Handedness::Left));
    assert_eq!(class_cache.mirror_of(VariationIndex(0)), Some(VariationIndex(1)));

    // A later instance with the same pose gets both entries
    let outcome = subsystem.register_hand_pose_data(&mut world, grip_b, false)?;
    assert_eq!(outcome, RegistrationOutcome::Reused(VariationIndex(0)));
    assert_eq!(
        subsystem.variation_cache().instance_variations(class, b),
        Some(&[VariationIndex(0), VariationIndex(1)][..])
    );
    Ok(())
}

#[test]
fn mirror_names_keep_counting() -> anyhow::Result<()> {
    let class = ClassName::new("BP_Sub_Counting");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::default();
    let actor = spawn(&mut world, "Mug", class);
    let auto = GrabPoseProperties::default().with_mirroring(MirrorMode::Automatic);
    let first = attach(
        &mut world,
        actor,
        None,
        GrabPoseComponent::new("Grip", Some(grip_pose())).with_properties(auto),
    )?;
    let second = attach(
        &mut world,
        actor,
        None,
        GrabPoseComponent::new("Pinch", Some(Arc::new(HandPoseData::new("Pinch", Handedness::Left))))
            .with_properties(auto),
    )?;

    subsystem.register_hand_pose_data(&mut world, first, false)?;
    subsystem.register_hand_pose_data(&mut world, second, false)?;

    let names: Vec<String> = subsystem
        .generated_mirrors()
        .iter()
        .map(|(_, pose)| pose.name.clone())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Grip_Mirror_1".to_string()));
    assert!(names.contains(&"Pinch_Mirror_2".to_string()));
    Ok(())
}

// ============================================================================
// Manual Mirroring
// ============================================================================

#[test]
fn manual_mirror_uses_the_reference_child() -> anyhow::Result<()> {
    init_logging();
    let class = ClassName::new("BP_Sub_Manual");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::default();
    let actor = spawn(&mut world, "Mug", class);

    let grip_placement = Transform::from_rotation_translation(Quat::from_rotation_z(90f32.to_radians()), Vec3::X);
    let grip = attach(
        &mut world,
        actor,
        None,
        GrabPoseComponent::new("Grip", Some(grip_pose()))
            .with_relative_transform(grip_placement)
            .with_properties(GrabPoseProperties::default().with_mirroring(MirrorMode::Manual)),
    )?;
    let reference = attach(
        &mut world,
        actor,
        Some(grip),
        GrabPoseComponent::new("GripRef", None)
            .with_relative_transform(Transform::from_translation(Vec3::new(2.0, 0.0, 0.0)))
            .with_properties(GrabPoseProperties::default().with_pose_mode(GrabPoseMode::MirrorReference)),
    )?;

    let outcome = subsystem.register_hand_pose_data(&mut world, grip, true)?;
    assert_eq!(
        outcome,
        RegistrationOutcome::Created {
            variation: VariationIndex(0),
            mirror: Some(VariationIndex(1))
        }
    );

    let class_cache = subsystem.variation_cache().class(class).expect("class cached");
    let mirror = class_cache.entry(VariationIndex(1)).expect("mirror entry");
    // Reference offset (2, 0, 0) rotated 90° about Z from (1, 0, 0)
    assert!(approx_vec(mirror.transform.position, Vec3::new(1.0, 2.0, 0.0)));
    assert!(mirror.pose_group.contains(Handedness::Right));

    assert!(world.component(reference).is_some_and(GrabPoseComponent::is_registered));
    assert_eq!(
        subsystem.pending_destruction().iter().copied().collect::<Vec<_>>(),
        vec![reference, grip]
    );
    Ok(())
}

#[test]
fn manual_mirror_uses_the_first_of_several_references() -> anyhow::Result<()> {
    init_logging();
    let class = ClassName::new("BP_Sub_ManualTwoRefs");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::default();
    let actor = spawn(&mut world, "Mug", class);
    let grip = attach(
        &mut world,
        actor,
        None,
        GrabPoseComponent::new("Grip", Some(grip_pose()))
            .with_relative_transform(Transform::from_translation(Vec3::X))
            .with_properties(GrabPoseProperties::default().with_mirroring(MirrorMode::Manual)),
    )?;
    let reference_properties = GrabPoseProperties::default().with_pose_mode(GrabPoseMode::MirrorReference);
    let first = attach(
        &mut world,
        actor,
        Some(grip),
        GrabPoseComponent::new("FirstRef", None)
            .with_relative_transform(Transform::from_translation(Vec3::new(0.0, 3.0, 0.0)))
            .with_properties(reference_properties),
    )?;
    let second = attach(
        &mut world,
        actor,
        Some(grip),
        GrabPoseComponent::new("SecondRef", None)
            .with_relative_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 7.0)))
            .with_properties(reference_properties),
    )?;

    let outcome = subsystem.register_hand_pose_data(&mut world, grip, true)?;
    assert_eq!(
        outcome,
        RegistrationOutcome::Created {
            variation: VariationIndex(0),
            mirror: Some(VariationIndex(1))
        }
    );

    let class_cache = subsystem.variation_cache().class(class).expect("class cached");
    assert_eq!(class_cache.len(), 2);
    let mirror = class_cache.entry(VariationIndex(1)).expect("mirror entry");
    assert!(approx_vec(mirror.transform.position, Vec3::new(1.0, 3.0, 0.0)));

    assert!(world.component(first).is_some_and(GrabPoseComponent::is_registered));
    assert!(!world.component(second).is_some_and(GrabPoseComponent::is_registered));
    assert_eq!(
        subsystem.pending_destruction().iter().copied().collect::<Vec<_>>(),
        vec![first, grip]
    );
    Ok(())
}

#[test]
fn manual_mirror_without_reference_keeps_the_primary() -> anyhow::Result<()> {
    init_logging();
    let class = ClassName::new("BP_Sub_ManualMissing");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::default();
    let actor = spawn(&mut world, "Mug", class);
    let grip = attach(
        &mut world,
        actor,
        None,
        GrabPoseComponent::new("Grip", Some(grip_pose()))
            .with_properties(GrabPoseProperties::default().with_mirroring(MirrorMode::Manual)),
    )?;

    let outcome = subsystem.register_hand_pose_data(&mut world, grip, false)?;

    assert_eq!(
        outcome,
        RegistrationOutcome::Created {
            variation: VariationIndex(0),
            mirror: None
        }
    );
    assert!(subsystem.generated_mirrors().is_empty());
    Ok(())
}

// ============================================================================
// Tick
// ============================================================================

#[test]
fn tick_destroys_one_component_in_order() -> anyhow::Result<()> {
    let class = ClassName::new("BP_Sub_Tick");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::default();
    let actor = spawn(&mut world, "Mug", class);
    let first = attach(&mut world, actor, None, GrabPoseComponent::new("A", Some(grip_pose())))?;
    let second = attach(
        &mut world,
        actor,
        None,
        GrabPoseComponent::new("B", Some(grip_pose()))
            .with_relative_transform(Transform::from_translation(Vec3::Y)),
    )?;

    subsystem.register_hand_pose_data(&mut world, first, true)?;
    subsystem.register_hand_pose_data(&mut world, second, true)?;
    assert_eq!(world.num_components(), 2);

    subsystem.tick(&mut world, 0.016);
    assert!(!world.contains_component(first));
    assert!(world.contains_component(second));

    subsystem.tick(&mut world, 0.016);
    assert!(!world.contains_component(second));
    assert!(subsystem.pending_destruction().is_empty());

    // The cache outlives the components
    assert_eq!(subsystem.variation_cache().class(class).map(|c| c.len()), Some(2));
    subsystem.tick(&mut world, 0.016);
    Ok(())
}

#[test]
fn tick_records_pose_transforms_when_enabled() -> anyhow::Result<()> {
    let class = ClassName::new("BP_Sub_DebugTransforms");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::new(HandPoseSettings {
        debug_pose_transforms: true,
        ..Default::default()
    });
    let actor = spawn(&mut world, "Mug", class);
    world.set_actor_transform(actor, Transform::from_translation(Vec3::new(0.0, 0.0, 50.0)));
    let idle = world.spawn_actor("Idle", class, Transform::IDENTITY);
    let grip = attach(
        &mut world,
        actor,
        None,
        GrabPoseComponent::new("Grip", Some(grip_pose()))
            .with_relative_transform(Transform::from_translation(Vec3::X * 3.0)),
    )?;
    let idle_grip = attach(&mut world, idle, None, GrabPoseComponent::new("Grip", Some(grip_pose())))?;
    subsystem.register_hand_pose_data(&mut world, grip, false)?;
    subsystem.register_hand_pose_data(&mut world, idle_grip, false)?;

    subsystem.tick(&mut world, 0.016);

    // Only the actor that began play is drawn: itself plus its variation
    let origins: Vec<Vec3> = subsystem
        .debug_shapes()
        .iter()
        .filter_map(|shape| match shape {
            DebugShape::CoordinateSystem { transform, .. } => Some(transform.position),
            DebugShape::Arrow { .. } => None,
        })
        .collect();
    assert_eq!(origins.len(), 2);
    assert!(approx_vec(origins[0], Vec3::new(0.0, 0.0, 50.0)));
    assert!(approx_vec(origins[1], Vec3::new(3.0, 0.0, 50.0)));
    Ok(())
}

// ============================================================================
// Matching Through The Subsystem
// ============================================================================

#[test]
fn only_selection_runs_a_match() -> anyhow::Result<()> {
    let class = ClassName::new("BP_Sub_Select");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::new(HandPoseSettings {
        debug_pose_vectors: true,
        ..Default::default()
    });
    let actor = spawn(&mut world, "Mug", class);
    let grip = attach(&mut world, actor, None, GrabPoseComponent::new("Grip", Some(grip_pose())))?;
    subsystem.register_hand_pose_data(&mut world, grip, false)?;
    let hand = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));

    let hover = InteractorStateEvent::new(InteractorState::Normal, InteractorState::Hover);
    assert!(subsystem
        .check_for_hand_pose(&world, actor, Handedness::Left, &hand, &hover)
        .is_none());
    assert!(subsystem.debug_shapes().is_empty());

    let found = subsystem
        .check_for_hand_pose(&world, actor, Handedness::Left, &hand, &InteractorStateEvent::select())
        .expect("select matches");
    assert_eq!(found.variation, VariationIndex(0));
    assert_eq!(found.pose.name, "Grip");

    let arrows: Vec<_> = subsystem
        .debug_shapes()
        .iter()
        .filter_map(|shape| match shape {
            DebugShape::Arrow { start, end } => Some((*start, *end)),
            DebugShape::CoordinateSystem { .. } => None,
        })
        .collect();
    assert_eq!(arrows.len(), 1);
    assert!(approx_vec(arrows[0].0, Vec3::X));
    assert!(approx_vec(arrows[0].1, Vec3::new(1.0, 0.0, 15.0)));
    Ok(())
}

#[test]
fn unknown_actor_or_hand_finds_nothing() -> anyhow::Result<()> {
    let class = ClassName::new("BP_Sub_Nothing");
    let mut world = World::new();
    let mut subsystem = HandPoseSubsystem::default();
    let actor = spawn(&mut world, "Mug", class);
    let grip = attach(&mut world, actor, None, GrabPoseComponent::new("Grip", Some(grip_pose())))?;
    subsystem.register_hand_pose_data(&mut world, grip, false)?;
    let select = InteractorStateEvent::select();

    assert!(subsystem
        .check_for_hand_pose(&world, actor, Handedness::Right, &Transform::IDENTITY, &select)
        .is_none());

    let other = spawn(&mut world, "Other", class);
    assert!(subsystem
        .check_for_hand_pose(&world, other, Handedness::Left, &Transform::IDENTITY, &select)
        .is_none());

    world.destroy_actor(actor);
    assert!(subsystem
        .check_for_hand_pose(&world, actor, Handedness::Left, &Transform::IDENTITY, &select)
        .is_none());
    Ok(())
}
