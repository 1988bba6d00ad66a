// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stage scenarios: zoom animation, pointer editing, reload.

use std::sync::Arc;
use std::time::{Duration, Instant};

use kurbo::{Point, Size};
use stagecraft::{
    Container, ManualScheduler, PlacedObject, PointerButton, PointerOutcome, StageConfig,
    StageContext, StageError, StageId, StageLoad, StageSet, StagePoint, ThreadScheduler,
    UniformLayout,
};
use stagecraft_view::DEFAULT_ZOOM_SENSITIVITY;
use test_log::test;

const FIRST: StageId = StageId::new(0);

fn object(x: u32, y: u32, container: Container) -> PlacedObject {
    PlacedObject::new(StagePoint::new(x, y), 0x10, vec![0; 8], 0xE140, container)
}

fn manual(objects: Vec<PlacedObject>) -> (StageSet, Arc<ManualScheduler>) {
    let scheduler = Arc::new(ManualScheduler::new());
    let context = StageContext::new(UniformLayout::default()).with_scheduler(scheduler.clone());
    let stages = StageSet::load(
        vec![StageLoad::new(Size::new(1000.0, 1000.0), objects)],
        Size::new(400.0, 400.0),
        context,
    )
    .unwrap();
    (stages, scheduler)
}

#[test]
fn smooth_zoom_keeps_anchor_and_lands_on_target() {
    let (mut stages, scheduler) = manual(vec![]);
    let stage = stages.stage_mut(FIRST).unwrap();
    let anchor = Point::new(300.0, 300.0);
    let world_before = stage.viewport().to_world(anchor);

    stage.zoom(-7.5, anchor);
    assert!(stage.is_animating());
    assert_eq!(stage.scale(), 1.0, "nothing moves before the first frame");

    assert_eq!(scheduler.run_until_idle(100), 20);
    assert!(!stage.is_animating());
    assert_eq!(stage.scale(), 2.0);
    let world_after = stage.viewport().to_world(anchor);
    assert!(
        (world_after - world_before).hypot() < 1e-9,
        "anchor drifted from {world_before:?} to {world_after:?}"
    );
}

#[test]
fn new_zoom_replaces_running_animation() {
    let (mut stages, scheduler) = manual(vec![]);
    let stage = stages.stage_mut(FIRST).unwrap();
    let anchor = Point::new(100.0, 250.0);

    stage.zoom(-7.5, anchor);
    for _ in 0..5 {
        scheduler.run_frame();
    }
    let midway = stage.scale();
    assert!(midway > 1.0 && midway < 2.0, "midway scale {midway}");

    let expected = stage
        .viewport()
        .zoom_target(-7.5, anchor, DEFAULT_ZOOM_SENSITIVITY);
    stage.zoom(-7.5, anchor);
    assert_eq!(scheduler.run_until_idle(100), 20);
    assert_eq!(stage.scale(), expected.scale);
    assert_eq!(stage.focus(), expected.focus);
}

#[test]
fn zoom_stays_within_limits() {
    let (mut stages, scheduler) = manual(vec![]);
    let stage = stages.stage_mut(FIRST).unwrap();
    for _ in 0..10 {
        stage.zoom(7.0, Point::new(200.0, 200.0));
        scheduler.run_until_idle(100);
    }
    assert_eq!(stage.scale(), stage.min_scale());
    stages.set_scale(FIRST, 5000.0).unwrap();
    assert_eq!(stages.scale(FIRST), stages.max_scale(FIRST));
}

#[test]
fn threaded_zoom_converges() {
    let config = StageConfig {
        frame_interval: Duration::from_millis(1),
        ..StageConfig::default()
    };
    let context = StageContext::new(UniformLayout::default())
        .with_config(config)
        .with_scheduler(Arc::new(ThreadScheduler::new()));
    let mut stages = StageSet::load(
        vec![StageLoad::new(Size::new(800.0, 800.0), vec![])],
        Size::new(200.0, 200.0),
        context,
    )
    .unwrap();
    let stage = stages.stage_mut(FIRST).unwrap();
    stage.zoom(-7.5, Point::new(100.0, 100.0));

    let deadline = Instant::now() + Duration::from_secs(5);
    while stage.is_animating() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(2));
    }
    assert!(!stage.is_animating(), "animation did not finish in time");
    assert_eq!(stage.scale(), 2.0);
    assert!(stage.take_redraw());
}

#[test]
fn click_select_then_drag() {
    let (mut stages, _) = manual(vec![object(500, 500, Container::RegionTable)]);
    let stage = stages.stage_mut(FIRST).unwrap();
    let center = Point::new(200.0, 200.0);

    assert_eq!(
        stage.pointer_press(PointerButton::Primary, center),
        PointerOutcome::Ignored
    );
    let id = match stage.pointer_release(PointerButton::Primary, center) {
        PointerOutcome::Selected(Some(id)) => id,
        other => panic!("expected a selection, got {other:?}"),
    };

    assert_eq!(
        stage.pointer_press(PointerButton::Primary, center),
        PointerOutcome::DragArmed(id)
    );
    stage.take_redraw();
    stage.pointer_move(Point::new(220.0, 210.0));
    assert!(stage.take_redraw());
    assert_eq!(
        stage.pointer_release(PointerButton::Primary, Point::new(220.0, 210.0)),
        PointerOutcome::DragEnded(id)
    );
    assert_eq!(stage.selected(), Some(id), "drag keeps the selection");

    let objects = stages.current_objects(FIRST).unwrap();
    assert_eq!(objects[0].position(), StagePoint::new(520, 510));
}

#[test]
fn hiding_the_selection_clears_it() {
    let (mut stages, _) = manual(vec![object(500, 500, Container::RegionTable)]);
    let stage = stages.stage_mut(FIRST).unwrap();
    stage.pointer_press(PointerButton::Primary, Point::new(200.0, 200.0));
    stage.pointer_release(PointerButton::Primary, Point::new(200.0, 200.0));
    assert!(stage.selected().is_some());

    assert!(stage.set_filter(Some(Container::InitialTable)));
    assert_eq!(stages.selected_object(FIRST).unwrap(), None);
    assert_eq!(
        stages.stage_mut(FIRST).unwrap().remove_selected(),
        Err(StageError::NoObjectSelected)
    );
}

#[test]
fn edit_through_the_stage() {
    let (mut stages, _) = manual(vec![object(500, 500, Container::RegionTable)]);
    let stage = stages.stage_mut(FIRST).unwrap();
    stage.pointer_press(PointerButton::Primary, Point::new(200.0, 200.0));
    stage.pointer_release(PointerButton::Primary, Point::new(200.0, 200.0));

    let mut session = stage.begin_edit().unwrap();
    session.type_field.set_text("ab");
    let mut picker = stage.edit_picker(&session);
    picker.select(Some(1));
    session.apply_picker(&picker).unwrap();
    stage.take_redraw();
    let outcome = stage.commit_edit(&session).unwrap();
    assert!(outcome.type_changed && outcome.address_changed);
    assert!(stage.take_redraw());

    let describe = |t: u16| format!("type {t}");
    let summary = stage.summary(&describe).unwrap();
    assert_eq!(summary.lines()[0], "Type: 0x00ab");
    assert_eq!(summary.lines()[1], "Description: type 171");
    assert_eq!(summary.lines()[5], "Allocation address: 0xe180");
}

#[test]
fn add_at_the_view_focus() {
    let (mut stages, _) = manual(vec![]);
    let stage = stages.stage_mut(FIRST).unwrap();
    stage.pan_by(kurbo::Vec2::new(100.5, 0.0));

    let mut session = stage.begin_add().unwrap();
    assert_eq!(session.position(), StagePoint::new(400, 500));
    assert!(matches!(
        stage.commit_add(&session),
        Err(StageError::Edit(stagecraft::EditError::NoAddressSelected))
    ));

    let mut picker = stage.add_picker(&session);
    picker.select(Some(0));
    session.apply_picker(&picker).unwrap();
    let id = stage.commit_add(&session).unwrap();
    assert_eq!(stage.objects().get(id).unwrap().address(), 0xE140);
    assert_eq!(stage.block_table(None)[0].occupants.as_slice(), [id]);
}

#[test]
fn reload_resets_selection_and_clamps_focus() {
    let (mut stages, scheduler) = manual(vec![object(500, 500, Container::RegionTable)]);
    let stage = stages.stage_mut(FIRST).unwrap();
    stage.pointer_press(PointerButton::Primary, Point::new(200.0, 200.0));
    stage.pointer_release(PointerButton::Primary, Point::new(200.0, 200.0));
    stage.zoom(-7.5, Point::new(200.0, 200.0));
    scheduler.run_frame();

    assert_eq!(
        stages.reload(vec![]),
        Err(StageError::StageCountMismatch {
            expected: 1,
            found: 0
        })
    );
    assert!(stages.selected_object(FIRST).unwrap().is_some());

    stages
        .reload(vec![StageLoad::new(
            Size::new(300.0, 300.0),
            vec![object(10, 10, Container::AllTables)],
        )])
        .unwrap();
    let stage = stages.stage(FIRST).unwrap();
    assert!(!stage.is_animating());
    assert_eq!(stage.selected(), None);
    assert_eq!(stage.focus(), Point::new(300.0, 300.0));

    let scale = stage.scale();
    scheduler.run_until_idle(100);
    assert_eq!(scheduler.pending(), 0);
    assert_eq!(stage.scale(), scale, "the old animation never resumes");
}
