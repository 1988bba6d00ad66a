// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection and drag scenarios through a scaled, panned viewport.

use kurbo::{Point, Size};
use stagecraft_objects::{Container, ObjectId, ObjectRegistry, PlacedObject, StagePoint};
use stagecraft_pointer::{PointerButton, PointerController, PointerOutcome};
use stagecraft_view::StageViewport;

fn registry(points: &[(u32, u32)]) -> (ObjectRegistry, Vec<ObjectId>) {
    let reg = ObjectRegistry::from_objects(points.iter().map(|&(x, y)| {
        PlacedObject::new(
            StagePoint::new(x, y),
            0,
            vec![0; 8],
            0xE140,
            Container::RegionTable,
        )
    }))
    .unwrap();
    let ids = reg.iter().map(|(id, _)| id).collect();
    (reg, ids)
}

fn zoomed_view() -> StageViewport {
    let mut view = StageViewport::new(Size::new(640.0, 480.0), Size::new(512.0, 512.0));
    view.set_scale(3.0);
    view.set_focus(Point::new(20.0, 20.0));
    view
}

fn click_world(
    ctl: &mut PointerController,
    world: Point,
    view: &StageViewport,
    reg: &ObjectRegistry,
) -> PointerOutcome {
    let at = view.to_display(world);
    ctl.on_press(PointerButton::Primary, at, view, reg);
    ctl.on_release(PointerButton::Primary, at, view, reg)
}

#[test]
fn nearer_object_wins_and_far_click_clears() {
    let view = zoomed_view();
    let (reg, ids) = registry(&[(10, 10), (10, 12)]);
    let mut ctl = PointerController::default();

    let out = click_world(&mut ctl, Point::new(10.0, 11.4), &view, &reg);
    assert_eq!(out, PointerOutcome::Selected(Some(ids[1])));

    let out = click_world(&mut ctl, Point::new(10.0, 9.0), &view, &reg);
    assert_eq!(out, PointerOutcome::Selected(Some(ids[0])));

    let out = click_world(&mut ctl, Point::new(100.0, 100.0), &view, &reg);
    assert_eq!(out, PointerOutcome::Selected(None));
    assert_eq!(ctl.selected(&reg), None);
}

#[test]
fn equidistant_click_selects_first_in_order() {
    // Display and world coordinates coincide at scale 1.
    let view = StageViewport::new(Size::new(512.0, 512.0), Size::new(512.0, 512.0));
    let (reg, ids) = registry(&[(10, 10), (10, 12)]);
    let mut ctl = PointerController::default();

    let out = click_world(&mut ctl, Point::new(10.0, 11.0), &view, &reg);
    assert_eq!(out, PointerOutcome::Selected(Some(ids[0])));
    assert_eq!(ctl.selected(&reg), Some(ids[0]));

    let out = click_world(&mut ctl, Point::new(100.0, 100.0), &view, &reg);
    assert_eq!(out, PointerOutcome::Selected(None));
    assert_eq!(ctl.selected(&reg), None);
}

#[test]
fn pick_radius_ignores_zoom() {
    let (reg, ids) = registry(&[(20, 20)]);
    let mut ctl = PointerController::default();
    for scale in [0.2, 1.0, 40.0] {
        let mut view = zoomed_view();
        view.set_scale(scale);
        let hit = click_world(&mut ctl, Point::new(24.0, 20.0), &view, &reg);
        assert_eq!(hit, PointerOutcome::Selected(Some(ids[0])), "scale {scale}");
        let miss = click_world(&mut ctl, Point::new(26.0, 20.0), &view, &reg);
        assert_eq!(miss, PointerOutcome::Selected(None), "scale {scale}");
    }
}

#[test]
fn drag_clamps_to_origin() {
    let mut view = zoomed_view();
    let (mut reg, ids) = registry(&[(10, 10)]);
    let mut ctl = PointerController::default();
    click_world(&mut ctl, Point::new(10.0, 10.0), &view, &reg);

    let press = view.to_display(Point::new(10.0, 10.0));
    ctl.on_press(PointerButton::Primary, press, &view, &reg);
    let target = view.to_display(Point::new(-5.0, -5.0));
    let out = ctl.on_move(target, &mut view, &mut reg);
    assert_eq!(
        out,
        PointerOutcome::Moved {
            id: ids[0],
            position: StagePoint::new(0, 0)
        }
    );
    ctl.on_release(PointerButton::Primary, target, &view, &reg);
    assert_eq!(reg.get(ids[0]).unwrap().position(), StagePoint::new(0, 0));
    assert_eq!(ctl.selected(&reg), Some(ids[0]));
}

#[test]
fn hidden_objects_cannot_be_selected() {
    let view = zoomed_view();
    let (reg, _) = registry(&[(10, 10)]);
    let mut ctl = PointerController::default();
    ctl.set_filter(Some(Container::InitialTable), &reg);
    let out = click_world(&mut ctl, Point::new(10.0, 10.0), &view, &reg);
    assert_eq!(out, PointerOutcome::Selected(None));

    ctl.set_filter(None, &reg);
    let out = click_world(&mut ctl, Point::new(10.0, 10.0), &view, &reg);
    assert_eq!(out, PointerOutcome::Selected(None));
}
