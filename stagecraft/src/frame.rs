// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render snapshots.
//!
//! A [`Frame`] is everything a drawing surface needs for one repaint, in
//! display coordinates. Building one only reads the viewport and the
//! registry.

use hashbrown::HashMap;
use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;
use peniko::color::palette::css;
use stagecraft_objects::{Container, ObjectId, ObjectRegistry, StagePoint};
use stagecraft_view::StageViewport;

/// Marker diameter at scale `0`, before the scale term.
pub const MARKER_SIZE_FACTOR: f64 = 5.0;

/// Stack labels are only drawn above this scale.
pub const STACK_LABEL_MIN_SCALE: f64 = 0.25;

/// Stack labels are fully opaque above this scale.
pub const STACK_LABEL_OPAQUE_SCALE: f64 = 1.5;

/// Selection boxes are this many marker diameters wide.
pub const SELECTION_BOX_FACTOR: f64 = 1.5;

/// Stroke width of the selection box.
pub const SELECTION_STROKE_WIDTH: f64 = 2.0;

/// Dash pattern of the selection box.
pub const SELECTION_DASHES: [f64; 2] = [7.0, 5.0];

/// Fill used for types the palette does not know.
pub const DEFAULT_FILL: Color = css::BLACK;

/// Outline used for types the palette does not know.
pub const DEFAULT_OUTLINE: Color = css::RED;

/// Color of stack labels, before fading.
pub const STACK_LABEL_COLOR: Color = css::RED;

/// Color of the selection box.
pub const SELECTION_COLOR: Color = css::RED;

/// Marker diameter in display pixels at `scale`.
///
/// Markers grow with zoom, but slower than the image, so they stay visible
/// when zoomed out.
#[must_use]
pub fn marker_diameter(scale: f64) -> f64 {
    MARKER_SIZE_FACTOR * (scale * scale + 1.5).sqrt()
}

/// Outline width for a marker of `diameter`.
#[must_use]
pub fn marker_stroke_width(diameter: f64) -> f64 {
    diameter / 10.0 + 1.0
}

/// Alpha of stack labels at `scale`, or `None` when they are hidden.
#[must_use]
pub fn stack_label_alpha(scale: f64) -> Option<u8> {
    if scale <= STACK_LABEL_MIN_SCALE {
        None
    } else if scale > STACK_LABEL_OPAQUE_SCALE {
        Some(u8::MAX)
    } else {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "the value is in [0, 255] on this branch"
        )]
        let alpha = ((scale - STACK_LABEL_MIN_SCALE) * 204.0) as u8;
        Some(alpha)
    }
}

/// Per-type marker colors.
///
/// Both lookups default to "unknown", which falls back to [`DEFAULT_FILL`]
/// and [`DEFAULT_OUTLINE`].
pub trait MarkerPalette {
    /// Fill color for `object_type`.
    fn fill(&self, object_type: u16) -> Option<Color> {
        let _ = object_type;
        None
    }

    /// Outline color for `object_type`.
    fn outline(&self, object_type: u16) -> Option<Color> {
        let _ = object_type;
        None
    }
}

/// Palette that knows no types.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultPalette;

impl MarkerPalette for DefaultPalette {}

/// Palette backed by per-type color tables.
#[derive(Clone, Debug, Default)]
pub struct TypePalette {
    fills: HashMap<u16, Color>,
    outlines: HashMap<u16, Color>,
}

impl TypePalette {
    /// Creates an empty palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fill of `object_type`.
    #[must_use]
    pub fn with_fill(mut self, object_type: u16, color: Color) -> Self {
        self.fills.insert(object_type, color);
        self
    }

    /// Sets the outline of `object_type`.
    #[must_use]
    pub fn with_outline(mut self, object_type: u16, color: Color) -> Self {
        self.outlines.insert(object_type, color);
        self
    }
}

impl MarkerPalette for TypePalette {
    fn fill(&self, object_type: u16) -> Option<Color> {
        self.fills.get(&object_type).copied()
    }

    fn outline(&self, object_type: u16) -> Option<Color> {
        self.outlines.get(&object_type).copied()
    }
}

/// A filled and outlined circle for one object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    /// The object drawn.
    pub id: ObjectId,
    /// Center in display space.
    pub center: Point,
    /// Diameter in display pixels.
    pub diameter: f64,
    /// Outline width.
    pub stroke_width: f64,
    /// Fill color.
    pub fill: Color,
    /// Outline color.
    pub outline: Color,
}

impl Marker {
    /// Bounding square of the circle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, Size::new(self.diameter, self.diameter))
    }
}

/// Count drawn next to a position shared by several visible objects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackLabel {
    /// The shared stage position.
    pub position: StagePoint,
    /// Text baseline origin in display space, at the marker's top right.
    pub anchor: Point,
    /// Number of visible objects at the position.
    pub count: usize,
    /// Text color, faded at low zoom.
    pub color: Color,
}

/// Dashed box around the selected object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionBox {
    /// The selected object.
    pub id: ObjectId,
    /// Box in display space.
    pub rect: Rect,
    /// Stroke color.
    pub color: Color,
}

/// Everything needed to paint one stage.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Transform for the background image (image pixels to display).
    pub world_to_view: Affine,
    /// Background image size.
    pub image_size: Size,
    /// Scale the frame was built at.
    pub scale: f64,
    /// One marker per visible object, in registry order.
    pub markers: Vec<Marker>,
    /// Stack counts, in order of first appearance.
    pub stack_labels: Vec<StackLabel>,
    /// The selection, if it is visible.
    pub selection: Option<SelectionBox>,
}

/// Builds a frame for the objects of `registry` that pass `filter`.
#[must_use]
pub fn build_frame(
    viewport: &StageViewport,
    registry: &ObjectRegistry,
    filter: Option<Container>,
    selected: Option<ObjectId>,
    palette: &(impl MarkerPalette + ?Sized),
) -> Frame {
    let scale = viewport.scale();
    let diameter = marker_diameter(scale);
    let stroke_width = marker_stroke_width(diameter);
    let label_alpha = stack_label_alpha(scale);

    let mut markers = Vec::new();
    let mut stacks: Vec<(StagePoint, usize)> = Vec::new();
    let mut stack_index: HashMap<StagePoint, usize> = HashMap::new();
    let mut selection = None;

    for (id, object) in registry.visible(filter) {
        let position = object.position();
        let center = viewport.to_display(position.to_point());
        markers.push(Marker {
            id,
            center,
            diameter,
            stroke_width,
            fill: palette
                .fill(object.object_type())
                .unwrap_or(DEFAULT_FILL),
            outline: palette
                .outline(object.object_type())
                .unwrap_or(DEFAULT_OUTLINE),
        });
        if label_alpha.is_some() {
            let slot = *stack_index.entry(position).or_insert_with(|| {
                stacks.push((position, 0));
                stacks.len() - 1
            });
            stacks[slot].1 += 1;
        }
        if selected == Some(id) {
            let side = diameter * SELECTION_BOX_FACTOR;
            selection = Some(SelectionBox {
                id,
                rect: Rect::from_center_size(center, Size::new(side, side)),
                color: SELECTION_COLOR,
            });
        }
    }

    let stack_labels = match label_alpha {
        Some(alpha) => {
            let color = STACK_LABEL_COLOR.with_alpha(f32::from(alpha) / 255.0);
            stacks
                .into_iter()
                .filter(|&(_, count)| count > 1)
                .map(|(position, count)| {
                    let center = viewport.to_display(position.to_point());
                    StackLabel {
                        position,
                        anchor: Point::new(center.x + diameter / 2.0, center.y - diameter / 2.0),
                        count,
                        color,
                    }
                })
                .collect()
        }
        None => Vec::new(),
    };

    Frame {
        world_to_view: viewport.world_to_view(),
        image_size: viewport.image_size(),
        scale,
        markers,
        stack_labels,
        selection,
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};
    use peniko::color::palette::css;
    use stagecraft_objects::{Container, ObjectRegistry, PlacedObject, StagePoint};
    use stagecraft_view::StageViewport;

    use super::*;

    fn obj(x: u32, y: u32, object_type: u16, container: Container) -> PlacedObject {
        PlacedObject::new(StagePoint::new(x, y), object_type, vec![0; 8], 0xE140, container)
    }

    fn view(scale: f64) -> StageViewport {
        let mut view = StageViewport::new(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
        view.set_scale(scale);
        view
    }

    #[test]
    fn marker_metrics() {
        let d = marker_diameter(1.0);
        assert!((d - 5.0 * 2.5_f64.sqrt()).abs() < 1e-12, "diameter {d}");
        assert!((marker_stroke_width(10.0) - 2.0).abs() < 1e-12, "stroke");
    }

    #[test]
    fn label_alpha_fades_in() {
        assert_eq!(stack_label_alpha(0.25), None);
        assert_eq!(stack_label_alpha(0.2), None);
        assert_eq!(stack_label_alpha(0.75), Some(102));
        assert_eq!(stack_label_alpha(1.5), Some(255));
        assert_eq!(stack_label_alpha(40.0), Some(255));
    }

    #[test]
    fn markers_follow_filter_and_palette() {
        let registry = ObjectRegistry::from_objects([
            obj(10, 10, 1, Container::RegionTable),
            obj(20, 20, 2, Container::InitialTable),
        ])
        .unwrap();
        let palette = TypePalette::new().with_fill(1, css::BLUE);
        let frame = build_frame(
            &view(1.0),
            &registry,
            Some(Container::RegionTable),
            None,
            &palette,
        );
        assert_eq!(frame.markers.len(), 1);
        let marker = frame.markers[0];
        assert_eq!(marker.center, Point::new(10.0, 10.0));
        assert_eq!(marker.fill, css::BLUE);
        assert_eq!(marker.outline, DEFAULT_OUTLINE);
    }

    #[test]
    fn stacks_are_counted_per_position() {
        let registry = ObjectRegistry::from_objects([
            obj(30, 30, 0, Container::AllTables),
            obj(40, 40, 0, Container::AllTables),
            obj(30, 30, 0, Container::AllTables),
            obj(30, 30, 0, Container::InitialTable),
        ])
        .unwrap();
        let frame = build_frame(
            &view(2.0),
            &registry,
            Some(Container::AllTables),
            None,
            &DefaultPalette,
        );
        assert_eq!(frame.stack_labels.len(), 1);
        assert_eq!(frame.stack_labels[0].position, StagePoint::new(30, 30));
        assert_eq!(frame.stack_labels[0].count, 3);

        // Hidden objects do not count, and low zoom hides labels.
        let frame = build_frame(
            &view(2.0),
            &registry,
            Some(Container::RegionTable),
            None,
            &DefaultPalette,
        );
        assert_eq!(frame.stack_labels[0].count, 2);
        let frame = build_frame(
            &view(0.2),
            &registry,
            Some(Container::AllTables),
            None,
            &DefaultPalette,
        );
        assert!(frame.stack_labels.is_empty());
    }

    #[test]
    fn selection_box_only_when_visible() {
        let registry = ObjectRegistry::from_objects([obj(50, 50, 0, Container::RegionTable)]).unwrap();
        let id = registry.iter().next().unwrap().0;
        let shown = build_frame(
            &view(1.0),
            &registry,
            Some(Container::AllTables),
            Some(id),
            &DefaultPalette,
        );
        let rect = shown.selection.unwrap().rect;
        assert!((rect.width() - 1.5 * marker_diameter(1.0)).abs() < 1e-9, "box side");
        assert_eq!(rect.center(), Point::new(50.0, 50.0));

        let hidden = build_frame(
            &view(1.0),
            &registry,
            Some(Container::InitialTable),
            Some(id),
            &DefaultPalette,
        );
        assert!(hidden.selection.is_none());
    }
}
