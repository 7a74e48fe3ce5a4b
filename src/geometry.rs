// Copyright 2026 the Gemboard Authors
// SPDX-License-Identifier: Apache-2.0

//! Pure geometry helpers for canvas-relative coordinates.
//!
//! All functions recompute from their inputs on every call; nothing is
//! cached, because the layout they describe may have changed between calls.
//! Callers guarantee the rects they pass describe elements that are actually
//! part of the current layout.

use kurbo::{Point, Rect};

/// Top-left corner of an element's bounding rect, integer-truncated.
///
/// Truncation keeps tile borders on whole pixels so strokes stay crisp.
pub fn position(rect: &Rect) -> Point {
    Point::new(rect.x0.trunc(), rect.y0.trunc())
}

/// The visual midpoint of an element's bounding rect.
pub fn center(rect: &Rect) -> Point {
    Point::new(
        rect.x0 + rect.width() / 2.0,
        rect.y0 + rect.height() / 2.0,
    )
}

/// Translate a pointer position into `container`'s coordinate space:
/// subtract the element's origin, add the container's.
pub fn relative_pointer_position(pointer: Point, element: &Rect, container: &Rect) -> Point {
    let element_origin = position(element);
    let container_origin = position(container);
    Point::new(
        pointer.x - element_origin.x + container_origin.x,
        pointer.y - element_origin.y + container_origin.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_truncates_to_whole_pixels() {
        let rect = Rect::new(10.7, 20.9, 30.0, 40.0);
        assert_eq!(position(&rect), Point::new(10.0, 20.0));
    }

    #[test]
    fn center_is_the_midpoint() {
        let rect = Rect::new(10.0, 20.0, 30.0, 60.0);
        assert_eq!(center(&rect), Point::new(20.0, 40.0));
    }

    #[test]
    fn relative_position_against_a_container_at_the_origin() {
        let tile = Rect::new(100.0, 50.0, 200.0, 90.0);
        let canvas = Rect::new(0.0, 0.0, 800.0, 600.0);
        let local = relative_pointer_position(Point::new(130.0, 70.0), &tile, &canvas);
        assert_eq!(local, Point::new(30.0, 20.0));
    }

    #[test]
    fn relative_position_respects_the_container_offset() {
        let element = Rect::new(10.0, 10.0, 20.0, 20.0);
        let container = Rect::new(4.0, 6.0, 100.0, 100.0);
        let local = relative_pointer_position(Point::new(15.0, 15.0), &element, &container);
        assert_eq!(local, Point::new(9.0, 11.0));
    }
}
