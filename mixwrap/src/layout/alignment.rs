// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Alignment, Line};
use crate::kurbo::{Rect, Vec2};

/// The box of `line` once aligned within `width`. Only x changes.
pub(crate) fn line_bounding_box(line: &Line, width: f64, alignment: Alignment) -> Rect {
    let bbox = line.bbox();
    let free_space = width - bbox.width();
    let offset = match alignment {
        Alignment::Left => return bbox,
        Alignment::Right => free_space,
        Alignment::Center => free_space * 0.5,
    };
    bbox + Vec2::new(offset, 0.0)
}

/// Aligns every line within `width`.
pub(crate) fn align(lines: &mut [Line], width: f64, alignment: Alignment) {
    for line in lines {
        let x = line_bounding_box(line, width, alignment).x0;
        line.set_x(x);
    }
}

/// Union of the line boxes, or [`Rect::ZERO`] when there are none.
pub(crate) fn multiline_bounding_box(lines: &[Line]) -> Rect {
    let mut boxes = lines.iter().map(Line::bbox);
    let Some(first) = boxes.next() else {
        return Rect::ZERO;
    };
    boxes.fold(first, |acc, bbox| acc.union(bbox))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kurbo::Point;
    use crate::layout::Advance;

    fn line(x: f64, y: f64, width: f64) -> Line {
        let mut line = Line::new(Point::new(x, y), 10.0);
        line.push(&Advance {
            ch: 'x',
            width,
            top: 0.0,
            bottom: 0.0,
        });
        line
    }

    #[test]
    fn alignment_moves_only_x() {
        let l = line(10.0, 20.0, 40.0);
        assert_eq!(
            line_bounding_box(&l, 100.0, Alignment::Left),
            Rect::new(10.0, 20.0, 50.0, 30.0),
            "left keeps the origin"
        );
        assert_eq!(
            line_bounding_box(&l, 100.0, Alignment::Right),
            Rect::new(70.0, 20.0, 110.0, 30.0),
            "right ends at the wrap width"
        );
        assert_eq!(
            line_bounding_box(&l, 100.0, Alignment::Center),
            Rect::new(40.0, 20.0, 80.0, 30.0),
            "center splits the free space"
        );
    }

    #[test]
    fn union_of_lines() {
        let mut lines = vec![line(0.0, 0.0, 30.0), line(0.0, 20.0, 50.0)];
        align(&mut lines, 60.0, Alignment::Right);
        assert_eq!(
            multiline_bounding_box(&lines),
            Rect::new(10.0, 0.0, 60.0, 30.0),
            "union spans all aligned lines"
        );
        assert_eq!(multiline_bounding_box(&[]), Rect::ZERO, "no lines");
    }
}
