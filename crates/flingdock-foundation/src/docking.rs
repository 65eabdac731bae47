//! Resting-position geometry shared by the docking strategies.
//!
//! Everything here is a pure function of rectangles and points. Positions
//! are element origins (top-left); decisions that depend on where the
//! element *is* use its centre instead.

use flingdock_ui_graphics::{distance, Point, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Tie-break order for [`nearest_corner`].
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wall {
    Left,
    Top,
    Right,
    Bottom,
}

impl Wall {
    /// Left and right walls fix the x coordinate.
    pub fn is_vertical(self) -> bool {
        matches!(self, Wall::Left | Wall::Right)
    }
}

/// How the wall strategy picks a wall on release.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MoveMode {
    Left,
    Top,
    Right,
    Bottom,
    /// Left or right, whichever half the element is in.
    #[default]
    Vertical,
    /// Top or bottom, whichever half the element is in.
    Horizontal,
    /// Compares the vertical and horizontal candidates.
    Nearest,
}

impl MoveMode {
    /// The wall for the fixed modes, `None` for the position-dependent ones.
    pub fn fixed_wall(self) -> Option<Wall> {
        match self {
            MoveMode::Left => Some(Wall::Left),
            MoveMode::Top => Some(Wall::Top),
            MoveMode::Right => Some(Wall::Right),
            MoveMode::Bottom => Some(Wall::Bottom),
            MoveMode::Vertical | MoveMode::Horizontal | MoveMode::Nearest => None,
        }
    }
}

pub fn element_center(position: Point, size: Size) -> Point {
    Point::new(position.x + size.width / 2.0, position.y + size.height / 2.0)
}

pub fn corner_point(area: &Rect, corner: Corner) -> Point {
    match corner {
        Corner::TopLeft => Point::new(area.left(), area.top()),
        Corner::TopRight => Point::new(area.right(), area.top()),
        Corner::BottomLeft => Point::new(area.left(), area.bottom()),
        Corner::BottomRight => Point::new(area.right(), area.bottom()),
    }
}

/// Distance from `point` to each corner of `area`, in [`Corner::ALL`] order.
pub fn corner_distances(point: Point, area: &Rect) -> [(Corner, f32); 4] {
    Corner::ALL.map(|corner| (corner, distance(point, corner_point(area, corner))))
}

/// Corner of `area` closest to `point`. Ties keep the earlier corner.
pub fn nearest_corner(point: Point, area: &Rect) -> Corner {
    let distances = corner_distances(point, area);
    let mut best = distances[0];
    for candidate in &distances[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    best.0
}

pub fn is_near_corner(point: Point, area: &Rect, tolerance: f32) -> bool {
    corner_distances(point, area)
        .iter()
        .any(|(_, distance)| *distance <= tolerance)
}

/// Horizontal distance from `point` to the left and right walls of `area`.
///
/// Only the side walls are measured: they are the ones a docked element
/// rests against in the default vertical mode.
pub fn wall_distances(point: Point, area: &Rect) -> [(Wall, f32); 2] {
    [
        (Wall::Left, distance(point, Point::new(area.left(), point.y))),
        (Wall::Right, distance(point, Point::new(area.right(), point.y))),
    ]
}

pub fn is_near_wall(point: Point, area: &Rect, tolerance: f32) -> bool {
    wall_distances(point, area)
        .iter()
        .any(|(_, distance)| *distance <= tolerance)
}

/// Picks the wall for `mode` given the element centre and the move area.
pub fn choose_wall(mode: MoveMode, center: Point, move_area: &Rect) -> Wall {
    if let Some(wall) = mode.fixed_wall() {
        return wall;
    }

    let area_center = move_area.center();
    let vertical = if center.x < area_center.x {
        Wall::Left
    } else {
        Wall::Right
    };
    let horizontal = if center.y < area_center.y {
        Wall::Top
    } else {
        Wall::Bottom
    };

    match mode {
        MoveMode::Horizontal => horizontal,
        MoveMode::Nearest => nearest_of(vertical, horizontal, center, move_area),
        _ => vertical,
    }
}

/// Compares the distances normalised by the move area's size. The
/// horizontal candidate wins when the normalised distance to the vertical
/// wall is larger.
fn nearest_of(vertical: Wall, horizontal: Wall, center: Point, move_area: &Rect) -> Wall {
    let width = move_area.width;
    let height = move_area.height;
    if width <= 0.0 && height <= 0.0 {
        return vertical;
    }
    if width <= 0.0 {
        return horizontal;
    }
    if height <= 0.0 {
        return vertical;
    }

    let candidate_x = if vertical == Wall::Left {
        move_area.left()
    } else {
        move_area.right()
    };
    let candidate_y = if horizontal == Wall::Top {
        move_area.top()
    } else {
        move_area.bottom()
    };
    let distance_to_vertical = (center.x - candidate_x).abs();
    let distance_to_horizontal = (center.y - candidate_y).abs();

    if distance_to_vertical / width > distance_to_horizontal / height {
        horizontal
    } else {
        vertical
    }
}

/// Resting point against `wall`. Only the perpendicular axis moves; the
/// other coordinate comes from `position`.
pub fn wall_point(move_area: &Rect, wall: Wall, position: Point) -> Point {
    match wall {
        Wall::Left => Point::new(move_area.left(), position.y),
        Wall::Right => Point::new(move_area.right(), position.y),
        Wall::Top => Point::new(position.x, move_area.top()),
        Wall::Bottom => Point::new(position.x, move_area.bottom()),
    }
}

#[cfg(test)]
#[path = "tests/docking_tests.rs"]
mod tests;
