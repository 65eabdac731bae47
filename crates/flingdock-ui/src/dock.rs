//! Where a released element comes to rest.

use flingdock_core::Completion;
use flingdock_foundation::{
    choose_wall, corner_point, element_center, is_near_corner, is_near_wall, nearest_corner,
    wall_point, Corner, MoveMode, Wall,
};
use flingdock_ui_graphics::{Point, Rect, Size};

use crate::config::DragConfig;

/// The containing region plus the two rectangles derived from it for an
/// element of `size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockAreas {
    /// Region the element lives in.
    pub area: Rect,
    /// Element size the rectangles were derived for.
    pub size: Size,
    /// Legal positions of the element's origin: `area` with the right and
    /// bottom edges pulled in by the element size.
    pub move_area: Rect,
    /// Bounds applied to animated positions. Looser than `move_area` so a
    /// fling can overshoot before settling.
    pub anim_area: Rect,
}

impl DockAreas {
    pub fn new(area: Rect, size: Size) -> Self {
        Self {
            area,
            size,
            move_area: area.shrink_to_movable(size),
            anim_area: default_anim_area(&area, size),
        }
    }

    pub fn with_anim_area(mut self, anim_area: Rect) -> Self {
        self.anim_area = anim_area;
        self
    }

    /// Whether these areas still describe `area` with an element of `size`.
    pub fn matches(&self, area: &Rect, size: Size) -> bool {
        self.area == *area && self.size == size
    }
}

/// Two element sizes of slack around the move area on every side.
pub fn default_anim_area(area: &Rect, size: Size) -> Rect {
    let slack_x = 2.0 * size.width;
    let slack_y = 2.0 * size.height;
    Rect::from_ltrb(
        area.left() - slack_x,
        area.top() - slack_y,
        area.right() - size.width + slack_x,
        area.bottom() - size.height + slack_y,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DockTarget {
    Corner(Corner),
    Wall(Wall),
}

impl DockTarget {
    /// Resting origin for this target. A wall only fixes one coordinate;
    /// the other comes from `position`.
    pub fn resting_point(self, position: Point, move_area: &Rect) -> Point {
        match self {
            DockTarget::Corner(corner) => corner_point(move_area, corner),
            DockTarget::Wall(wall) => wall_point(move_area, wall, position),
        }
    }
}

/// Final result of one docking animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DockOutcome {
    Docked { target: DockTarget, point: Point },
    /// A new touch, an explicit cancel or a newer dock interrupted it.
    Cancelled,
}

impl DockOutcome {
    pub fn is_docked(&self) -> bool {
        matches!(self, DockOutcome::Docked { .. })
    }
}

/// Resolves once when the docking animation finishes or is interrupted.
pub type DockCompletion = Completion<DockOutcome>;

/// Picks resting targets for a [`DragHandler`](crate::DragHandler).
pub trait DockStrategy {
    /// Whether an un-dragged release with the element origin at `position`
    /// clicks instead of docking.
    fn is_eligible_for_click(&self, position: Point, areas: &DockAreas, config: &DragConfig)
        -> bool;

    /// Target for an element whose origin is (or is predicted to be) at
    /// `position`.
    fn choose_target(&self, position: Point, size: Size, areas: &DockAreas) -> DockTarget;
}

/// Docks to the nearest corner of the move area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CornerDock;

impl CornerDock {
    /// Corner picked from the element centre against the full area.
    pub fn corner_for(&self, position: Point, size: Size, areas: &DockAreas) -> Corner {
        nearest_corner(element_center(position, size), &areas.area)
    }
}

impl DockStrategy for CornerDock {
    fn is_eligible_for_click(
        &self,
        position: Point,
        areas: &DockAreas,
        config: &DragConfig,
    ) -> bool {
        config.moving_can_click || is_near_corner(position, &areas.move_area, config.click_tolerance)
    }

    fn choose_target(&self, position: Point, size: Size, areas: &DockAreas) -> DockTarget {
        DockTarget::Corner(self.corner_for(position, size, areas))
    }
}

/// Docks against a wall of the move area chosen by [`MoveMode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallDock {
    pub mode: MoveMode,
}

impl WallDock {
    pub fn new(mode: MoveMode) -> Self {
        Self { mode }
    }

    pub fn wall_for(&self, position: Point, size: Size, areas: &DockAreas) -> Wall {
        choose_wall(
            self.mode,
            element_center(position, size),
            &areas.move_area,
        )
    }
}

impl DockStrategy for WallDock {
    fn is_eligible_for_click(
        &self,
        position: Point,
        areas: &DockAreas,
        config: &DragConfig,
    ) -> bool {
        config.moving_can_click || is_near_wall(position, &areas.move_area, config.click_tolerance)
    }

    fn choose_target(&self, position: Point, size: Size, areas: &DockAreas) -> DockTarget {
        DockTarget::Wall(self.wall_for(position, size, areas))
    }
}
