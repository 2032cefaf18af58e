//! The widget contract every section implements, and the contexts the host
//! hands to widgets.

use crate::lifecycle::{FrameScheduler, ListenerKind, Listeners, WidgetId};
use crate::math::Rect;
use crate::pointfield::Viewport;
use crate::state::AppState;
use crate::surface::Surface;
use crossterm::event::KeyEvent;

/// Rows taken by the navigation bar at the top and the status line at the bottom
pub const HEADER_ROWS: u16 = 1;
pub const FOOTER_ROWS: u16 = 1;

/// Terminal geometry and the pixel size of one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub cols: u16,
    pub rows: u16,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Layout {
    pub fn new(cols: u16, rows: u16, cell_width: f64, cell_height: f64) -> Self {
        Layout {
            cols,
            rows,
            cell_width,
            cell_height,
        }
    }

    /// First terminal row of the body area
    pub fn body_top(&self) -> u16 {
        HEADER_ROWS.min(self.rows)
    }

    /// Number of terminal rows available to the section body
    pub fn body_rows(&self) -> u16 {
        self.rows.saturating_sub(HEADER_ROWS + FOOTER_ROWS)
    }

    /// The body area in virtual pixels
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.cols as f64 * self.cell_width,
            self.body_rows() as f64 * self.cell_height,
        )
    }

    /// Centre of a terminal cell in body-relative virtual pixels
    pub fn cell_to_pixels(&self, col: u16, row: u16) -> [f64; 2] {
        [
            (col as f64 + 0.5) * self.cell_width,
            (row as f64 - self.body_top() as f64 + 0.5) * self.cell_height,
        ]
    }

    /// Body-relative virtual pixels back to an absolute terminal cell
    pub fn pixels_to_cell(&self, p: [f64; 2]) -> (i32, i32) {
        (
            (p[0] / self.cell_width).floor() as i32,
            (p[1] / self.cell_height).floor() as i32 + self.body_top() as i32,
        )
    }

    /// Body-relative rectangle covering the given column range of the body
    pub fn columns(&self, first_col: u16, width_cols: u16) -> Rect {
        Rect::new(
            first_col as f64 * self.cell_width,
            0.0,
            width_cols as f64 * self.cell_width,
            self.body_rows() as f64 * self.cell_height,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifeCycle {
    /// The widget is now on screen
    Mount(Layout),
    /// The widget is leaving the screen; it must stop animating and drop its listeners
    Unmount,
    /// The terminal changed size while mounted
    Resize(Layout),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer position in body-relative virtual pixels
    PointerMove([f64; 2]),
    PointerLeave,
    Key(KeyEvent),
    /// A frame requested with `request_anim_frame` is due
    AnimFrame,
}

/// Context passed to `event` and `lifecycle`
pub struct EventCtx<'a> {
    id: WidgetId,
    listeners: &'a mut Listeners,
    frames: &'a mut FrameScheduler,
    handled: bool,
    paint_requested: bool,
}

impl<'a> EventCtx<'a> {
    pub fn new(id: WidgetId, listeners: &'a mut Listeners, frames: &'a mut FrameScheduler) -> Self {
        EventCtx {
            id,
            listeners,
            frames,
            handled: false,
            paint_requested: false,
        }
    }

    pub fn widget_id(&self) -> WidgetId {
        self.id
    }

    pub fn listen(&mut self, kind: ListenerKind) {
        self.listeners.add(self.id, kind);
    }

    pub fn remove_listeners(&mut self) -> usize {
        self.listeners.remove_all(self.id)
    }

    pub fn request_anim_frame(&mut self) {
        self.frames.request_frame(self.id);
    }

    pub fn cancel_anim_frame(&mut self) {
        self.frames.cancel(self.id);
    }

    pub fn request_paint(&mut self) {
        self.paint_requested = true;
    }

    pub fn set_handled(&mut self) {
        self.handled = true;
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }

    pub fn paint_requested(&self) -> bool {
        self.paint_requested
    }
}

/// Context passed to `paint`
pub struct PaintCtx<'a> {
    pub surface: &'a mut Surface,
    pub layout: Layout,
}

pub trait Widget {
    fn lifecycle(&mut self, ctx: &mut EventCtx, event: &LifeCycle, data: &AppState);
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut AppState);
    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState);
}
