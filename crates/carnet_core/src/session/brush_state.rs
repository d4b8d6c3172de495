//! Active brush and draw/erase mode for one session.
//!
//! # Invariants
//! - Alpha is a function of the active family, never stored independently:
//!   highlighter forces `HIGHLIGHTER_ALPHA`, everything else forces 1.0,
//!   and every brush/color mutation recomputes it.
//! - Selecting a brush or color leaves eraser mode.

use crate::ink::brush::{Brush, BrushFamily, Color, StockBrush};

pub const HIGHLIGHTER_ALPHA: f32 = 0.3;
pub const DEFAULT_BRUSH_SIZE: f32 = 5.0;
pub const DEFAULT_EPSILON: f32 = 0.1;

/// Platform color theme, used to pick the default ink color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Brush state machine for one drawing session.
pub struct BrushState {
    brush: Brush,
    eraser_mode: bool,
    brush_picked: bool,
}

impl BrushState {
    /// Fresh session default: pressure pen, theme-keyed color, fixed size
    /// and simplification tolerance.
    pub fn new(theme: Theme) -> Self {
        let color = match theme {
            Theme::Dark => Color::WHITE,
            Theme::Light => Color::GRAY,
        };
        Self {
            brush: Brush::new(
                BrushFamily::Stock(StockBrush::PressurePen),
                color,
                DEFAULT_BRUSH_SIZE,
                DEFAULT_EPSILON,
            ),
            eraser_mode: false,
            brush_picked: false,
        }
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn eraser_mode(&self) -> bool {
        self.eraser_mode
    }

    /// Whether the user explicitly picked a brush this session. Gates the
    /// one-shot auto-switch to a note's saved custom family.
    pub fn brush_picked(&self) -> bool {
        self.brush_picked
    }

    pub fn set_eraser_mode(&mut self, enabled: bool) {
        self.eraser_mode = enabled;
    }

    pub fn change_brush(&mut self, family: BrushFamily) {
        self.eraser_mode = false;
        self.brush_picked = true;
        self.brush = self.brush.clone().with_family(family);
        self.reapply_alpha();
    }

    pub fn change_brush_and_size(&mut self, family: BrushFamily, size: f32) {
        self.eraser_mode = false;
        self.brush_picked = true;
        self.brush = self.brush.clone().with_family(family).with_size(size);
        self.reapply_alpha();
    }

    pub fn change_color(&mut self, color: Color) {
        self.eraser_mode = false;
        self.brush = self.brush.clone().with_color(color);
        self.reapply_alpha();
    }

    pub fn change_size(&mut self, size: f32) {
        self.brush = self.brush.clone().with_size(size);
    }

    /// Session-initiated family switch when a loaded note carries a custom
    /// family tag. Does not count as a user pick.
    pub fn adopt_family(&mut self, family: BrushFamily) {
        self.brush = self.brush.clone().with_family(family);
        self.reapply_alpha();
    }

    fn reapply_alpha(&mut self) {
        let alpha = if self.brush.family.is_highlighter() {
            HIGHLIGHTER_ALPHA
        } else {
            1.0
        };
        self.brush = self.brush.clone().with_color(self.brush.color.with_alpha(alpha));
    }
}
