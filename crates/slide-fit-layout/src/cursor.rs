//! Per-slide vertical flow cursor.

/// Next free vertical offset on a slide, in inches.
///
/// Only moves down, except for [`LayoutCursor::reset_to`] which centered
/// title slides use to restart their flow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutCursor {
    top: f32,
}

impl LayoutCursor {
    pub fn new(top: f32) -> Self {
        Self { top }
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    /// Move down by `height`; negative heights are ignored.
    pub fn advance(&mut self, height: f32) {
        if height > 0.0 {
            self.top += height;
        }
    }

    /// Move down to at least `top`.
    pub fn advance_to(&mut self, top: f32) {
        self.top = self.top.max(top);
    }

    /// Jump to `top` in either direction.
    pub fn reset_to(&mut self, top: f32) {
        self.top = top;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advancing_never_moves_up() {
        let mut cursor = LayoutCursor::new(0.6);
        cursor.advance(0.5);
        cursor.advance(-2.0);
        cursor.advance_to(0.2);
        assert!((cursor.top() - 1.1).abs() < 1e-6);
        cursor.advance_to(4.5);
        assert_eq!(cursor.top(), 4.5);
    }

    #[test]
    fn reset_is_explicit() {
        let mut cursor = LayoutCursor::new(2.0);
        cursor.reset_to(1.0);
        assert_eq!(cursor.top(), 1.0);
    }
}
