use frame_filter_common::config::RectConfig;

/// Axis-aligned rectangle in device space, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_config(config: &RectConfig) -> Self {
        Self::new(config.x, config.y, config.width, config.height)
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Edges as `(left, top, right, bottom)`, tolerating negative extents.
    fn edges(&self) -> (f64, f64, f64, f64) {
        let (x0, x1) = ordered(self.x, self.x + self.width);
        let (y0, y1) = ordered(self.y, self.y + self.height);
        (x0, y0, x1, y1)
    }

    pub(crate) fn snapped(&self) -> Self {
        let (x0, y0, x1, y1) = self.edges();
        let (x0, y0, x1, y1) = (x0.round(), y0.round(), x1.round(), y1.round());
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// `None` for non-finite rectangles.
    pub(crate) fn to_skia(self) -> Option<tiny_skia::Rect> {
        let (x0, y0, x1, y1) = self.edges();
        tiny_skia::Rect::from_ltrb(x0 as f32, y0 as f32, x1 as f32, y1 as f32)
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelBounds {
    pub(crate) fn pixel(x: u32, y: u32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + 1,
            y1: y + 1,
        }
    }

    pub fn union(self, other: PixelBounds) -> PixelBounds {
        PixelBounds {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_extents_are_normalized() {
        let rect = Rect::new(10.0, 10.0, -4.0, -2.0).to_skia().unwrap();
        assert_eq!((rect.left(), rect.top()), (6.0, 8.0));
        assert_eq!((rect.right(), rect.bottom()), (10.0, 10.0));
        assert!(Rect::new(10.0, 10.0, -4.0, -2.0).is_empty());
    }

    #[test]
    fn snapping_rounds_every_edge() {
        let snapped = Rect::new(0.4, 1.6, 2.2, 2.0).snapped();
        assert_eq!(snapped, Rect::new(0.0, 2.0, 3.0, 2.0));
    }

    #[test]
    fn non_finite_rect_has_no_skia_form() {
        assert!(Rect::new(f64::NAN, 0.0, 1.0, 1.0).to_skia().is_none());
    }

    #[test]
    fn union_grows_to_cover_both() {
        let a = PixelBounds::pixel(2, 3);
        let b = PixelBounds { x0: 0, y0: 5, x1: 1, y1: 9 };
        assert_eq!(a.union(b), PixelBounds { x0: 0, y0: 3, x1: 3, y1: 9 });
    }
}
