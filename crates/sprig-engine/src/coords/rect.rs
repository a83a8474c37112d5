use std::marker::PhantomData;
use std::ops::{Add, Div, Sub};

use super::{Point, Space, Vector};

/// Axis-aligned rectangle in space `S` (origin + size).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect<S: Space> {
    pub x: S::Scalar,
    pub y: S::Scalar,
    pub w: S::Scalar,
    pub h: S::Scalar,
    _space: PhantomData<S>,
}

impl<S: Space> Rect<S> {
    #[inline]
    pub fn new(x: S::Scalar, y: S::Scalar, w: S::Scalar, h: S::Scalar) -> Self {
        Self { x, y, w, h, _space: PhantomData }
    }

    #[inline]
    pub fn from_origin_size(origin: Point<S>, size: Vector<S>) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    #[inline]
    pub fn origin(self) -> Point<S> {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn size(self) -> Vector<S> {
        Vector::new(self.w, self.h)
    }
}

impl<S: Space> Rect<S>
where
    S::Scalar: Add<Output = S::Scalar> + Sub<Output = S::Scalar> + Div<f32, Output = S::Scalar>,
{
    /// Rectangle of `size` centered on `center`.
    #[inline]
    pub fn at_position(center: Point<S>, size: Vector<S>) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn center(self) -> Point<S> {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

impl<S: Space> Rect<S>
where
    S::Scalar: Add<Output = S::Scalar> + PartialOrd,
{
    #[inline]
    pub fn max(self) -> Point<S> {
        Point::new(self.x + self.w, self.y + self.h)
    }

    /// Closed containment: both edges are inside.
    #[inline]
    pub fn contains(self, p: Point<S>) -> bool {
        p.x >= self.x && p.y >= self.y && p.x <= self.x + self.w && p.y <= self.y + self.h
    }
}

impl<S: Space<Scalar = f32>> Rect<S> {
    #[inline]
    pub fn is_empty(self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let (mut x, mut y, mut w, mut h) = (self.x, self.y, self.w, self.h);
        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }
        Self::new(x, y, w, h)
    }

    #[inline]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.x.max(b.x);
        let y0 = a.y.max(b.y);
        let x1 = (a.x + a.w).min(b.x + b.w);
        let y1 = (a.y + a.h).min(b.y + b.h);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 { None } else { Some(Self::new(x0, y0, w, h)) }
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::{
        Length, PixelPoint, PixelRect, ScreenPoint, ScreenRect, ScreenVector, UiPoint, UiRect,
        UiVector,
    };

    fn r(x: f32, y: f32, w: f32, h: f32) -> ScreenRect {
        ScreenRect::new(x, y, w, h)
    }
    fn p(x: f32, y: f32) -> ScreenPoint {
        ScreenPoint::new(x, y)
    }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_extent() {
        let n = r(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(n, r(6.0, 7.0, 4.0, 3.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_interior_point() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(p(5.0, 5.0)));
    }

    #[test]
    fn contains_both_edges_inclusive() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(p(0.0, 0.0)));
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(p(10.0, 10.0)));
    }

    #[test]
    fn contains_outside() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(p(-1.0, 5.0)));
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(p(5.0, 10.5)));
    }

    #[test]
    fn contains_pixel_rect() {
        let rect = PixelRect::new(0, 16, 64, 16);
        assert!(rect.contains(PixelPoint::new(64, 32)));
        assert!(!rect.contains(PixelPoint::new(3, 15)));
    }

    // ── center / at_position ──────────────────────────────────────────────

    #[test]
    fn at_position_centers_rect() {
        let rect = ScreenRect::at_position(p(50.0, 40.0), ScreenVector::new(20.0, 10.0));
        assert_eq!(rect, r(40.0, 35.0, 20.0, 10.0));
        assert_eq!(rect.center(), p(50.0, 40.0));
    }

    #[test]
    fn at_position_in_ui_space() {
        let center = UiPoint::new(Length::fr(1.0) - Length::px(116.0), Length::px(44.0));
        let size = UiVector::new(Length::px(192.0), Length::px(48.0));
        let rect = UiRect::at_position(center, size);
        assert_eq!(rect.x, Length::new(-212.0, 1.0));
        assert_eq!(rect.y, Length::px(20.0));
        assert_eq!(rect.w, Length::px(192.0));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(b), Some(r(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersect(b).is_none());
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
