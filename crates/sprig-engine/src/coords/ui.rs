//! Resolution of container-relative (`Ui`) geometry into screen space.

use super::{ScreenPoint, ScreenRect, ScreenVector, UiPoint, UiRect, UiVector};

impl UiRect {
    /// Places this rectangle inside `outer`.
    ///
    /// Positions are offset from the outer origin; every component resolves
    /// against the outer extent on its own axis.
    pub fn resolve(self, outer: ScreenRect) -> ScreenRect {
        ScreenRect::new(
            outer.x + self.x.resolve(outer.w),
            outer.y + self.y.resolve(outer.h),
            self.w.resolve(outer.w),
            self.h.resolve(outer.h),
        )
    }
}

impl UiPoint {
    pub fn resolve(self, outer: ScreenRect) -> ScreenPoint {
        ScreenPoint::new(outer.x + self.x.resolve(outer.w), outer.y + self.y.resolve(outer.h))
    }
}

impl UiVector {
    /// Vectors carry no position, so only the outer extent matters.
    pub fn resolve(self, outer: ScreenRect) -> ScreenVector {
        ScreenVector::new(self.x.resolve(outer.w), self.y.resolve(outer.h))
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::{Length, ScreenPoint, ScreenRect, ScreenVector, UiPoint, UiRect, UiVector};

    fn outer() -> ScreenRect {
        ScreenRect::new(100.0, 50.0, 800.0, 600.0)
    }

    #[test]
    fn rect_resolves_against_outer() {
        let inner = UiRect::new(
            Length::fr(0.5),
            Length::px(10.0),
            Length::fr(0.25) + Length::px(4.0),
            Length::fr(1.0) - Length::px(20.0),
        );
        assert_eq!(inner.resolve(outer()), ScreenRect::new(500.0, 60.0, 204.0, 580.0));
    }

    #[test]
    fn point_includes_origin_vector_does_not() {
        let p = UiPoint::new(Length::fr(1.0) - Length::px(116.0), Length::px(44.0));
        assert_eq!(p.resolve(outer()), ScreenPoint::new(784.0, 94.0));

        let v = UiVector::new(Length::fr(0.5), Length::px(-8.0));
        assert_eq!(v.resolve(outer()), ScreenVector::new(400.0, -8.0));
    }

    #[test]
    fn full_fraction_fills_outer() {
        let full = UiRect::new(Length::ZERO, Length::ZERO, Length::fr(1.0), Length::fr(1.0));
        assert_eq!(full.resolve(outer()), outer());
    }
}
