use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use super::Space;

/// 2D displacement in space `S`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vector<S: Space> {
    pub x: S::Scalar,
    pub y: S::Scalar,
    _space: PhantomData<S>,
}

impl<S: Space> Vector<S> {
    #[inline]
    pub fn new(x: S::Scalar, y: S::Scalar) -> Self {
        Self { x, y, _space: PhantomData }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }
}

impl<S: Space<Scalar = f32>> Vector<S> {
    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Unit vector in the same direction. The zero vector stays zero.
    #[inline]
    pub fn normalized(self) -> Self {
        let l = self.length();
        if l == 0.0 { self } else { self / l }
    }

    /// Same direction, given length. The zero vector stays zero.
    #[inline]
    pub fn resized(self, length: f32) -> Self {
        let l = self.length();
        if l == 0.0 { self } else { self * (length / l) }
    }
}

impl<S: Space> Add for Vector<S>
where
    S::Scalar: Add<Output = S::Scalar>,
{
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<S: Space> Sub for Vector<S>
where
    S::Scalar: Sub<Output = S::Scalar>,
{
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<S: Space> Neg for Vector<S>
where
    S::Scalar: Neg<Output = S::Scalar>,
{
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<S: Space> Mul<f32> for Vector<S>
where
    S::Scalar: Mul<f32, Output = S::Scalar>,
{
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<S: Space> Div<f32> for Vector<S>
where
    S::Scalar: Div<f32, Output = S::Scalar>,
{
    type Output = Self;
    #[inline]
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl<S: Space> AddAssign for Vector<S>
where
    S::Scalar: Add<Output = S::Scalar>,
{
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<S: Space> SubAssign for Vector<S>
where
    S::Scalar: Sub<Output = S::Scalar>,
{
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
