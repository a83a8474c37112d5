use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use super::{Space, Vector};

/// 2D position in space `S`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point<S: Space> {
    pub x: S::Scalar,
    pub y: S::Scalar,
    _space: PhantomData<S>,
}

impl<S: Space> Point<S> {
    #[inline]
    pub fn new(x: S::Scalar, y: S::Scalar) -> Self {
        Self { x, y, _space: PhantomData }
    }

    #[inline]
    pub fn origin() -> Self {
        Self::default()
    }

    /// Displacement from the origin of the space.
    #[inline]
    pub fn to_vector(self) -> Vector<S> {
        Vector::new(self.x, self.y)
    }
}

impl<S: Space<Scalar = f32>> Point<S> {
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<S: Space> Add<Vector<S>> for Point<S>
where
    S::Scalar: Add<Output = S::Scalar>,
{
    type Output = Self;
    #[inline]
    fn add(self, rhs: Vector<S>) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<S: Space> Sub<Vector<S>> for Point<S>
where
    S::Scalar: Sub<Output = S::Scalar>,
{
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Vector<S>) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<S: Space> Sub for Point<S>
where
    S::Scalar: Sub<Output = S::Scalar>,
{
    type Output = Vector<S>;
    #[inline]
    fn sub(self, rhs: Self) -> Vector<S> {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<S: Space> AddAssign<Vector<S>> for Point<S>
where
    S::Scalar: Add<Output = S::Scalar>,
{
    #[inline]
    fn add_assign(&mut self, rhs: Vector<S>) {
        *self = *self + rhs;
    }
}

impl<S: Space> SubAssign<Vector<S>> for Point<S>
where
    S::Scalar: Sub<Output = S::Scalar>,
{
    #[inline]
    fn sub_assign(&mut self, rhs: Vector<S>) {
        *self = *self - rhs;
    }
}
