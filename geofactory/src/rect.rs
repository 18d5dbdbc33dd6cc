//! Axis-aligned rectangle in planar coordinates.

use nalgebra::{Point2, Scalar};
use num_traits::{FromPrimitive, Num};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect<N = f64> {
    x_min: N,
    y_min: N,
    x_max: N,
    y_max: N,
}

impl<N: Num + Copy + PartialOrd + Scalar + FromPrimitive> Rect<N> {
    /// Creates a new rectangle. The bounds are reordered if `min` is greater than `max`.
    pub fn new(x_min: N, y_min: N, x_max: N, y_max: N) -> Self {
        let (x_min, x_max) = if x_min > x_max {
            (x_max, x_min)
        } else {
            (x_min, x_max)
        };
        let (y_min, y_max) = if y_min > y_max {
            (y_max, y_min)
        } else {
            (y_min, y_max)
        };

        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Minimum X value.
    pub fn x_min(&self) -> N {
        self.x_min
    }

    /// Maximum X value.
    pub fn x_max(&self) -> N {
        self.x_max
    }

    /// Minimum Y value.
    pub fn y_min(&self) -> N {
        self.y_min
    }

    /// Maximum Y value.
    pub fn y_max(&self) -> N {
        self.y_max
    }

    /// Width of the rectangle.
    pub fn width(&self) -> N {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> N {
        self.y_max - self.y_min
    }

    /// Bounding rectangle of the points. Returns `None` if the iterator is empty.
    pub fn from_points<'a>(mut points: impl Iterator<Item = &'a Point2<N>>) -> Option<Self>
    where
        N: 'a,
    {
        let first = points.next()?;
        let mut x_min = first.x;
        let mut y_min = first.y;
        let mut x_max = first.x;
        let mut y_max = first.y;

        for p in points {
            if x_min > p.x {
                x_min = p.x;
            }
            if y_min > p.y {
                y_min = p.y;
            }
            if x_max < p.x {
                x_max = p.x;
            }
            if y_max < p.y {
                y_max = p.y;
            }
        }

        Some(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Whether the point is inside the rectangle or on its border.
    pub fn contains(&self, point: &Point2<N>) -> bool {
        self.x_min <= point.x
            && self.x_max >= point.x
            && self.y_min <= point.y
            && self.y_max >= point.y
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Point2<N> {
        let two = N::one() + N::one();
        Point2::new(
            (self.x_min + self.x_max) / two,
            (self.y_min + self.y_max) / two,
        )
    }
}
