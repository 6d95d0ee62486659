use derive_more::{
    Add, AddAssign, Deref, DerefMut, Display, From, Into, MulAssign, Sub, SubAssign, Sum,
};

/// A distance expressed in typographic points (1/72 of an inch).
///
/// All horizontal and vertical measures in the crate are [Pt] values. The
/// wrapped [f32] is accessible directly through [Deref] or [Into] when
/// interfacing with drawing surfaces that work in raw floats.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Deref,
    DerefMut,
    Display,
    From,
    Into,
    MulAssign,
    Sum,
)]
pub struct Pt(pub f32);

impl Pt {
    /// The larger of `self` and `other`
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    /// The smaller of `self` and `other`
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

impl std::ops::Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl std::ops::Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl std::ops::Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}
