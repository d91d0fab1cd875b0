//! The affine transform used to place and skew characters on the stage.

use crate::Twips;

/// A 2x3 affine transform matrix, as used by `PlaceObject*` and the bitmap
/// variant of [`crate::FillStyle`].
///
/// On the wire the components are split into three optional/mandatory
/// groups (SWF19 p.23): an optional scale pair `(a, d)`, an optional
/// rotate/skew pair `(b, c)`, and a mandatory translate pair `(tx, ty)`,
/// each with its own bit width. This type only models the logical value;
/// [`crate::read`] and [`crate::write`] own the bit-width bookkeeping.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix {
    /// Scale X component, stored as a 16.16 fixed-point ratio.
    pub a: f32,
    /// Rotate/skew component.
    pub b: f32,
    /// Rotate/skew component.
    pub c: f32,
    /// Scale Y component, stored as a 16.16 fixed-point ratio.
    pub d: f32,
    /// X translation.
    pub tx: Twips,
    /// Y translation.
    pub ty: Twips,
}

impl Matrix {
    /// The identity transform: no scale, rotation, or translation.
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: Twips::zero(),
        ty: Twips::zero(),
    };

    /// Creates a matrix that only translates.
    pub fn translate(tx: Twips, ty: Twips) -> Self {
        Self {
            tx,
            ty,
            ..Self::IDENTITY
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_has_no_translation() {
        assert_eq!(Matrix::IDENTITY.tx, Twips::zero());
        assert_eq!(Matrix::IDENTITY.a, 1.0);
    }
}
