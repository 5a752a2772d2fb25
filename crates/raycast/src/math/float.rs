pub trait FloatAsExt: Sized {
    /// Returns `Some(f)` if `f` is far enough from zero (further than `eps`), else `None`.
    ///
    /// Returns `None` for NaN and `Some(f)` for +/- infty
    fn into_non_zero(self, eps: Self) -> Option<Self>;

    /// Returns `Some(f)` if `f` is finite, else `None`.
    ///
    /// Returns `None` for NaN and +/- infty
    fn into_finite(self) -> Option<Self>;

    /// Returns `Some(f)` if `f` is strictly positive and finite, else `None`.
    fn into_positive(self) -> Option<Self>;
}

impl FloatAsExt for f32 {
    fn into_non_zero(self, eps: Self) -> Option<f32> {
        (self.abs() > eps).then_some(self)
    }

    fn into_finite(self) -> Option<f32> {
        self.is_finite().then_some(self)
    }

    fn into_positive(self) -> Option<f32> {
        self.into_finite().filter(|f| *f > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::FloatAsExt;

    #[test]
    fn into_non_zero() {
        assert_eq!(0.0.into_non_zero(0.1), None);
        assert_eq!((-0.01).into_non_zero(0.1), None);
        assert_eq!((-1.0).into_non_zero(0.1), Some(-1.0));
        assert_eq!(f32::NAN.into_non_zero(0.1), None);
        assert_eq!(f32::INFINITY.into_non_zero(0.1), Some(f32::INFINITY));
    }

    #[test]
    fn into_finite() {
        assert_eq!(0.0.into_finite(), Some(0.0));
        assert_eq!((-1.0).into_finite(), Some(-1.0));
        assert_eq!(f32::NAN.into_finite(), None);
        assert_eq!(f32::NEG_INFINITY.into_finite(), None);
    }

    #[test]
    fn into_positive() {
        assert_eq!(2.5.into_positive(), Some(2.5));
        assert_eq!(0.0.into_positive(), None);
        assert_eq!((-3.0).into_positive(), None);
        assert_eq!(f32::INFINITY.into_positive(), None);
        assert_eq!(f32::NAN.into_positive(), None);
    }
}
