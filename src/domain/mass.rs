/// Body mass: a strictly positive finite value, or the immovable sentinel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mass {
    Finite(f64),
    /// Walls, anchors, paddles: unaffected by forces and impulses.
    Infinite,
}

impl Mass {
    /// Panics unless `value` is finite and > 0.
    pub fn finite(value: f64) -> Self {
        assert!(
            value.is_finite() && value > 0.0,
            "finite mass must be > 0, got {value}"
        );
        Mass::Finite(value)
    }

    /// False for a `Finite` payload that is zero, negative or not finite.
    #[inline]
    pub fn is_valid(&self) -> bool {
        match *self {
            Mass::Finite(m) => m.is_finite() && m > 0.0,
            Mass::Infinite => true,
        }
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        matches!(self, Mass::Infinite)
    }

    /// Raw value, `f64::INFINITY` for the sentinel.
    #[inline]
    pub fn value(&self) -> f64 {
        match *self {
            Mass::Finite(m) => m,
            Mass::Infinite => f64::INFINITY,
        }
    }

    /// 1/m, exactly zero for infinite mass (no divide-by-zero, no NaN).
    #[inline]
    pub fn inverse(&self) -> f64 {
        match *self {
            Mass::Finite(m) => 1.0 / m,
            Mass::Infinite => 0.0,
        }
    }

    /// Effective mass of a two-body collision.
    ///
    /// - both finite: mA*mB / (mA + mB)
    /// - one infinite: the other body's mass (the wall does not move)
    /// - both infinite: 0, nothing can change
    pub fn reduced(a: Mass, b: Mass) -> f64 {
        match (a, b) {
            (Mass::Finite(ma), Mass::Finite(mb)) => ma * mb / (ma + mb),
            (Mass::Infinite, Mass::Finite(m)) | (Mass::Finite(m), Mass::Infinite) => m,
            (Mass::Infinite, Mass::Infinite) => 0.0,
        }
    }
}

impl From<f64> for Mass {
    /// `f64::INFINITY` maps to [`Mass::Infinite`]; anything else must be a
    /// valid finite mass.
    fn from(value: f64) -> Self {
        if value == f64::INFINITY {
            Mass::Infinite
        } else {
            Mass::finite(value)
        }
    }
}
