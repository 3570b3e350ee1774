//! Integer powers by repeated multiplication.

use crate::register::Register;

/// `a` raised to the compile-time exponent `N`.
///
/// `N = 0` yields [`Register::ones`], `N = 1` returns `a` untouched, and
/// larger exponents multiply `a * pow::<N - 1>(a)`; no general power
/// primitive is involved.
///
/// ```
/// use fusekit::expr::ipow;
///
/// assert_eq!(ipow::<f64, 0>(7.0), 1.0);
/// assert_eq!(ipow::<f64, 1>(7.0), 7.0);
/// assert_eq!(ipow::<f64, 3>(2.0), 8.0);
/// ```
#[inline]
pub fn ipow<R: Register, const N: u32>(a: R) -> R {
    pow_n(a, N)
}

#[inline]
pub(crate) fn pow_n<R: Register>(a: R, n: u32) -> R {
    match n {
        0 => R::ones(),
        1 => a,
        _ => {
            let mut acc = a;
            for _ in 1..n {
                acc = a * acc;
            }
            acc
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wide::f64x2;

    #[test]
    fn test_base_cases() {
        assert_eq!(ipow::<f64, 0>(0.0), 1.0);
        assert_eq!(ipow::<f64, 0>(f64::NAN), 1.0);
        assert_eq!(ipow::<f32, 1>(-3.5), -3.5);
    }

    #[test]
    fn test_recurrence() {
        let a = 1.1_f64;
        for n in 2..12 {
            assert_eq!(pow_n(a, n), a * pow_n(a, n - 1));
        }
        assert_eq!(ipow::<f64, 10>(2.0), 1024.0);
    }

    #[test]
    fn test_vector_power() {
        let a = <f64x2 as Register>::gather(|i| [2.0, -3.0][i]);
        assert_eq!(ipow::<_, 3>(a).to_array(), [8.0, -27.0]);
        assert_eq!(ipow::<_, 0>(a).to_array(), [1.0, 1.0]);
    }
}
