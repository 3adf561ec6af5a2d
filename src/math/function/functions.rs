//! 函數代數的便利建構函數。

use crate::math::function::function::Function;
use crate::math::function::meta::composition::Composition;
use crate::math::function::meta::mult::Mult;
use crate::math::function::meta::power::Power;
use crate::math::function::meta::scale::Scale;
use crate::math::function::meta::shift::Shift;
use crate::math::function::meta::sum::Sum;

pub fn sum<F1: Function, F2: Function>(lhs: F1, rhs: F2) -> Sum<F1, F2> {
    Sum::new(lhs, rhs)
}

pub fn mult<F1: Function, F2: Function>(lhs: F1, rhs: F2) -> Mult<F1, F2> {
    Mult::new(lhs, rhs)
}

pub fn power<F: Function>(base: F, power: f64) -> Power<F> {
    Power::new(base, power)
}

pub fn composition<F1: Function, F2: Function>(outer: F1, inner: F2) -> Composition<F1, F2> {
    Composition::new(outer, inner)
}

pub fn scale<F: Function>(function: F, sx: f64, sy: f64) -> Scale<F> {
    Scale::new(function, sx, sy)
}

pub fn shift<F: Function>(function: F, dx: f64, dy: f64) -> Shift<F> {
    Shift::new(function, dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    use crate::math::function::basic::exp::Exp;
    use crate::math::function::basic::log::Log;
    use crate::math::function::basic::trigonometric::{Cos, Sin};
    use crate::math::function::tabulated::arraytabulatedfunction::ArrayTabulatedFunction;
    use crate::math::function::tabulated::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
    use crate::math::function::tabulated::tabulatedfunction::TabulatedFunction;

    #[test]
    fn pythagorean_identity() {
        let identity = sum(power(Sin, 2.0), power(Cos, 2.0));
        for i in 0..20 {
            let x = i as f64 * 0.37 - 3.0;
            assert!((identity.value(x) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn log_of_exp_is_identity() {
        let function = composition(Log::natural(), Exp);
        assert!((function.value(2.5) - 2.5).abs() < 1e-12);
        assert_eq!(function.left_domain_border(), f64::NEG_INFINITY);
    }

    #[test]
    fn domain_is_intersection() {
        let lhs = ArrayTabulatedFunction::from_values(0.0, 2.0, &[0.0, 1.0, 2.0]).unwrap();
        let rhs = LinkedListTabulatedFunction::from_values(1.0, 3.0, &[5.0, 5.0, 5.0]).unwrap();
        let total = sum(&lhs, &rhs);
        assert_eq!(total.left_domain_border(), 1.0);
        assert_eq!(total.right_domain_border(), 2.0);
        assert_eq!(total.value(1.5), 6.5);
        assert!(total.value(0.5).is_nan());

        let product = mult(&lhs, Log::new(10.0));
        assert_eq!(product.left_domain_border(), 0.0);
        assert_eq!(product.right_domain_border(), 2.0);
        assert!((product.value(1.0) - 0.0).abs() < 1e-15);
        assert!(product.value(3.0).is_nan());
    }

    #[test]
    fn power_outside_domain_is_nan() {
        let table = ArrayTabulatedFunction::from_values(0.0, 1.0, &[2.0, 4.0]).unwrap();
        let squared = power(&table, 0.0);
        assert_eq!(squared.value(0.5), 1.0);
        assert!(squared.value(2.0).is_nan());
    }

    #[test]
    fn scale_and_shift() {
        let table = ArrayTabulatedFunction::from_values(0.0, 1.0, &[0.0, 1.0]).unwrap();

        let stretched = scale(&table, 2.0, 3.0);
        assert_eq!(stretched.left_domain_border(), 0.0);
        assert_eq!(stretched.right_domain_border(), 2.0);
        assert!((stretched.value(1.0) - 1.5).abs() < 1e-15);

        let mirrored = scale(&table, -1.0, 1.0);
        assert_eq!(mirrored.left_domain_border(), -1.0);
        assert_eq!(mirrored.right_domain_border(), 0.0);
        assert!((mirrored.value(-0.25) - 0.25).abs() < 1e-15);

        let moved = shift(Sin, PI / 2.0, 1.0);
        assert!((moved.value(PI / 2.0) - 1.0).abs() < 1e-15);
        assert!((moved.value(PI) - 2.0).abs() < 1e-15);
    }
}
