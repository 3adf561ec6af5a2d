use crate::math::function::function::Function;

// ─────────────────────────────────────────────
// 三角函數：定義域為整條實數線
// ─────────────────────────────────────────────

macro_rules! trigonometric_function {
    ($name:ident, $method:ident) => {
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl Function for $name {
            fn left_domain_border(&self) -> f64 {
                f64::NEG_INFINITY
            }

            fn right_domain_border(&self) -> f64 {
                f64::INFINITY
            }

            fn value(&self, x: f64) -> f64 {
                x.$method()
            }
        }
    };
}

trigonometric_function!(Sin, sin);
trigonometric_function!(Cos, cos);
trigonometric_function!(Tan, tan);

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn trigonometric_values() {
        assert_eq!(Sin.value(0.0), 0.0);
        assert_eq!(Cos.value(0.0), 1.0);
        assert!((Tan.value(PI / 4.0) - 1.0).abs() < 1e-15);
        assert!(Sin.in_domain(-1e300) && Cos.in_domain(1e300));
    }
}
