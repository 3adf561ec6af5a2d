use crate::math::function::function::Function;

#[derive(Debug, Default, Clone, Copy)]
pub struct Exp;

impl Function for Exp {
    fn left_domain_border(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn right_domain_border(&self) -> f64 {
        f64::INFINITY
    }

    fn value(&self, x: f64) -> f64 {
        x.exp()
    }
}
