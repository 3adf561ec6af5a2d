use crate::math::function::function::Function;

/// `lhs(x) * rhs(x)`，定義域取交集。
#[derive(Debug, Clone)]
pub struct Mult<F1, F2> {
    lhs: F1,
    rhs: F2
}

impl<F1: Function, F2: Function> Mult<F1, F2> {
    pub fn new(lhs: F1, rhs: F2) -> Mult<F1, F2> {
        Mult { lhs, rhs }
    }
}

impl<F1: Function, F2: Function> Function for Mult<F1, F2> {
    fn left_domain_border(&self) -> f64 {
        self.lhs.left_domain_border().max(self.rhs.left_domain_border())
    }

    fn right_domain_border(&self) -> f64 {
        self.lhs.right_domain_border().min(self.rhs.right_domain_border())
    }

    fn value(&self, x: f64) -> f64 {
        if !self.in_domain(x) {
            return f64::NAN;
        }
        self.lhs.value(x) * self.rhs.value(x)
    }
}
