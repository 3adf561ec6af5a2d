use crate::math::function::function::Function;

#[derive(Debug, Clone)]
pub struct Power<F> {
    base: F,
    power: f64
}

impl<F: Function> Power<F> {
    pub fn new(base: F, power: f64) -> Power<F> {
        Power { base, power }
    }
}

impl<F: Function> Function for Power<F> {
    fn left_domain_border(&self) -> f64 {
        self.base.left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        self.base.right_domain_border()
    }

    fn value(&self, x: f64) -> f64 {
        if !self.in_domain(x) {
            return f64::NAN;
        }
        self.base.value(x).powf(self.power)
    }
}
