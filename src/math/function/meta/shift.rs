use crate::math::function::function::Function;

/// 平移：`f(x - dx) + dy`。
#[derive(Debug, Clone)]
pub struct Shift<F> {
    function: F,
    dx: f64,
    dy: f64
}

impl<F: Function> Shift<F> {
    pub fn new(function: F, dx: f64, dy: f64) -> Shift<F> {
        Shift { function, dx, dy }
    }
}

impl<F: Function> Function for Shift<F> {
    fn left_domain_border(&self) -> f64 {
        self.function.left_domain_border() + self.dx
    }

    fn right_domain_border(&self) -> f64 {
        self.function.right_domain_border() + self.dx
    }

    fn value(&self, x: f64) -> f64 {
        self.function.value(x - self.dx) + self.dy
    }
}
