use crate::math::function::function::Function;

/// `outer(inner(x))`，定義域沿用 `inner`。
#[derive(Debug, Clone)]
pub struct Composition<F1, F2> {
    outer: F1,
    inner: F2
}

impl<F1: Function, F2: Function> Composition<F1, F2> {
    pub fn new(outer: F1, inner: F2) -> Composition<F1, F2> {
        Composition { outer, inner }
    }
}

impl<F1: Function, F2: Function> Function for Composition<F1, F2> {
    fn left_domain_border(&self) -> f64 {
        self.inner.left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        self.inner.right_domain_border()
    }

    fn value(&self, x: f64) -> f64 {
        self.outer.value(self.inner.value(x))
    }
}
