use crate::math::function::function::Function;

/// 沿 x 軸伸縮 `sx` 倍、沿 y 軸伸縮 `sy` 倍：`sy * f(x / sx)`。
///
/// `sx` 為負時左右邊界對調。
#[derive(Debug, Clone)]
pub struct Scale<F> {
    function: F,
    sx: f64,
    sy: f64
}

impl<F: Function> Scale<F> {
    pub fn new(function: F, sx: f64, sy: f64) -> Scale<F> {
        Scale { function, sx, sy }
    }

    fn borders(&self) -> (f64, f64) {
        let lhs = self.function.left_domain_border() * self.sx;
        let rhs = self.function.right_domain_border() * self.sx;
        if self.sx < 0.0 { (rhs, lhs) } else { (lhs, rhs) }
    }
}

impl<F: Function> Function for Scale<F> {
    fn left_domain_border(&self) -> f64 {
        self.borders().0
    }

    fn right_domain_border(&self) -> f64 {
        self.borders().1
    }

    fn value(&self, x: f64) -> f64 {
        self.sy * self.function.value(x / self.sx)
    }
}
