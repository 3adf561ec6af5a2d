use crate::math::function::function::Function;

/// 以 `base` 為底的對數，定義域 `[0, ∞)`；`log(0)` 為 `-∞`。
#[derive(Debug, Clone, Copy)]
pub struct Log {
    base: f64
}

impl Log {
    pub fn new(base: f64) -> Log {
        Log { base }
    }

    pub fn natural() -> Log {
        Log::new(std::f64::consts::E)
    }

    pub fn base(&self) -> f64 {
        self.base
    }
}

impl Function for Log {
    fn left_domain_border(&self) -> f64 {
        0.0
    }

    fn right_domain_border(&self) -> f64 {
        f64::INFINITY
    }

    fn value(&self, x: f64) -> f64 {
        if !self.in_domain(x) {
            return f64::NAN;
        }
        x.log(self.base)
    }
}
