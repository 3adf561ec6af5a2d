use std::fmt;

use serde::{
    Deserialize,
    Serialize
};

/// 兩個 x 的差距在此容差內視為同一點。
pub const EPS: f64 = 1e-9;

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FunctionPoint {
    x: f64,
    y: f64
}

impl FunctionPoint {
    pub fn new(x: f64, y: f64) -> FunctionPoint {
        FunctionPoint { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    pub fn slope(lhs_pt: &FunctionPoint, rhs_pt: &FunctionPoint) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }

    /// 線段 `lhs_pt`-`rhs_pt` 上的線性插值。
    ///
    /// `x` 恰好落在端點時直接回傳該端點的 y，不經過浮點運算。
    pub fn interpolate(lhs_pt: &FunctionPoint, rhs_pt: &FunctionPoint, x: f64) -> f64 {
        if x == lhs_pt.x {
            lhs_pt.y
        } else if x == rhs_pt.x {
            rhs_pt.y
        } else {
            lhs_pt.y + (rhs_pt.y - lhs_pt.y) * (x - lhs_pt.x) / (rhs_pt.x - lhs_pt.x)
        }
    }

    /// Whether two abscissas are the same point under [`EPS`].
    pub fn coincides(lhs_x: f64, rhs_x: f64) -> bool {
        (lhs_x - rhs_x).abs() <= EPS
    }
}

impl From<(f64, f64)> for FunctionPoint {
    fn from((x, y): (f64, f64)) -> Self {
        FunctionPoint::new(x, y)
    }
}

impl fmt::Display for FunctionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}; {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_hits_endpoints_exactly() {
        let lhs = FunctionPoint::new(0.1, 0.3);
        let rhs = FunctionPoint::new(0.7, 1.9);
        assert_eq!(FunctionPoint::interpolate(&lhs, &rhs, 0.1), 0.3);
        assert_eq!(FunctionPoint::interpolate(&lhs, &rhs, 0.7), 1.9);
    }

    #[test]
    fn interpolate_midpoint() {
        let lhs = FunctionPoint::new(1.0, 2.0);
        let rhs = FunctionPoint::new(3.0, 6.0);
        assert!((FunctionPoint::interpolate(&lhs, &rhs, 2.0) - 4.0).abs() < 1e-12);
        assert_eq!(FunctionPoint::slope(&lhs, &rhs), 2.0);
    }

    #[test]
    fn coincides_is_inclusive_at_eps() {
        assert!(FunctionPoint::coincides(1.0, 1.0));
        assert!(FunctionPoint::coincides(1.0, 1.0 + EPS / 2.0));
        assert!(!FunctionPoint::coincides(1.0, 1.0 + 1e-6));
    }

    #[test]
    fn display() {
        assert_eq!(FunctionPoint::new(2.2, 5.0).to_string(), "(2.2; 5)");
        assert_eq!(FunctionPoint::from((1.0, -0.5)).to_string(), "(1; -0.5)");
    }
}
