use std::fmt;

use log::debug;
use serde::{
    Deserialize,
    Serialize
};

use crate::math::function::function::Function;
use crate::math::function::tabulated::functionpoint::{
    EPS,
    FunctionPoint
};
use crate::math::function::tabulated::tabulatedfunctionerror::TabulatedFunctionError;

/// 以有限個取樣點表示、以線性插值求值的函數。
///
/// # 不變量
/// - 任何時刻至少有 2 個點；
/// - x 依索引嚴格遞增，差距在 [`EPS`] 內視為重複；
/// - 定義域左右邊界等於第一個與最後一個點的 x。
///
/// 讀取的點一律是複本，修改回傳值不會影響表格本身。
/// 違反不變量的操作會回傳錯誤，表格維持原狀。
pub trait TabulatedFunction: Function {
    fn points_count(&self) -> usize;

    fn point(&self, index: usize) -> Result<FunctionPoint, TabulatedFunctionError>;

    fn point_x(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        self.point(index).map(|pt| pt.x())
    }

    fn point_y(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        self.point(index).map(|pt| pt.y())
    }

    fn set_point(&mut self, index: usize, point: FunctionPoint) -> Result<(), TabulatedFunctionError>;

    fn set_point_x(&mut self, index: usize, x: f64) -> Result<(), TabulatedFunctionError> {
        let y = self.point_y(index)?;
        self.set_point(index, FunctionPoint::new(x, y))
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), TabulatedFunctionError>;

    fn add_point(&mut self, point: FunctionPoint) -> Result<(), TabulatedFunctionError>;

    fn delete_point(&mut self, index: usize) -> Result<(), TabulatedFunctionError>;

    /// 依序複製所有點。
    fn points(&self) -> Vec<FunctionPoint> {
        (0..self.points_count())
            .filter_map(|i| self.point(i).ok())
            .collect()
    }

    /// 由任意順序的點建立表格：排序後檢查重複與點數。
    fn from_points(points: Vec<FunctionPoint>) -> Result<Self, TabulatedFunctionError>
        where Self: Sized;

    /// Deep copy of another table, whatever its representation.
    fn from_tabulated(function: &dyn TabulatedFunction) -> Self
        where Self: Sized;

    /// 在 `[left_x, right_x]` 上等距排列 `values`。
    fn from_values(left_x: f64, right_x: f64, values: &[f64]) -> Result<Self, TabulatedFunctionError>
        where Self: Sized {
        Self::from_points(uniform_points(left_x, right_x, values)?)
    }

    /// 等距的 `points_count` 個點，y 全為 0。
    fn with_count(left_x: f64, right_x: f64, points_count: usize) -> Result<Self, TabulatedFunctionError>
        where Self: Sized {
        Self::from_values(left_x, right_x, &vec![0.0; points_count])
    }
}

/// serde 用的中介格式：`{"points": [{"x": .., "y": ..}, ..]}`。
/// 反序列化後必須經過 [`TabulatedFunction::from_points`] 重新驗證。
#[derive(Serialize, Deserialize)]
pub struct TabulatedFunctionRecord {
    pub points: Vec<FunctionPoint>
}

// ─────────────────────────────────────────────
// 共用輔助函數
// ─────────────────────────────────────────────

/// 排序並驗證建構用的點。
pub fn validate_points(mut points: Vec<FunctionPoint>) -> Result<Vec<FunctionPoint>, TabulatedFunctionError> {
    if points.len() < 2 {
        return Err(TabulatedFunctionError::invalid_construction(
            format!("at least 2 points are required, got {}", points.len())
        ));
    }
    if let Some(pt) = points.iter().find(|pt| pt.x().is_nan()) {
        return Err(TabulatedFunctionError::invalid_construction(
            format!("abscissa of {} is not a number", pt)
        ));
    }
    points.sort_by(|lhs, rhs| lhs.x().total_cmp(&rhs.x()));
    if let Some(pair) = points.windows(2).find(|pair| FunctionPoint::coincides(pair[0].x(), pair[1].x())) {
        return Err(TabulatedFunctionError::invalid_construction(
            format!("duplicate abscissa: {} and {}", pair[0], pair[1])
        ));
    }
    debug!("validated {} points on [{}, {}]", points.len(), points[0].x(), points[points.len() - 1].x());
    Ok(points)
}

/// 等距 x，最後一點的 x 固定為 `right_x`。
pub fn uniform_points(left_x: f64, right_x: f64, values: &[f64]) -> Result<Vec<FunctionPoint>, TabulatedFunctionError> {
    if !(left_x < right_x) {
        return Err(TabulatedFunctionError::invalid_construction(
            format!("left border {} is not less than right border {}", left_x, right_x)
        ));
    }
    if values.len() < 2 {
        return Err(TabulatedFunctionError::invalid_construction(
            format!("at least 2 values are required, got {}", values.len())
        ));
    }
    let last = values.len() - 1;
    let step = (right_x - left_x) / last as f64;
    Ok(values
        .iter()
        .enumerate()
        .map(|(i, &y)| {
            let x = if i == last { right_x } else { left_x + i as f64 * step };
            FunctionPoint::new(x, y)
        })
        .collect())
}

pub fn check_index(index: usize, count: usize) -> Result<(), TabulatedFunctionError> {
    if index < count {
        Ok(())
    } else {
        Err(TabulatedFunctionError::IndexOutOfRange { index, count })
    }
}

/// 新的 x 必須嚴格落在左右鄰點之間（兩側各留 [`EPS`]）。
/// 邊界索引只與唯一的鄰點比較。
pub fn check_order(
    index: usize,
    x: f64,
    prev_x: Option<f64>,
    next_x: Option<f64>
) -> Result<(), TabulatedFunctionError> {
    let after_prev = prev_x.map_or(true, |prev_x| x > prev_x + EPS);
    let before_next = next_x.map_or(true, |next_x| x < next_x - EPS);
    if after_prev && before_next && !x.is_nan() {
        Ok(())
    } else {
        Err(TabulatedFunctionError::OrderViolation { index, x })
    }
}

pub fn check_deletable(index: usize, count: usize) -> Result<(), TabulatedFunctionError> {
    check_index(index, count)?;
    if count <= 2 {
        Err(TabulatedFunctionError::TooFewPoints { count })
    } else {
        Ok(())
    }
}

/// 兩個表格（不論實作）的點是否逐一相同。
pub fn tabulated_eq(lhs: &dyn TabulatedFunction, rhs: &dyn TabulatedFunction) -> bool {
    lhs.points_count() == rhs.points_count() && lhs.points() == rhs.points()
}

pub fn fmt_points<'a>(
    f: &mut fmt::Formatter<'_>,
    points: impl Iterator<Item = &'a FunctionPoint>
) -> fmt::Result {
    write!(f, "{{")?;
    for (i, pt) in points.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", pt)?;
    }
    write!(f, "}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_sorts_points() {
        let points = validate_points(vec![
            FunctionPoint::new(2.0, 4.0),
            FunctionPoint::new(0.0, 0.0),
            FunctionPoint::new(1.0, 1.0),
        ]).unwrap();
        let xs: Vec<f64> = points.iter().map(|pt| pt.x()).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn validate_rejects_duplicates_and_short_input() {
        let dup = validate_points(vec![
            FunctionPoint::new(1.0, 0.0),
            FunctionPoint::new(0.0, 0.0),
            FunctionPoint::new(1.0 + EPS / 2.0, 3.0),
        ]);
        assert!(matches!(dup, Err(TabulatedFunctionError::InvalidConstruction(_))));

        let single = validate_points(vec![FunctionPoint::new(1.0, 0.0)]);
        assert!(matches!(single, Err(TabulatedFunctionError::InvalidConstruction(_))));

        let nan = validate_points(vec![FunctionPoint::new(f64::NAN, 0.0), FunctionPoint::new(1.0, 0.0)]);
        assert!(matches!(nan, Err(TabulatedFunctionError::InvalidConstruction(_))));
    }

    #[test]
    fn uniform_points_pins_right_border() {
        let points = uniform_points(0.0, std::f64::consts::PI, &[0.0; 11]).unwrap();
        assert_eq!(points.len(), 11);
        assert_eq!(points[0].x(), 0.0);
        assert_eq!(points[10].x(), std::f64::consts::PI);
        assert!(uniform_points(1.0, 1.0, &[0.0, 0.0]).is_err());
        assert!(uniform_points(2.0, 1.0, &[0.0, 0.0]).is_err());
        assert!(uniform_points(0.0, 1.0, &[0.0]).is_err());
    }

    #[test]
    fn order_check_at_exact_eps_distance_is_rejected() {
        assert!(check_order(1, 1.0 + EPS, Some(1.0), Some(2.0)).is_err());
        assert!(check_order(1, 2.0 - EPS, Some(1.0), Some(2.0)).is_err());
        assert!(check_order(1, 1.5, Some(1.0), Some(2.0)).is_ok());
        assert!(check_order(0, -100.0, None, Some(2.0)).is_ok());
        assert!(check_order(3, 100.0, Some(2.0), None).is_ok());
        assert!(check_order(1, f64::NAN, Some(1.0), Some(2.0)).is_err());
    }

    #[test]
    fn deletable_checks_index_before_size() {
        assert!(matches!(check_deletable(5, 2), Err(TabulatedFunctionError::IndexOutOfRange { index: 5, count: 2 })));
        assert!(matches!(check_deletable(1, 2), Err(TabulatedFunctionError::TooFewPoints { count: 2 })));
        assert!(check_deletable(1, 3).is_ok());
    }
}
