use std::fmt;

use log::trace;
use serde::{
    Deserialize,
    Serialize
};

use crate::math::function::function::Function;
use crate::math::function::tabulated::functionpoint::FunctionPoint;
use crate::math::function::tabulated::tabulatedfunction::{
    check_deletable,
    check_index,
    check_order,
    fmt_points,
    validate_points,
    TabulatedFunction,
    TabulatedFunctionRecord
};
use crate::math::function::tabulated::tabulatedfunctionerror::TabulatedFunctionError;

/// 以連續陣列儲存取樣點的表格函數。
///
/// 索引 i 直接對應第 i 個點；新增與刪除需要搬移後段元素。
/// 陣列永遠依 x 排序，所以找區間與找插入位置都用二分搜尋。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "TabulatedFunctionRecord", try_from = "TabulatedFunctionRecord")]
pub struct ArrayTabulatedFunction {
    points: Vec<FunctionPoint>
}

impl ArrayTabulatedFunction {
    /// `x` 必須在定義域內；回傳線段左端點的索引。
    fn find_segment(&self, x: f64) -> usize {
        let last = self.points.len() - 1;
        let upper = self.points.partition_point(|pt| pt.x() <= x);
        if upper > last {
            last - 1
        } else {
            upper.saturating_sub(1)
        }
    }
}

impl Function for ArrayTabulatedFunction {
    fn left_domain_border(&self) -> f64 {
        self.points[0].x()
    }

    fn right_domain_border(&self) -> f64 {
        self.points[self.points.len() - 1].x()
    }

    fn value(&self, x: f64) -> f64 {
        if !self.in_domain(x) {
            return f64::NAN;
        }
        let i = self.find_segment(x);
        FunctionPoint::interpolate(&self.points[i], &self.points[i + 1], x)
    }
}

impl TabulatedFunction for ArrayTabulatedFunction {
    fn points_count(&self) -> usize {
        self.points.len()
    }

    fn point(&self, index: usize) -> Result<FunctionPoint, TabulatedFunctionError> {
        check_index(index, self.points.len())?;
        Ok(self.points[index])
    }

    fn set_point(&mut self, index: usize, point: FunctionPoint) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.points.len())?;
        let prev_x = index.checked_sub(1).map(|i| self.points[i].x());
        let next_x = self.points.get(index + 1).map(|pt| pt.x());
        check_order(index, point.x(), prev_x, next_x)?;
        trace!("set point {} to {}", index, point);
        self.points[index] = point;
        Ok(())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.points.len())?;
        self.points[index].set_y(y);
        Ok(())
    }

    fn add_point(&mut self, point: FunctionPoint) -> Result<(), TabulatedFunctionError> {
        let x = point.x();
        if x.is_nan() {
            return Err(TabulatedFunctionError::OrderViolation { index: self.points.len(), x });
        }
        let index = self.points.partition_point(|pt| pt.x() < x);
        // 只有插入位置兩側的點可能落在容差內
        let duplicate = index
            .checked_sub(1)
            .into_iter()
            .chain(std::iter::once(index))
            .filter_map(|i| self.points.get(i))
            .any(|pt| FunctionPoint::coincides(pt.x(), x));
        if duplicate {
            return Err(TabulatedFunctionError::DuplicateAbscissa { x });
        }
        trace!("insert {} at index {}", point, index);
        self.points.insert(index, point);
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        check_deletable(index, self.points.len())?;
        let removed = self.points.remove(index);
        trace!("removed {} from index {}", removed, index);
        Ok(())
    }

    fn points(&self) -> Vec<FunctionPoint> {
        self.points.clone()
    }

    fn from_points(points: Vec<FunctionPoint>) -> Result<Self, TabulatedFunctionError> {
        Ok(ArrayTabulatedFunction { points: validate_points(points)? })
    }

    fn from_tabulated(function: &dyn TabulatedFunction) -> Self {
        ArrayTabulatedFunction { points: function.points() }
    }
}

impl From<ArrayTabulatedFunction> for TabulatedFunctionRecord {
    fn from(function: ArrayTabulatedFunction) -> Self {
        TabulatedFunctionRecord { points: function.points }
    }
}

impl TryFrom<TabulatedFunctionRecord> for ArrayTabulatedFunction {
    type Error = TabulatedFunctionError;

    fn try_from(record: TabulatedFunctionRecord) -> Result<Self, Self::Error> {
        ArrayTabulatedFunction::from_points(record.points)
    }
}

impl fmt::Display for ArrayTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_points(f, self.points.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::function::tabulated::contracttests;

    #[test]
    fn satisfies_tabulated_function_contract() {
        contracttests::run_all::<ArrayTabulatedFunction>();
    }

    #[test]
    fn find_segment_covers_borders() {
        let function = ArrayTabulatedFunction::from_values(0.0, 3.0, &[0.0, 1.0, 4.0, 9.0]).unwrap();
        assert_eq!(function.find_segment(0.0), 0);
        assert_eq!(function.find_segment(0.5), 0);
        assert_eq!(function.find_segment(1.0), 1);
        assert_eq!(function.find_segment(2.999), 2);
        assert_eq!(function.find_segment(3.0), 2);
    }

    #[test]
    fn display_lists_points() {
        let function = ArrayTabulatedFunction::from_points(vec![
            FunctionPoint::new(1.0, 2.0),
            FunctionPoint::new(0.0, 0.5),
        ]).unwrap();
        assert_eq!(function.to_string(), "{(0; 0.5), (1; 2)}");
    }

    #[test]
    fn serde_round_trip_revalidates() {
        let function = ArrayTabulatedFunction::from_values(-1.0, 1.0, &[3.0, 0.1, 7.25]).unwrap();
        let json = serde_json::to_string(&function).unwrap();
        let restored: ArrayTabulatedFunction = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, function);

        let unordered = r#"{"points":[{"x":1.0,"y":0.0},{"x":1.0,"y":2.0}]}"#;
        assert!(serde_json::from_str::<ArrayTabulatedFunction>(unordered).is_err());
    }
}
