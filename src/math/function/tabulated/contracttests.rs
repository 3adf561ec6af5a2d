//! 兩種表格實作共用的行為測試。
//! 每個實作的測試模組呼叫 [`run_all`]。

use std::f64::consts::PI;
use std::fmt::Debug;
use std::mem::discriminant;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::math::function::function::Function;
use crate::math::function::tabulated::arraytabulatedfunction::ArrayTabulatedFunction;
use crate::math::function::tabulated::functionpoint::{
    EPS,
    FunctionPoint
};
use crate::math::function::tabulated::tabulatedfunction::{
    tabulated_eq,
    TabulatedFunction
};
use crate::math::function::tabulated::tabulatedfunctionerror::TabulatedFunctionError;

const NTESTS: usize = 50;
const NSTEPS: usize = 200;

pub fn log_init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn run_all<T: TabulatedFunction + Debug + 'static>() {
    log_init();
    construction_invariants::<T>();
    construction_rejects_invalid_input::<T>();
    indexed_access::<T>();
    returned_points_are_copies::<T>();
    add_point_scenario::<T>();
    add_point_extends_borders::<T>();
    set_point_respects_neighbours::<T>();
    set_point_y_is_unconditional::<T>();
    delete_point_min_size_guard::<T>();
    interpolation_exactness::<T>();
    interpolation_linearity::<T>();
    outside_domain_is_nan::<T>();
    sine_scenario::<T>();
    copy_construction::<T>();
    random_mutations_preserve_invariants::<T>();
}

pub fn assert_invariants(function: &dyn TabulatedFunction) {
    let points = function.points();
    assert!(function.points_count() >= 2);
    assert_eq!(points.len(), function.points_count());
    for pair in points.windows(2) {
        assert!(pair[1].x() - pair[0].x() > EPS, "{:?} not strictly increasing", pair);
    }
    assert_eq!(function.left_domain_border(), points[0].x());
    assert_eq!(function.right_domain_border(), points[points.len() - 1].x());
}

fn same_kind<V: Debug>(result: &Result<V, TabulatedFunctionError>, expected: &TabulatedFunctionError) -> bool {
    match result {
        Err(error) => discriminant(error) == discriminant(expected),
        Ok(_) => false
    }
}

fn parabola<T: TabulatedFunction>() -> T {
    T::from_points(vec![
        FunctionPoint::new(0.0, 0.0),
        FunctionPoint::new(1.0, 1.0),
        FunctionPoint::new(2.0, 4.0),
        FunctionPoint::new(3.0, 6.0),
    ]).unwrap()
}

fn construction_invariants<T: TabulatedFunction>() {
    let from_points = T::from_points(vec![
        FunctionPoint::new(3.0, 9.0),
        FunctionPoint::new(-1.0, 1.0),
        FunctionPoint::new(0.5, 0.25),
    ]).unwrap();
    assert_invariants(&from_points);
    assert_eq!(from_points.point(0).unwrap(), FunctionPoint::new(-1.0, 1.0));

    let from_values = T::from_values(0.0, 4.0, &[0.0, 1.0, 4.0, 9.0, 16.0]).unwrap();
    assert_invariants(&from_values);
    assert_eq!(from_values.points_count(), 5);
    assert_eq!(from_values.point(2).unwrap(), FunctionPoint::new(2.0, 4.0));

    let with_count = T::with_count(-2.0, 2.0, 3).unwrap();
    assert_invariants(&with_count);
    assert_eq!(with_count.points(), vec![
        FunctionPoint::new(-2.0, 0.0),
        FunctionPoint::new(0.0, 0.0),
        FunctionPoint::new(2.0, 0.0),
    ]);
}

fn construction_rejects_invalid_input<T: TabulatedFunction + Debug>() {
    let expected = TabulatedFunctionError::invalid_construction("");
    assert!(same_kind(&T::from_points(vec![FunctionPoint::new(0.0, 0.0)]), &expected));
    assert!(same_kind(&T::from_points(Vec::new()), &expected));
    assert!(same_kind(&T::from_points(vec![
        FunctionPoint::new(0.0, 0.0),
        FunctionPoint::new(0.0, 1.0),
    ]), &expected));
    assert!(same_kind(&T::from_values(1.0, 1.0, &[0.0, 0.0]), &expected));
    assert!(same_kind(&T::from_values(2.0, 1.0, &[0.0, 0.0]), &expected));
    assert!(same_kind(&T::from_values(0.0, 1.0, &[0.0]), &expected));
    assert!(same_kind(&T::with_count(0.0, 1.0, 1), &expected));
}

fn indexed_access<T: TabulatedFunction + Debug>() {
    let mut function = parabola::<T>();
    assert_eq!(function.points_count(), 4);
    assert_eq!(function.point_x(2).unwrap(), 2.0);
    assert_eq!(function.point_y(3).unwrap(), 6.0);

    let expected = TabulatedFunctionError::IndexOutOfRange { index: 0, count: 0 };
    assert!(same_kind(&function.point(4), &expected));
    assert!(same_kind(&function.point_x(100), &expected));
    assert!(same_kind(&function.point_y(4), &expected));
    assert!(same_kind(&function.set_point(4, FunctionPoint::new(10.0, 0.0)), &expected));
    assert!(same_kind(&function.set_point_x(4, 10.0), &expected));
    assert!(same_kind(&function.set_point_y(4, 1.0), &expected));
    assert!(same_kind(&function.delete_point(4), &expected));
    assert_eq!(function.points(), parabola::<T>().points());
}

fn returned_points_are_copies<T: TabulatedFunction>() {
    let function = parabola::<T>();
    let mut point = function.point(1).unwrap();
    point.set_x(1.5);
    point.set_y(-7.0);
    assert_eq!(function.point(1).unwrap(), FunctionPoint::new(1.0, 1.0));

    let mut points = function.points();
    points[0].set_y(100.0);
    assert_eq!(function.point_y(0).unwrap(), 0.0);
}

fn add_point_scenario<T: TabulatedFunction + Debug>() {
    let mut function = parabola::<T>();
    function.add_point(FunctionPoint::new(2.2, 5.0)).unwrap();
    assert_eq!(function.points_count(), 5);
    assert_eq!(function.point(3).unwrap(), FunctionPoint::new(2.2, 5.0));
    assert_invariants(&function);

    let before = function.points();
    let result = function.add_point(FunctionPoint::new(1.0, 99.0));
    assert!(same_kind(&result, &TabulatedFunctionError::DuplicateAbscissa { x: 0.0 }));
    let result = function.add_point(FunctionPoint::new(2.2 + EPS / 2.0, 99.0));
    assert!(same_kind(&result, &TabulatedFunctionError::DuplicateAbscissa { x: 0.0 }));
    assert_eq!(function.points(), before);
}

fn add_point_extends_borders<T: TabulatedFunction>() {
    let mut function = parabola::<T>();
    function.add_point(FunctionPoint::new(-1.0, 1.0)).unwrap();
    function.add_point(FunctionPoint::new(10.0, -3.0)).unwrap();
    assert_eq!(function.left_domain_border(), -1.0);
    assert_eq!(function.right_domain_border(), 10.0);
    assert_eq!(function.point(0).unwrap(), FunctionPoint::new(-1.0, 1.0));
    assert_eq!(function.point(5).unwrap(), FunctionPoint::new(10.0, -3.0));
    assert_invariants(&function);
}

fn set_point_respects_neighbours<T: TabulatedFunction + Debug>() {
    let mut function = parabola::<T>();
    let expected = TabulatedFunctionError::OrderViolation { index: 0, x: 0.0 };

    assert!(same_kind(&function.set_point_x(1, 10.0), &expected));
    assert!(same_kind(&function.set_point_x(1, 2.0), &expected));
    assert!(same_kind(&function.set_point_x(1, 0.0 + EPS), &expected));
    assert!(same_kind(&function.set_point(2, FunctionPoint::new(0.5, 0.0)), &expected));
    assert!(same_kind(&function.set_point_x(0, 1.0), &expected));
    assert!(same_kind(&function.set_point_x(3, 2.0), &expected));
    assert!(same_kind(&function.set_point_x(1, f64::NAN), &expected));
    assert_eq!(function.points(), parabola::<T>().points());

    function.set_point_x(1, 1.5).unwrap();
    assert_eq!(function.point(1).unwrap(), FunctionPoint::new(1.5, 1.0));
    function.set_point(2, FunctionPoint::new(2.5, 5.0)).unwrap();
    assert_eq!(function.point(2).unwrap(), FunctionPoint::new(2.5, 5.0));

    // 端點只與唯一的鄰點比較，可以往外延伸定義域
    function.set_point_x(0, -5.0).unwrap();
    function.set_point_x(3, 50.0).unwrap();
    assert_eq!(function.left_domain_border(), -5.0);
    assert_eq!(function.right_domain_border(), 50.0);
    assert_invariants(&function);
}

fn set_point_y_is_unconditional<T: TabulatedFunction>() {
    let mut function = parabola::<T>();
    function.set_point_y(2, -1e300).unwrap();
    assert_eq!(function.point(2).unwrap(), FunctionPoint::new(2.0, -1e300));
    assert_invariants(&function);
}

fn delete_point_min_size_guard<T: TabulatedFunction + Debug>() {
    let mut function = T::from_values(0.0, 1.0, &[3.0, 4.0]).unwrap();
    let expected = TabulatedFunctionError::TooFewPoints { count: 0 };
    assert!(same_kind(&function.delete_point(0), &expected));
    assert!(same_kind(&function.delete_point(1), &expected));
    assert!(same_kind(&function.delete_point(2), &TabulatedFunctionError::IndexOutOfRange { index: 0, count: 0 }));
    assert_eq!(function.points(), vec![FunctionPoint::new(0.0, 3.0), FunctionPoint::new(1.0, 4.0)]);

    let mut function = parabola::<T>();
    function.delete_point(0).unwrap();
    function.delete_point(0).unwrap();
    assert_eq!(function.points(), vec![FunctionPoint::new(2.0, 4.0), FunctionPoint::new(3.0, 6.0)]);
    assert!(same_kind(&function.delete_point(0), &expected));
}

fn interpolation_exactness<T: TabulatedFunction>() {
    let function = T::from_points(vec![
        FunctionPoint::new(0.1, 0.7),
        FunctionPoint::new(0.3, 1.0 / 3.0),
        FunctionPoint::new(0.7, 2.0f64.sqrt()),
        FunctionPoint::new(1.9, -0.2),
        FunctionPoint::new(2.3, 1e-17),
    ]).unwrap();
    for i in 0..function.points_count() {
        let point = function.point(i).unwrap();
        assert_eq!(function.value(point.x()), point.y());
    }
}

fn interpolation_linearity<T: TabulatedFunction>() {
    let function = parabola::<T>();
    assert!((function.value(0.5) - 0.5).abs() < 1e-12);
    assert!((function.value(1.5) - 2.5).abs() < 1e-12);
    assert!((function.value(2.25) - 4.5).abs() < 1e-12);

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    for _ in 0..NTESTS {
        let i = rng.gen_range(0..function.points_count() - 1);
        let lhs_pt = function.point(i).unwrap();
        let rhs_pt = function.point(i + 1).unwrap();
        let x = rng.gen_range(lhs_pt.x()..rhs_pt.x());
        let expected = lhs_pt.y() + (rhs_pt.y() - lhs_pt.y()) * (x - lhs_pt.x()) / (rhs_pt.x() - lhs_pt.x());
        assert!((function.value(x) - expected).abs() < 1e-12);
    }
}

fn outside_domain_is_nan<T: TabulatedFunction>() {
    let function = parabola::<T>();
    for delta in [1e-6, 0.5, 1e10] {
        assert!(function.value(function.left_domain_border() - delta).is_nan());
        assert!(function.value(function.right_domain_border() + delta).is_nan());
    }
    assert!(function.value(f64::NAN).is_nan());
}

fn sine_scenario<T: TabulatedFunction>() {
    let values: Vec<f64> = (0..11).map(|i| (i as f64 * PI / 10.0).sin()).collect();
    let function = T::from_values(0.0, PI, &values).unwrap();
    assert_eq!(function.left_domain_border(), 0.0);
    assert_eq!(function.right_domain_border(), PI);
    assert!((function.value(PI / 2.0) - 1.0).abs() < 1e-9);

    // π/4 落在第 2、3 點之間，只能得到線性近似
    let x = PI / 4.0;
    let lhs_pt = function.point(2).unwrap();
    let rhs_pt = function.point(3).unwrap();
    let blend = FunctionPoint::interpolate(&lhs_pt, &rhs_pt, x);
    assert!((function.value(x) - blend).abs() < 1e-12);
    let error = (function.value(x) - x.sin()).abs();
    assert!(error > 0.0 && error < 0.01);
}

fn copy_construction<T: TabulatedFunction + Debug + 'static>() {
    let source = ArrayTabulatedFunction::from_values(0.0, 2.0, &[1.0, -1.0, 5.0]).unwrap();
    let mut copy = T::from_tabulated(&source);
    assert!(tabulated_eq(&copy, &source));
    copy.set_point_y(0, 42.0).unwrap();
    assert_eq!(source.point_y(0).unwrap(), 1.0);

    let back = ArrayTabulatedFunction::from_tabulated(&copy);
    assert!(tabulated_eq(&back, &copy));
    let same = T::from_tabulated(&copy);
    assert!(tabulated_eq(&same, &copy));
}

/// 參照模型：排序過的 `Vec`，以最直接的方式實作同一組規則。
fn random_mutations_preserve_invariants<T: TabulatedFunction + Debug>() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(20251019);
    for _ in 0..NTESTS {
        let count = rng.gen_range(2..8);
        let values: Vec<f64> = (0..count).map(|_| rng.gen_range(-10.0..10.0)).collect();
        let mut function = T::from_values(0.0, (count - 1) as f64, &values).unwrap();
        let mut model = function.points();

        for _ in 0..NSTEPS {
            let n = model.len();
            match rng.gen_range(0..4) {
                0 => {
                    // 整數 x 容易撞到既有的點
                    let x = if rng.gen_bool(0.5) {
                        rng.gen_range(-3..12) as f64
                    } else {
                        rng.gen_range(-3.0..12.0)
                    };
                    let point = FunctionPoint::new(x, rng.gen_range(-10.0..10.0));
                    let result = function.add_point(point);
                    if model.iter().any(|pt| FunctionPoint::coincides(pt.x(), x)) {
                        assert!(same_kind(&result, &TabulatedFunctionError::DuplicateAbscissa { x }));
                    } else {
                        result.unwrap();
                        let index = model.partition_point(|pt| pt.x() < x);
                        model.insert(index, point);
                    }
                },
                1 => {
                    let index = rng.gen_range(0..n + 1);
                    let result = function.delete_point(index);
                    if index >= n {
                        assert!(same_kind(&result, &TabulatedFunctionError::IndexOutOfRange { index, count: n }));
                    } else if n <= 2 {
                        assert!(same_kind(&result, &TabulatedFunctionError::TooFewPoints { count: n }));
                    } else {
                        result.unwrap();
                        model.remove(index);
                    }
                },
                2 => {
                    let index = rng.gen_range(0..n);
                    let x = rng.gen_range(-3.0..12.0);
                    let result = function.set_point_x(index, x);
                    let after_prev = index == 0 || x > model[index - 1].x() + EPS;
                    let before_next = index == n - 1 || x < model[index + 1].x() - EPS;
                    if after_prev && before_next {
                        result.unwrap();
                        model[index].set_x(x);
                    } else {
                        assert!(same_kind(&result, &TabulatedFunctionError::OrderViolation { index, x }));
                    }
                },
                _ => {
                    let index = rng.gen_range(0..n);
                    let y = rng.gen_range(-10.0..10.0);
                    function.set_point_y(index, y).unwrap();
                    model[index].set_y(y);
                }
            }
            assert_invariants(&function);
            assert_eq!(function.points(), model);
        }

        for i in 0..model.len() {
            assert_eq!(function.value(model[i].x()), model[i].y());
        }
    }
}
