//! 表格函數的取樣與序列化。
//!
//! 所有函數只透過 [`TabulatedFunction`] 操作，不知道也不在乎背後的實作：
//! 寫出時接受任何表格，讀入時由呼叫端以型別參數決定要建立哪一種。
//!
//! # 格式
//! - 文字：點數，接著每個點的 x、y，以空白分隔的十進位數字；
//! - 二進位：4 bytes 的點數（big-endian `i32`），接著每個點兩個 8 bytes 的
//!   IEEE-754 double（big-endian，先 x 後 y），沒有 padding；
//! - JSON：`{"points": [{"x": .., "y": ..}, ..]}`，僅供內部使用。
//!
//! 讀入時一律重新驗證不變量，違反者回傳 `MalformedInput`。

use std::io::{
    Read,
    Write
};

use log::debug;
use serde::{
    de::DeserializeOwned,
    Serialize
};

use crate::math::function::function::Function;
use crate::math::function::tabulated::functionpoint::FunctionPoint;
use crate::math::function::tabulated::tabulatedfunction::{
    TabulatedFunction,
    TabulatedFunctionRecord
};
use crate::math::function::tabulated::tabulatedfunctionerror::TabulatedFunctionError;

const COUNT_BYTES: usize = 4;
const POINT_BYTES: usize = 16;

// ─────────────────────────────────────────────
// 取樣
// ─────────────────────────────────────────────

/// 在 `[left_x, right_x]` 上等距取 `points_count` 個點（含兩端）建立表格。
///
/// 取樣範圍必須落在 `function` 的定義域內。
pub fn tabulate<T: TabulatedFunction>(
    function: &dyn Function,
    left_x: f64,
    right_x: f64,
    points_count: usize
) -> Result<T, TabulatedFunctionError> {
    if left_x < function.left_domain_border() || right_x > function.right_domain_border() {
        return Err(TabulatedFunctionError::invalid_construction(format!(
            "[{}, {}] exceeds the function domain [{}, {}]",
            left_x,
            right_x,
            function.left_domain_border(),
            function.right_domain_border()
        )));
    }
    if points_count < 2 {
        return Err(TabulatedFunctionError::invalid_construction(
            format!("at least 2 points are required, got {}", points_count)
        ));
    }
    let mut table = T::with_count(left_x, right_x, points_count)?;
    for i in 0..points_count {
        let x = table.point_x(i)?;
        table.set_point_y(i, function.value(x))?;
    }
    debug!("tabulated {} points on [{}, {}]", points_count, left_x, right_x);
    Ok(table)
}

fn rebuild<T: TabulatedFunction>(points: Vec<FunctionPoint>) -> Result<T, TabulatedFunctionError> {
    if let Some(pair) = points.windows(2).find(|pair| !(pair[1].x() > pair[0].x())) {
        return Err(TabulatedFunctionError::malformed_input(
            format!("points {} and {} are out of order", pair[0], pair[1])
        ));
    }
    T::from_points(points).map_err(|error| match error {
        TabulatedFunctionError::InvalidConstruction(message) => TabulatedFunctionError::MalformedInput(message),
        other => other
    })
}

// ─────────────────────────────────────────────
// 文字格式
// ─────────────────────────────────────────────

pub fn write_text(function: &dyn TabulatedFunction, mut writer: impl Write) -> Result<(), TabulatedFunctionError> {
    write!(writer, "{}", function.points_count())?;
    for point in function.points() {
        write!(writer, " {} {}", point.x(), point.y())?;
    }
    writeln!(writer)?;
    writer.flush()?;
    debug!("wrote {} points as text", function.points_count());
    Ok(())
}

pub fn read_text<T: TabulatedFunction>(mut reader: impl Read) -> Result<T, TabulatedFunctionError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let mut tokens = text.split_whitespace();

    let count_token = tokens.next()
        .ok_or_else(|| TabulatedFunctionError::malformed_input("empty stream"))?;
    let count: usize = count_token.parse()
        .map_err(|_| TabulatedFunctionError::malformed_input(format!("invalid point count '{}'", count_token)))?;

    let mut next_number = |what: &str, i: usize| -> Result<f64, TabulatedFunctionError> {
        let token = tokens.next().ok_or_else(|| TabulatedFunctionError::malformed_input(
            format!("expected {} points, stream ends before {} of point {}", count, what, i)
        ))?;
        token.parse::<f64>().map_err(|_| TabulatedFunctionError::malformed_input(
            format!("{} of point {} is not a number: '{}'", what, i, token)
        ))
    };
    let mut points = Vec::with_capacity(count.min(1024));
    for i in 0..count {
        let x = next_number("x", i)?;
        let y = next_number("y", i)?;
        points.push(FunctionPoint::new(x, y));
    }
    if let Some(extra) = tokens.next() {
        return Err(TabulatedFunctionError::malformed_input(
            format!("unexpected token '{}' after {} points", extra, count)
        ));
    }
    debug!("read {} points from text", count);
    rebuild(points)
}

// ─────────────────────────────────────────────
// 二進位格式
// ─────────────────────────────────────────────

/// 長度固定為 `4 + 16 * points_count` bytes。
pub fn write_binary(function: &dyn TabulatedFunction, mut writer: impl Write) -> Result<(), TabulatedFunctionError> {
    let count = i32::try_from(function.points_count()).map_err(|_| TabulatedFunctionError::malformed_input(
        format!("{} points do not fit the binary point count", function.points_count())
    ))?;
    let mut buffer = Vec::with_capacity(COUNT_BYTES + POINT_BYTES * function.points_count());
    buffer.extend_from_slice(&count.to_be_bytes());
    for point in function.points() {
        buffer.extend_from_slice(&point.x().to_be_bytes());
        buffer.extend_from_slice(&point.y().to_be_bytes());
    }
    writer.write_all(&buffer)?;
    writer.flush()?;
    debug!("wrote {} points as {} bytes", count, buffer.len());
    Ok(())
}

/// 恰好讀取 `4 + 16 * points_count` bytes，之後的資料不動。
pub fn read_binary<T: TabulatedFunction>(mut reader: impl Read) -> Result<T, TabulatedFunctionError> {
    let mut count_bytes = [0u8; COUNT_BYTES];
    reader.read_exact(&mut count_bytes)?;
    let count = i32::from_be_bytes(count_bytes);
    let count = usize::try_from(count).map_err(|_| TabulatedFunctionError::malformed_input(
        format!("negative point count {}", count)
    ))?;

    let mut points = Vec::with_capacity(count.min(1024));
    let mut x_bytes = [0u8; POINT_BYTES / 2];
    let mut y_bytes = [0u8; POINT_BYTES / 2];
    for _ in 0..count {
        reader.read_exact(&mut x_bytes)?;
        reader.read_exact(&mut y_bytes)?;
        points.push(FunctionPoint::new(f64::from_be_bytes(x_bytes), f64::from_be_bytes(y_bytes)));
    }
    debug!("read {} points from binary", count);
    rebuild(points)
}

// ─────────────────────────────────────────────
// JSON（內部用）
// ─────────────────────────────────────────────

pub fn write_json(function: &dyn TabulatedFunction, writer: impl Write) -> Result<(), TabulatedFunctionError> {
    let record = TabulatedFunctionRecord { points: function.points() };
    serde_json::to_writer(writer, &record)
        .map_err(|error| TabulatedFunctionError::Io(error.into()))
}

pub fn read_json<T: TabulatedFunction>(reader: impl Read) -> Result<T, TabulatedFunctionError> {
    let record: TabulatedFunctionRecord = serde_json::from_reader(reader)
        .map_err(|error| TabulatedFunctionError::malformed_input(error.to_string()))?;
    rebuild(record.points)
}

/// 直接以 serde 寫出具體型別（兩種表格都實作了 `Serialize`）。
pub fn to_json_string<T: TabulatedFunction + Serialize>(function: &T) -> Result<String, TabulatedFunctionError> {
    serde_json::to_string(function)
        .map_err(|error| TabulatedFunctionError::Io(error.into()))
}

pub fn from_json_str<T: TabulatedFunction + DeserializeOwned>(json: &str) -> Result<T, TabulatedFunctionError> {
    serde_json::from_str(json)
        .map_err(|error| TabulatedFunctionError::malformed_input(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use std::io::Cursor;

    use crate::math::function::basic::exp::Exp;
    use crate::math::function::basic::log::Log;
    use crate::math::function::basic::trigonometric::Sin;
    use crate::math::function::tabulated::arraytabulatedfunction::ArrayTabulatedFunction;
    use crate::math::function::tabulated::contracttests::{
        assert_invariants,
        log_init
    };
    use crate::math::function::tabulated::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
    use crate::math::function::tabulated::tabulatedfunction::tabulated_eq;

    fn three_points() -> ArrayTabulatedFunction {
        ArrayTabulatedFunction::from_points(vec![
            FunctionPoint::new(0.0, 0.0),
            FunctionPoint::new(1.0, 2.0),
            FunctionPoint::new(2.0, 4.0),
        ]).unwrap()
    }

    fn awkward_values() -> LinkedListTabulatedFunction {
        LinkedListTabulatedFunction::from_points(vec![
            FunctionPoint::new(-1e-300, 0.1),
            FunctionPoint::new(1.0 / 3.0, -2.0f64.sqrt()),
            FunctionPoint::new(PI, 1e308),
            FunctionPoint::new(7.000000000000001, f64::MIN_POSITIVE),
        ]).unwrap()
    }

    fn is_malformed<V>(result: &Result<V, TabulatedFunctionError>) -> bool {
        matches!(result, Err(TabulatedFunctionError::MalformedInput(_)))
    }

    #[test]
    fn tabulate_samples_uniformly() {
        log_init();
        let table: LinkedListTabulatedFunction = tabulate(&Sin, 0.0, PI, 11).unwrap();
        assert_invariants(&table);
        assert_eq!(table.points_count(), 11);
        assert_eq!(table.left_domain_border(), 0.0);
        assert_eq!(table.right_domain_border(), PI);
        for i in 0..11 {
            let point = table.point(i).unwrap();
            assert_eq!(point.y(), point.x().sin());
        }
    }

    #[test]
    fn tabulate_rejects_bad_requests() {
        let outside = tabulate::<ArrayTabulatedFunction>(&Log::natural(), -1.0, 10.0, 11);
        assert!(matches!(outside, Err(TabulatedFunctionError::InvalidConstruction(_))));
        let too_few = tabulate::<ArrayTabulatedFunction>(&Exp, 0.0, 1.0, 1);
        assert!(matches!(too_few, Err(TabulatedFunctionError::InvalidConstruction(_))));
        let reversed = tabulate::<ArrayTabulatedFunction>(&Exp, 1.0, 0.0, 5);
        assert!(matches!(reversed, Err(TabulatedFunctionError::InvalidConstruction(_))));
    }

    #[test]
    fn text_format_layout() {
        let mut buffer = Vec::new();
        write_text(&three_points(), &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "3 0 0 1 2 2 4\n");
    }

    #[test]
    fn text_round_trip_across_representations() {
        let source = awkward_values();
        let mut buffer = Vec::new();
        write_text(&source, &mut buffer).unwrap();

        let as_array: ArrayTabulatedFunction = read_text(Cursor::new(&buffer)).unwrap();
        let as_list: LinkedListTabulatedFunction = read_text(Cursor::new(&buffer)).unwrap();
        assert!(tabulated_eq(&as_array, &source));
        assert!(tabulated_eq(&as_list, &source));
    }

    #[test]
    fn text_accepts_arbitrary_whitespace() {
        let table: ArrayTabulatedFunction = read_text("  2\n0.5\t1e2\r\n\n 1.5 -3 ".as_bytes()).unwrap();
        assert_eq!(table.points(), vec![FunctionPoint::new(0.5, 100.0), FunctionPoint::new(1.5, -3.0)]);
    }

    #[test]
    fn text_rejects_malformed_streams() {
        for input in [
            "",
            "two 0 0 1 1",
            "-2 0 0 1 1",
            "3 0 0 1 1",
            "2 0 0 1",
            "2 0 0 1 abc",
            "2 0 0 1 1 9",
            "2 1 0 0 1",
            "2 1 0 1 1",
            "1 0 0",
        ] {
            let result = read_text::<ArrayTabulatedFunction>(input.as_bytes());
            assert!(is_malformed(&result), "{:?} should be malformed, got {:?}", input, result);
        }
        let invalid_utf8: &[u8] = &[b'2', b' ', 0xff, 0xfe];
        assert!(is_malformed(&read_text::<LinkedListTabulatedFunction>(invalid_utf8)));
    }

    #[test]
    fn binary_format_layout() {
        let mut buffer = Vec::new();
        write_binary(&three_points(), &mut buffer).unwrap();
        assert_eq!(buffer.len(), 4 + 16 * 3);
        assert_eq!(&buffer[..4], &[0, 0, 0, 3]);
        assert_eq!(&buffer[4 + 16 + 8..4 + 32], &2.0f64.to_be_bytes());

        let restored: LinkedListTabulatedFunction = read_binary(Cursor::new(&buffer)).unwrap();
        assert_eq!(restored.points(), three_points().points());
    }

    #[test]
    fn binary_round_trip_is_bit_exact() {
        let source = awkward_values();
        let mut buffer = Vec::new();
        write_binary(&source, &mut buffer).unwrap();
        let restored: ArrayTabulatedFunction = read_binary(Cursor::new(&buffer)).unwrap();
        for (lhs, rhs) in restored.points().iter().zip(source.points().iter()) {
            assert_eq!(lhs.x().to_bits(), rhs.x().to_bits());
            assert_eq!(lhs.y().to_bits(), rhs.y().to_bits());
        }
    }

    #[test]
    fn binary_reads_exactly_one_table() {
        let mut buffer = Vec::new();
        write_binary(&three_points(), &mut buffer).unwrap();
        write_binary(&awkward_values(), &mut buffer).unwrap();
        let mut cursor = Cursor::new(&buffer);
        let first: ArrayTabulatedFunction = read_binary(&mut cursor).unwrap();
        assert_eq!(cursor.position(), 52);
        let second: LinkedListTabulatedFunction = read_binary(&mut cursor).unwrap();
        assert!(tabulated_eq(&first, &three_points()));
        assert!(tabulated_eq(&second, &awkward_values()));
    }

    #[test]
    fn binary_rejects_malformed_streams() {
        let mut buffer = Vec::new();
        write_binary(&three_points(), &mut buffer).unwrap();

        for len in [0, 2, 4, 20, 51] {
            let result = read_binary::<ArrayTabulatedFunction>(&buffer[..len]);
            assert!(is_malformed(&result), "truncated at {} should be malformed", len);
        }

        let mut negative = buffer.clone();
        negative[..4].copy_from_slice(&(-1i32).to_be_bytes());
        assert!(is_malformed(&read_binary::<ArrayTabulatedFunction>(negative.as_slice())));

        let mut one_point = Vec::new();
        one_point.extend_from_slice(&1i32.to_be_bytes());
        one_point.extend_from_slice(&buffer[4..20]);
        assert!(is_malformed(&read_binary::<LinkedListTabulatedFunction>(one_point.as_slice())));

        // 把第二個點的 x 改成 0，與第一個點重複
        let mut duplicate = buffer.clone();
        duplicate[20..28].copy_from_slice(&0.0f64.to_be_bytes());
        assert!(is_malformed(&read_binary::<LinkedListTabulatedFunction>(duplicate.as_slice())));
    }

    #[test]
    fn json_round_trip() {
        let source = awkward_values();
        let mut buffer = Vec::new();
        write_json(&source, &mut buffer).unwrap();
        let restored: ArrayTabulatedFunction = read_json(buffer.as_slice()).unwrap();
        assert!(tabulated_eq(&restored, &source));

        let json = to_json_string(&source).unwrap();
        let restored: LinkedListTabulatedFunction = from_json_str(&json).unwrap();
        assert_eq!(restored, source);

        let unordered = r#"{"points":[{"x":2.0,"y":0.0},{"x":1.0,"y":2.0}]}"#;
        assert!(is_malformed(&read_json::<ArrayTabulatedFunction>(unordered.as_bytes())));
        assert!(is_malformed(&from_json_str::<ArrayTabulatedFunction>("{\"points\":[]}")));
        assert!(is_malformed(&read_json::<ArrayTabulatedFunction>("not json".as_bytes())));
    }
}
