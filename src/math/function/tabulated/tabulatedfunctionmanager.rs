use std::rc::Rc;

use serde::Deserialize;

use crate::manager::manager::Manager;
use crate::manager::managererror::ManagerError;
use crate::math::function::basic::exp::Exp;
use crate::math::function::basic::log::Log;
use crate::math::function::basic::trigonometric::{
    Cos,
    Sin,
    Tan
};
use crate::math::function::function::Function;
use crate::math::function::functions;
use crate::math::function::tabulated::arraytabulatedfunction::ArrayTabulatedFunction;
use crate::math::function::tabulated::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use crate::math::function::tabulated::tabulatedfunction::TabulatedFunction;
use crate::math::function::tabulated::tabulatedfunctions::tabulate;

#[derive(Deserialize)]
pub enum FunctionType {
    Exp,
    Log,
    Sin,
    Cos,
    Tan,
    Sum,
    Mult,
    Power,
    Composition,
    Scale,
    Shift
}

#[derive(Deserialize)]
struct FunctionTypedObject {
    function_type: FunctionType
}

#[derive(Deserialize)]
struct LogJsonProp {
    base: f64
}

#[derive(Deserialize)]
struct BinaryJsonProp {
    lhs: serde_json::Value,
    rhs: serde_json::Value
}

#[derive(Deserialize)]
struct PowerJsonProp {
    base: serde_json::Value,
    power: f64
}

#[derive(Deserialize)]
struct CompositionJsonProp {
    outer: serde_json::Value,
    inner: serde_json::Value
}

#[derive(Deserialize)]
struct ScaleJsonProp {
    function: serde_json::Value,
    sx: f64,
    sy: f64
}

#[derive(Deserialize)]
struct ShiftJsonProp {
    function: serde_json::Value,
    dx: f64,
    dy: f64
}

/// 遞迴解析函數描述，例如
/// `{"function_type": "Power", "base": {"function_type": "Sin"}, "power": 2.0}`。
pub fn get_function_from_json(json_value: serde_json::Value) -> Result<Box<dyn Function>, ManagerError> {
    let typed_object: FunctionTypedObject = ManagerError::from_json_or_json_parse_error(json_value.clone())?;
    let function: Box<dyn Function> = match typed_object.function_type {
        FunctionType::Exp => Box::new(Exp),
        FunctionType::Sin => Box::new(Sin),
        FunctionType::Cos => Box::new(Cos),
        FunctionType::Tan => Box::new(Tan),
        FunctionType::Log => {
            let prop: LogJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
            Box::new(Log::new(prop.base))
        },
        FunctionType::Sum => {
            let prop: BinaryJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
            Box::new(functions::sum(get_function_from_json(prop.lhs)?, get_function_from_json(prop.rhs)?))
        },
        FunctionType::Mult => {
            let prop: BinaryJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
            Box::new(functions::mult(get_function_from_json(prop.lhs)?, get_function_from_json(prop.rhs)?))
        },
        FunctionType::Power => {
            let prop: PowerJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
            Box::new(functions::power(get_function_from_json(prop.base)?, prop.power))
        },
        FunctionType::Composition => {
            let prop: CompositionJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
            Box::new(functions::composition(get_function_from_json(prop.outer)?, get_function_from_json(prop.inner)?))
        },
        FunctionType::Scale => {
            let prop: ScaleJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
            Box::new(functions::scale(get_function_from_json(prop.function)?, prop.sx, prop.sy))
        },
        FunctionType::Shift => {
            let prop: ShiftJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
            Box::new(functions::shift(get_function_from_json(prop.function)?, prop.dx, prop.dy))
        }
    };
    Ok(function)
}

#[derive(Deserialize, Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Representation {
    #[default]
    Array,
    LinkedList
}

#[derive(Deserialize)]
struct TabulationJsonProp {
    name: String,
    function: serde_json::Value,
    left_x: f64,
    right_x: f64,
    points_count: usize,
    #[serde(default)]
    representation: Representation
}

fn get_tabulated_function_from_json(json_value: serde_json::Value) -> Result<Rc<dyn TabulatedFunction>, ManagerError> {
    let json_prop: TabulationJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
    let function = get_function_from_json(json_prop.function)?;
    let to_manager_error = |source| ManagerError::TabulationError { name: json_prop.name.clone(), source };
    let tabulated: Rc<dyn TabulatedFunction> = match json_prop.representation {
        Representation::Array => {
            let table: ArrayTabulatedFunction = tabulate(&*function, json_prop.left_x, json_prop.right_x, json_prop.points_count)
                .map_err(to_manager_error)?;
            Rc::new(table)
        },
        Representation::LinkedList => {
            let table: LinkedListTabulatedFunction = tabulate(&*function, json_prop.left_x, json_prop.right_x, json_prop.points_count)
                .map_err(to_manager_error)?;
            Rc::new(table)
        }
    };
    Ok(tabulated)
}

pub struct TabulatedFunctionManager;

impl TabulatedFunctionManager {
    pub fn new() -> Manager<Rc<dyn TabulatedFunction>> {
        Manager::new(get_tabulated_function_from_json)
    }
}
