use std::cell::{
    RefCell,
    RefMut
};
use std::fs::File;
use std::io::{
    BufReader,
    Read
};
use std::rc::Rc;

use log::debug;
use serde::Deserialize;

use crate::manager::managererror::ManagerError;
use crate::manager::manager::{
    IManager,
    Manager
};
use crate::math::function::tabulated::tabulatedfunction::TabulatedFunction;
use crate::math::function::tabulated::tabulatedfunctionmanager::TabulatedFunctionManager;

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    tabulations: Vec<serde_json::Value>
}

pub struct Configuration {
    tabulated_function_manager_cell: RefCell<Manager<Rc<dyn TabulatedFunction>>>
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            tabulated_function_manager_cell: RefCell::new(TabulatedFunctionManager::new())
        }
    }

    pub fn tabulated_function_manager(&self) -> RefMut<'_, Manager<Rc<dyn TabulatedFunction>>> {
        self.tabulated_function_manager_cell.borrow_mut()
    }

    pub fn from_reader(&self, file_path: &str) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        self.load(BufReader::new(file))?;
        debug!("configuration loaded from {}", file_path);
        Ok(())
    }

    pub fn load(&self, reader: impl Read) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        let tabulated_function_manager = self.tabulated_function_manager_cell.borrow_mut();
        tabulated_function_manager.insert_obj_from_json_vec(&json_prop.tabulations)?;
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_tabulations() {
        let config = Configuration::new();
        config.load(r#"{
            "tabulations": [
                {
                    "name": "exp",
                    "function": {"function_type": "Exp"},
                    "left_x": 0.0,
                    "right_x": 10.0,
                    "points_count": 11
                }
            ]
        }"#.as_bytes()).unwrap();
        let exp = config.tabulated_function_manager().get("exp").unwrap();
        assert_eq!(exp.points_count(), 11);
        assert_eq!(exp.point_y(10).unwrap(), 10f64.exp());
    }

    #[test]
    fn empty_configuration_is_valid() {
        let config = Configuration::default();
        config.load("{}".as_bytes()).unwrap();
        assert!(config.tabulated_function_manager().names().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let config = Configuration::new();
        let result = config.from_reader("/nonexistent/tabfun/config.json");
        assert!(matches!(result, Err(ManagerError::IOError(_))));
    }
}
