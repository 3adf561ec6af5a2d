use std::env;
use std::error::Error;
use std::f64::consts::PI;
use std::fs::File;
use std::io::{
    BufReader,
    BufWriter
};

use log::info;

use tabfun::configuration::Configuration;
use tabfun::manager::manager::IManager;
use tabfun::math::function::basic::exp::Exp;
use tabfun::math::function::basic::log::Log;
use tabfun::math::function::basic::trigonometric::{
    Cos,
    Sin
};
use tabfun::math::function::function::Function;
use tabfun::math::function::functions;
use tabfun::math::function::tabulated::arraytabulatedfunction::ArrayTabulatedFunction;
use tabfun::math::function::tabulated::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use tabfun::math::function::tabulated::tabulatedfunction::TabulatedFunction;
use tabfun::math::function::tabulated::tabulatedfunctions::{
    read_binary,
    read_json,
    read_text,
    tabulate,
    write_binary,
    write_json,
    write_text
};

const EPS: f64 = 1e-9;

fn print_configured(config_path: &str) -> Result<(), Box<dyn Error>> {
    let config = Configuration::new();
    config.from_reader(config_path)?;
    let manager = config.tabulated_function_manager();
    for name in manager.names() {
        let function = manager.get(&name)?;
        println!("{}: {} points on [{}, {}]",
                 name,
                 function.points_count(),
                 function.left_domain_border(),
                 function.right_domain_border());
        for i in 0..function.points_count() {
            println!("  {}: {}", i, function.point(i)?);
        }
    }
    Ok(())
}

fn run_demo() -> Result<(), Box<dyn Error>> {
    let tab_sin: ArrayTabulatedFunction = tabulate(&Sin, 0.0, PI, 10)?;
    let tab_cos: LinkedListTabulatedFunction = tabulate(&Cos, 0.0, PI, 10)?;
    let left = tab_sin.left_domain_border();
    let right = tab_sin.right_domain_border();
    let step = (right - left) / 10.0;

    let mut x = left;
    while x <= right + EPS {
        println!("x = {:.4}, sin(x) = {:.6}, tabsin(x) = {:.6}, cos(x) = {:.6}, tabcos(x) = {:.6}",
                 x, Sin.value(x), tab_sin.value(x), Cos.value(x), tab_cos.value(x));
        x += step;
    }

    let sum_squares = functions::sum(
        functions::power(&tab_sin, 2.0),
        functions::power(&tab_cos, 2.0)
    );
    let mut x = left;
    while x <= right + EPS {
        println!("x = {:.4}, tabsin^2 + tabcos^2 = {:.6}", x, sum_squares.value(x));
        x += step;
    }

    let out_dir = env::temp_dir();

    let tab_exp: ArrayTabulatedFunction = tabulate(&Exp, 0.0, 10.0, 11)?;
    let exp_path = out_dir.join("exp.txt");
    write_text(&tab_exp, BufWriter::new(File::create(&exp_path)?))?;
    let read_exp: LinkedListTabulatedFunction = read_text(BufReader::new(File::open(&exp_path)?))?;
    for i in 0..=10 {
        let x = i as f64;
        println!("x = {}, exp(x) = {:.6}, tabexp(x) = {:.6}, readexp(x) = {:.6}",
                 x, Exp.value(x), tab_exp.value(x), read_exp.value(x));
    }

    let log = Log::natural();
    let tab_log: LinkedListTabulatedFunction = tabulate(&log, 0.0, 10.0, 11)?;
    let log_path = out_dir.join("log.bin");
    write_binary(&tab_log, BufWriter::new(File::create(&log_path)?))?;
    let read_log: ArrayTabulatedFunction = read_binary(BufReader::new(File::open(&log_path)?))?;
    for i in 0..10 {
        let x = i as f64 + 0.1;
        println!("x = {}, log(x) = {:.6}, tablog(x) = {:.6}, readlog(x) = {:.6}",
                 x, log.value(x), tab_log.value(x), read_log.value(x));
    }

    let log_exp = functions::composition(log, Exp);
    let array_log_exp: ArrayTabulatedFunction = tabulate(&log_exp, 0.1, 10.0, 11)?;
    let linked_log_exp = LinkedListTabulatedFunction::from_tabulated(&array_log_exp);
    let json_path = out_dir.join("logexp.json");
    write_json(&linked_log_exp, BufWriter::new(File::create(&json_path)?))?;
    let read_log_exp: ArrayTabulatedFunction = read_json(BufReader::new(File::open(&json_path)?))?;
    for i in 0..10 {
        let x = i as f64 + 0.1;
        println!("x = {}, log(exp(x)) = {:.6}, array = {:.6}, linked = {:.6}, read = {:.6}",
                 x, log_exp.value(x), array_log_exp.value(x), linked_log_exp.value(x), read_log_exp.value(x));
    }

    let mut function = LinkedListTabulatedFunction::from_values(0.0, 4.0, &[0.0, 1.0, 4.0, 9.0, 16.0])?;
    println!("{}", function);
    println!("f(2.5) = {}", function.value(2.5));
    if let Err(error) = function.set_point_x(1, 10.0) {
        println!("set_point_x rejected: {}", error);
    }
    function.add_point((2.2, 5.0).into())?;
    println!("after adding (2.2; 5): {}", function);
    function.delete_point(0)?;
    function.delete_point(0)?;
    println!("after two deletions: {}", function);

    info!("demo files written to {}", out_dir.display());
    Ok(())
}

fn main() {
    env_logger::init();

    let result = match env::args().nth(1) {
        Some(config_path) => print_configured(&config_path),
        None => run_demo()
    };
    if let Err(error) = result {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}
