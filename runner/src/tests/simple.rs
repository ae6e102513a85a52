use core::module_path;
use function_name::named;

use super::{run, simulations};

#[test]
#[named]
pub fn single_process() {
    let simulations = simulations(&[(0, 5)]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &simulations,
    );
}

#[test]
#[named]
pub fn late_single_process() {
    let simulations = simulations(&[(7, 3)]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &simulations,
    );
}

#[test]
#[named]
pub fn back_to_back() {
    let simulations = simulations(&[(0, 3), (3, 2), (5, 4)]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &simulations,
    );
}

#[test]
#[named]
pub fn idle_gaps() {
    let simulations = simulations(&[(2, 2), (10, 6), (30, 1)]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &simulations,
    );
}
