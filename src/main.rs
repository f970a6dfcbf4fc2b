//! pictoplan main entrypoint.

use pictoplan::run;
use pictoplan::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
