pub mod evaluate;
pub mod show_config;

pub use evaluate::{run_evaluate, EvaluateArgs};
pub use show_config::run_show_config;
