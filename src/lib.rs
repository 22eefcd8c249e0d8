#[macro_use]
extern crate lazy_static;

pub mod cmdline;
pub mod core;
pub mod environment;
pub mod evaluator;
pub mod interpreter;
pub mod list;
pub mod printer;
pub mod reader;
pub mod special_forms;
mod strings;
pub mod tokens;
pub mod types;

pub use types::Value;
