pub mod date_context;
pub mod fs_json_util;
pub mod landmark;
pub mod parser;
pub mod schema;
pub mod tokenizer;
