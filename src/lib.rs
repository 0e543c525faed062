pub mod audio;
pub mod code;
pub mod content;
pub mod display;
pub mod engine;
pub mod model;
pub mod planner;
pub mod timing;
pub mod tokenizer;
