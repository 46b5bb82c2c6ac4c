pub mod forms;
pub mod log;
