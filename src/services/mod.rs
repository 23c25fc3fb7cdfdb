pub mod generator;
pub mod images;
pub mod recommendations;
pub mod similar;
