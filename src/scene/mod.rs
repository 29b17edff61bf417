pub mod field;
pub mod proximity;
