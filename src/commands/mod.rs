pub mod count;
pub mod generate;
pub mod studio;
