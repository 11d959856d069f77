pub mod clothing;
pub mod history;
pub mod outfit;
