pub mod assets;
pub mod marital;
