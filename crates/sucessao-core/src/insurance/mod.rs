pub mod leverage;
