pub mod orders;
pub mod specialists;
