pub mod admin;
pub mod data_checks;
pub mod fragments;
pub mod records;
