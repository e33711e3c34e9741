pub mod direct;
pub mod r2rml;
