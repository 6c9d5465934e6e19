pub mod field;
pub mod params;
