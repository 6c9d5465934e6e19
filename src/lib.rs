pub mod algebra;
pub mod error;
pub mod structures;
pub mod utils;
pub mod word;

pub use algebra::field::BinaryField;
pub use algebra::params::FieldParams;

pub use error::{GfError, ModulusError};
pub use structures::basic::{BasicElem, BasicPoly};
pub use structures::lut::{
    build_div_table, build_mul_table, div_table_from_mul, FullTables, LogTable,
    MAX_FULL_TABLE_DEGREE, MAX_LOG_TABLE_DEGREE,
};
pub use structures::matrix::{mat_mul, GfMatrix};
pub use structures::pow::{PowElem, PowPoly};
pub use structures::registry::TableRegistry;
pub use structures::state::FieldState;
pub use structures::table::{TableElem, TablePoly};
pub use utils::{lead_bit_position, modulus_degree, reduce};
pub use word::Word;
