pub mod kind;
pub mod rules;
pub mod schema;
pub mod table;

pub use kind::ReportKind;
pub use rules::{A1C_MAPPING, BMI_MAPPING, ColumnRule, KindMapping, mapping_for};
pub use schema::{UPLOAD_COLUMNS, column_index};
pub use table::ReportTable;
