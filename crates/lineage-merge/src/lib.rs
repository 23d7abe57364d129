//! Lineage merge utilities.
//!
//! - **flatten**: display normalization of lineage values
//! - **table**: the merge table (configuration, source data, result outer join)
//! - **priority**: recomputation of the priority rule against the recorded result
//! - **frame**: Polars DataFrame and CSV export of the merge table

pub mod flatten;
pub mod frame;
pub mod priority;
pub mod table;

pub use flatten::{flatten_for_display, render_inline};
pub use frame::{CELL_SEPARATOR, ExportError};
pub use priority::{Resolution, ResultCheck, check_result, resolve_by_priority};
pub use table::{
    CONFIGURATION_COLUMN, Cell, MergeError, MergeRow, MergeTable, RESULT_COLUMN,
    SOURCE_DATA_COLUMN, build_merge_table,
};
