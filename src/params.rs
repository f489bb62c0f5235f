//Reserve capacity for the active-set buffers, expressed in columns.
//Homotopy-style solvers rarely carry more active columns than this
//at any point along the solution path.
pub const ACTIVE_RESERVE_COLUMNS : usize = 10;

//Numerical algorithm constants
pub const DEFAULT_TEST_THRESH : f32 = 0.001f32;

pub const DEFAULT_TEST_THRESH_F64 : f64 = 0.000000001f64;
