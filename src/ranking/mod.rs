pub mod parallel;
pub mod process;

pub use parallel::{par_extract_one_with, par_extract_with};
pub use process::{extract, extract_one, extract_one_with, extract_with, rank, sort_by_score};
