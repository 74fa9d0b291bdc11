pub mod totals_store;

pub use totals_store::{AthleteTotal, Totals};
