//! Document export.

mod pdf;

pub use pdf::summary_to_pdf;
