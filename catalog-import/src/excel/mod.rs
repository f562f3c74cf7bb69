//! Excel decoding and sample-workbook generation

mod reader;
mod writer;

pub use reader::read_product_rows;
pub use writer::write_template_workbook;
