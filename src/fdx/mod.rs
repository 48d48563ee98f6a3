pub mod fdx_writer;
pub mod fdx_reader;

pub use fdx_writer::export_fdx;
pub use fdx_reader::{import_fdx, FdxError};
