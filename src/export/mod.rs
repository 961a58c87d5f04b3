pub mod excel;

pub use excel::write_quotation_excel;
