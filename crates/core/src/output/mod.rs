pub mod document_assembler;
pub mod screenshot_writer;
