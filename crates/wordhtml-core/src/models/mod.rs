pub mod file_entry;
pub mod options;
pub mod preset;
pub mod result;
