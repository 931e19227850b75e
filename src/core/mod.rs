pub mod folders;
pub mod formatter;
pub mod sampler;
pub mod sanitizer;
pub mod table;
