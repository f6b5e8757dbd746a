pub mod assembler;
pub mod guidance;

pub use assembler::PromptAssembler;
pub use guidance::GuidanceTable;
