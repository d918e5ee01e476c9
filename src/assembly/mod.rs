pub mod assembler;
pub mod features;
pub mod output;
pub mod plan;
pub mod widen;
