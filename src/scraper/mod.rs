pub mod assembler;
pub mod skills;
pub mod tenure;

pub use assembler::{ProfileAssembler, ProfileLookup};
pub use skills::SkillsFetcher;
