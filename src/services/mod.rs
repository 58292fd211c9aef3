pub mod analysis;
pub mod catalog;
pub mod extraction;
pub mod prompt;
pub mod synonyms;
pub mod vision;
