pub mod genome;
pub mod hash;
pub mod profile;
