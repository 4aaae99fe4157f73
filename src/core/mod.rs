pub mod capability;
pub(crate) mod mapper_chain;
pub(crate) mod repr;
