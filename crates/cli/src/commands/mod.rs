pub(crate) mod admin;
pub(crate) mod migrate;
pub(crate) mod serve;
