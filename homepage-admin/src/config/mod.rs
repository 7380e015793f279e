mod errors;
mod model;
mod storage;

pub(crate) use model::AdminConfig;
pub(crate) use storage::load_initial_config;
