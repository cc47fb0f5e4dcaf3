pub mod bridge;
pub mod config;
pub mod errors;
pub mod logging;
pub mod methods;
pub mod rpc;
