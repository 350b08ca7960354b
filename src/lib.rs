pub mod apis;
pub mod arguments;
pub mod config;
pub mod constants;
pub mod logger;
pub mod paths;
pub mod prices;
pub mod rpc;
pub mod shutdown;
pub mod swaps;
pub mod tokens;
pub mod wallet;
pub mod web_server;
