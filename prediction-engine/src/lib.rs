pub mod api;
pub mod category;
pub mod chat;
pub mod confidence;
pub mod config;
pub mod metrics_consts;
pub mod metrics_utils;
pub mod prediction;
pub mod ranking;
pub mod record;
pub mod router;
pub mod server;
pub mod store;
