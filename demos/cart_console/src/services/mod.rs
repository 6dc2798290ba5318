// demos/cart_console/src/services/mod.rs

pub mod http_api;
