// demos/cart_console/src/ui/mod.rs

pub mod terminal;
