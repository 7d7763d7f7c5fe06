#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod clipboard;
mod config;
mod element;
mod error;
mod filter;
mod footer;
mod icons;
mod logging;
mod navigation;
mod reveal;
mod schedule;
mod scroll;
mod shortcuts;
mod theme;
mod toast;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "wasm32")]
mod frontend;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This crate only runs in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
