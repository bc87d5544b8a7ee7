pub mod driver;

pub use driver::FrameDriver;

/// One-time console logger and panic hook setup. Call once from the wasm
/// entry point before anything else logs.
pub fn init_log() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
