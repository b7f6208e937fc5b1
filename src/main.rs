fn main() {
    // The app only runs in the browser; the wasm entry point does the
    // mounting. Building the bin on other targets is a no-op.
    #[cfg(target_arch = "wasm32")]
    blogfeed_frontend::start();
}
