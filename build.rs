//! Build script for rival-server
//!
//! With the `ui` feature the built frontend in `ui/dist` is embedded into the
//! binary. Warn when it has not been built yet.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    #[cfg(feature = "ui")]
    check_ui_dist();
}

#[cfg(feature = "ui")]
fn check_ui_dist() {
    println!("cargo:rerun-if-changed=ui/dist/");

    let index = std::path::Path::new("ui/dist/index.html");
    if !index.exists() {
        println!("cargo:warning=rival UI: ui/dist/index.html not found, the server will answer 404 for UI routes");
        println!("cargo:warning=rival UI: build it first with `cd ui && trunk build --release`");
    }
}
