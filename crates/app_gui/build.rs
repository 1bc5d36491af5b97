use std::env;

fn main() {
    let version = env::var("PET_CLASSIFIER_VERSION")
        .unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap());
    println!("cargo:rustc-env=PET_CLASSIFIER_VERSION={version}");
}
