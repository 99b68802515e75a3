use std::env;

/// Libraries linked when pkg-config is bypassed.
const LINK_LIBS: &[&str] = &["poppler-glib", "cairo", "gobject-2.0", "glib-2.0"];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");
    println!("cargo:rerun-if-env-changed=POPPLER_LIB_DIR");

    // Without the feature nothing native is referenced, so nothing is linked.
    if env::var_os("CARGO_FEATURE_POPPLER").is_none() {
        return;
    }

    // Manual override for installs without .pc files
    if let Ok(lib_dir) = env::var("POPPLER_LIB_DIR") {
        println!("cargo:warning=Using POPPLER_LIB_DIR: {}", lib_dir);
        println!("cargo:rustc-link-search=native={}", lib_dir);
        for lib in LINK_LIBS {
            println!("cargo:rustc-link-lib=dylib={}", lib);
        }
        return;
    }

    for (name, min_version) in [("poppler-glib", "0.18"), ("cairo", "1.10")] {
        if let Err(err) = pkg_config::Config::new()
            .atleast_version(min_version)
            .probe(name)
        {
            panic!(
                "{} >= {} not found via pkg-config: {}\n\
                 Install the development package (e.g. libpoppler-glib-dev, libcairo2-dev),\n\
                 point PKG_CONFIG_PATH at its .pc file, or set POPPLER_LIB_DIR.",
                name, min_version, err
            );
        }
    }
}
