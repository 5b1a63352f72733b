fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Only the ESP-IDF build needs the sysenv link arguments; host builds
    // (tests, simulator) have nothing to generate.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
