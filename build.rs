//! Pokedex API build script.

use rustc_version::version_meta;
use rustc_version::Channel::Nightly;

#[doc(hidden)]
fn main() {
    // Migrations are embedded in the crate, so any change to them must trigger a rebuild.
    println!("cargo:rerun-if-changed=migrations");

    // Providing a Backtrace through std::error::Error requires a Nightly toolchain.
    if version_meta().unwrap().channel <= Nightly {
        println!("cargo:rustc-cfg=backtrace_support");
    }
}
