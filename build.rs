// Taken from embassy stm32f3 examples:
// https://github.com/embassy-rs/embassy/blob/main/examples/stm32f3/build.rs
// Link args apply to every linked target so tests/unit.rs gets the same
// memory layout and defmt section as the firmware binary.
fn main() {
    println!("cargo:rustc-link-arg=--nmagic");
    println!("cargo:rustc-link-arg=-Tlink.x");
    println!("cargo:rustc-link-arg=-Tdefmt.x");
}
