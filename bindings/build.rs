fn main() {
    uniffi::generate_scaffolding("src/estate.udl").expect("UDL scaffolding generation failed");
}
