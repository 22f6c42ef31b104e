fn main() {
    packed_assets::Config::new(["assets"])
        .level(10)
        .build()
        .expect("Failed to pack assets");
}
