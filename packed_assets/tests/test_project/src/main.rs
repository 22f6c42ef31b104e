use packed_assets::{Assets, Mode, include_assets};

mod assets {
    include!(concat!(env!("OUT_DIR"), "/assets.rs"));

    #[cfg(test)]
    mod tests {
        include!(concat!(env!("OUT_DIR"), "/assets_test.rs"));
    }
}

static NESTED: Assets<'static> = include_assets!("assets/nested", strip = "assets/nested/");

fn main() {
    let original_content = "Contents of hello.txt\n";

    // Generated accessor returns a Vec<u8> with the decompressed data.
    let data_vec = assets::asset("assets/hello.txt").expect("hello.txt is not embedded");

    let s = std::str::from_utf8(&data_vec).expect("data is not valid UTF-8");
    println!("{s}");

    assert_eq!(s, original_content);
    assert!(
        assets::asset("assets/empty_file")
            .expect("empty_file is not embedded")
            .is_empty()
    );
    assert!(assets::asset("assets/missing").unwrap_err().is_not_found());

    let nested = assets::asset_dir("assets/nested/").expect("nested assets failed to decompress");
    assert_eq!(nested.len(), 1);
    assert_eq!(nested["assets/nested/aaa.txt"], b"This file is just a test.\n");

    let from_macro = NESTED.get("aaa.txt").expect("macro did not embed aaa.txt");
    assert_eq!(from_macro, nested["assets/nested/aaa.txt"]);

    // Raw assets are read relative to the working directory.
    assets::set_raw_assets(true);
    assert_eq!(assets::ASSETS.mode(), Mode::Raw);
    let raw = assets::asset("assets/hello.txt").expect("hello.txt is not on disk");
    assert_eq!(raw, data_vec);
    let raw_dir = assets::asset_dir("assets").expect("assets directory is not on disk");
    assert_eq!(raw_dir.len(), 3);
    assets::set_raw_assets(false);

    println!("Decompressed data matches original.");
}
