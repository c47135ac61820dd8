use std::env;

fn main() {
    let ui_dir = env::current_dir().unwrap().join("../ui");

    if !ui_dir.join("index.html").exists() {
        panic!("ui/index.html NOT FOUND");
    }

    println!("cargo:rerun-if-changed=../ui");

    tauri_build::build();
}
