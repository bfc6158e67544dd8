use super::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "photocard_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn add_dir_picks_font_extensions_only() {
    let dir = temp_dir("fonts_add_dir");
    std::fs::create_dir_all(dir.join("nested")).unwrap();
    std::fs::write(dir.join("a.ttf"), b"a").unwrap();
    std::fs::write(dir.join("b.OTF"), b"b").unwrap();
    std::fs::write(dir.join("c.ttc"), b"c").unwrap();
    std::fs::write(dir.join("readme.txt"), b"x").unwrap();
    std::fs::write(dir.join("nested").join("d.ttf"), b"d").unwrap();

    let mut book = FontBook::new();
    assert_eq!(book.add_dir(&dir), 3);
    assert_eq!(book.len(), 3);
    assert_eq!(book.sources()[0].as_slice(), b"a");
    assert_eq!(book.sources()[1].as_slice(), b"b");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_dir_and_file_do_not_register() {
    let mut book = FontBook::new();
    assert_eq!(book.add_dir(Path::new("/definitely/not/here")), 0);
    assert!(book.add_file("/definitely/not/here.ttf").is_err());
    assert!(book.is_empty());
}
