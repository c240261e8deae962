//! Tests for directory listing against a real temp directory.

use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use super::reading::extension_of;
use super::{EntryKind, list_directory};
use crate::config::Config;
use crate::file_system::{BrowseError, resolve};

fn config_for(root: &Path) -> Config {
    Config::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0, root, false, 128)
}

fn populate(dir: &Path) {
    fs::create_dir(dir.join("Zebra")).unwrap();
    fs::create_dir(dir.join("apples")).unwrap();
    fs::create_dir(dir.join(".git")).unwrap();
    fs::write(dir.join("Photo.JPG"), b"x").unwrap();
    fs::write(dir.join("notes.txt"), b"x").unwrap();
    fs::write(dir.join(".hidden.png"), b"x").unwrap();
    fs::write(dir.join("README"), b"x").unwrap();
}

#[test]
fn lists_visible_entries_directories_first() {
    let tmp = tempfile::tempdir().unwrap();
    populate(tmp.path());
    let config = config_for(tmp.path());

    let listing = list_directory(&resolve("", &config).unwrap()).unwrap();
    let names: Vec<_> = listing.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["apples", "Zebra", "notes.txt", "Photo.JPG", "README"]);
    assert!(listing.entries[..2].iter().all(|e| e.kind == EntryKind::Directory));
    assert!(listing.entries[2..].iter().all(|e| e.kind == EntryKind::File));
}

#[test]
fn hidden_entries_are_excluded() {
    let tmp = tempfile::tempdir().unwrap();
    populate(tmp.path());
    let config = config_for(tmp.path());

    let listing = list_directory(&resolve("", &config).unwrap()).unwrap();
    assert!(listing.entries.iter().all(|e| !e.name.starts_with('.')));
}

#[test]
fn extensions_are_lowercased_with_dot() {
    let tmp = tempfile::tempdir().unwrap();
    populate(tmp.path());
    let config = config_for(tmp.path());

    let listing = list_directory(&resolve("", &config).unwrap()).unwrap();
    let photo = listing.entries.iter().find(|e| e.name == "Photo.JPG").unwrap();
    assert_eq!(photo.extension, ".jpg");
    assert!(photo.is_image);

    let dir = listing.entries.iter().find(|e| e.name == "apples").unwrap();
    assert_eq!(dir.extension, "");
    assert!(!dir.is_image);

    let readme = listing.entries.iter().find(|e| e.name == "README").unwrap();
    assert_eq!(readme.extension, "");
}

#[test]
fn relative_paths_follow_requested_form() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("sub")).unwrap();
    fs::write(tmp.path().join("sub").join("a.png"), b"x").unwrap();
    let config = config_for(tmp.path());

    let listing = list_directory(&resolve("sub", &config).unwrap()).unwrap();
    assert_eq!(listing.requested_path, "sub");
    assert_eq!(listing.entries[0].relative_path, "sub/a.png");
    assert_eq!(Path::new(&listing.absolute_path), tmp.path().join("sub"));
}

#[test]
fn repeated_listings_are_identical() {
    let tmp = tempfile::tempdir().unwrap();
    populate(tmp.path());
    for i in 0..20 {
        fs::write(tmp.path().join(format!("f{}.png", i)), b"x").unwrap();
    }
    let config = config_for(tmp.path());
    let resolved = resolve("", &config).unwrap();

    let first = list_directory(&resolved).unwrap();
    let second = list_directory(&resolved).unwrap();
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[test]
fn missing_directory_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_for(tmp.path());
    let result = list_directory(&resolve("missing", &config).unwrap());
    assert!(matches!(result, Err(BrowseError::NotFound { .. })));
}

#[test]
fn file_target_is_not_a_directory() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("file.txt"), b"x").unwrap();
    let config = config_for(tmp.path());
    let result = list_directory(&resolve("file.txt", &config).unwrap());
    assert!(matches!(result, Err(BrowseError::NotADirectory { .. })));
}

#[cfg(unix)]
#[test]
fn symlink_to_directory_is_a_directory() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("real")).unwrap();
    std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("link")).unwrap();
    std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("broken")).unwrap();
    let config = config_for(tmp.path());

    let listing = list_directory(&resolve("", &config).unwrap()).unwrap();
    let link = listing.entries.iter().find(|e| e.name == "link").unwrap();
    assert_eq!(link.kind, EntryKind::Directory);
    let broken = listing.entries.iter().find(|e| e.name == "broken").unwrap();
    assert_eq!(broken.kind, EntryKind::File);
}

#[test]
fn listing_serializes_with_wire_names() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("a.gif"), b"x").unwrap();
    let config = config_for(tmp.path());

    let listing = list_directory(&resolve("", &config).unwrap()).unwrap();
    let json = serde_json::to_value(&listing).unwrap();
    assert_eq!(json["path"], "");
    assert!(json["absolutePath"].is_string());
    assert_eq!(json["items"][0]["kind"], "file");
    assert_eq!(json["items"][0]["relativePath"], "a.gif");
    assert_eq!(json["items"][0]["isImage"], true);
}

#[test]
fn extension_of_handles_edge_cases() {
    assert_eq!(extension_of("a.tar.GZ"), ".gz");
    assert_eq!(extension_of("noext"), "");
    assert_eq!(extension_of("trailing."), "");
}
