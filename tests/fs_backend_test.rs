use blogadmin::store::backend::KvBackend;
use blogadmin::store::fs_backend::FsBackend;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path());
    (dir, backend)
}

#[test]
fn test_fs_backend_missing_key_is_none() {
    let (_dir, backend) = setup();
    assert_eq!(backend.get("blogs").unwrap(), None);
}

#[test]
fn test_fs_backend_set_get_overwrite() {
    let (_dir, backend) = setup();

    backend.set("blogs", "[1]").unwrap();
    assert_eq!(backend.get("blogs").unwrap().as_deref(), Some("[1]"));

    backend.set("blogs", "[]").unwrap();
    assert_eq!(backend.get("blogs").unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_fs_backend_writes_one_file_per_key() {
    let (dir, backend) = setup();
    backend.set("blogs", "[]").unwrap();
    backend.set("drafts", "{}").unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("blogs.json")).unwrap(),
        "[]"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("drafts.json")).unwrap(),
        "{}"
    );
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (dir, backend) = setup();
    backend.set("blogs", "[]").unwrap();

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_creates_missing_root() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let backend = FsBackend::new(&nested);

    backend.set("blogs", "[]").unwrap();
    assert!(nested.join("blogs.json").exists());
    assert_eq!(backend.root(), nested.as_path());
}

#[test]
fn test_fs_backend_key_cannot_escape_root() {
    let (dir, backend) = setup();
    backend.set("../outside", "x").unwrap();

    let path = backend.key_path("../outside");
    assert!(path.starts_with(dir.path()));
    assert_eq!(backend.get("../outside").unwrap().as_deref(), Some("x"));
}
