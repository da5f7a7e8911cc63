use pto_scan::{Error, ProjectDirectory, Value};
use std::fs;
use tempfile::TempDir;

const SCRIPT: &str = "\
p f2 w3000 h1500 v360 n\"TIFF_m c:LZW\"
# images
i w800 h600 f0 n\"PA030369.JPG\" y0 p0 r0 v80
i w800 h600 f0 n\"PA030370.JPG\" y45.5 p-2 v=0
c n0 N1 x10 y20 X30 Y40 t0
";

fn project_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.pto"), SCRIPT).unwrap();
    fs::write(dir.path().join("b.PTO"), SCRIPT).unwrap();
    fs::write(dir.path().join("readme.txt"), "not a script").unwrap();
    dir
}

#[test]
fn test_list_is_case_sensitive() {
    let dir = project_dir();
    let names = ProjectDirectory::new(dir.path()).list().unwrap();
    assert_eq!(names, vec!["a.pto"]);

    let upper = ProjectDirectory::new(dir.path())
        .with_extension(".PTO")
        .list()
        .unwrap();
    assert_eq!(upper, vec!["b.PTO"]);
}

#[test]
fn test_list_sorted_files_only() {
    let dir = project_dir();
    fs::write(dir.path().join("c.pto"), "").unwrap();
    fs::write(dir.path().join("0.pto"), "").unwrap();
    fs::create_dir(dir.path().join("sub.pto")).unwrap();

    let names = ProjectDirectory::new(dir.path()).list().unwrap();
    assert_eq!(names, vec!["0.pto", "a.pto", "c.pto"]);
}

#[test]
fn test_list_missing_directory() {
    let dir = project_dir();
    let missing = ProjectDirectory::new(dir.path().join("nope"));
    assert!(matches!(missing.list(), Err(Error::Io(_))));
}

#[test]
fn test_load_images() {
    let dir = project_dir();
    let records = ProjectDirectory::new(dir.path()).load_images("a.pto").unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, Some(Value::String("PA030369.JPG".into())));
    assert_eq!(records[0].yaw, Some(Value::Int(0)));
    assert_eq!(records[0].pitch, Some(Value::Int(0)));
    assert_eq!(records[0].roll, Some(Value::Int(0)));
    assert_eq!(records[0].view, Some(Value::Int(80)));

    assert_eq!(records[1].yaw, Some(Value::Float(45.5)));
    assert_eq!(records[1].roll, None);
    assert_eq!(records[1].view, Some(Value::Backref(0)));
}

#[test]
fn test_load_images_json() {
    let dir = project_dir();
    let records = ProjectDirectory::new(dir.path()).load_images("a.pto").unwrap();
    let json = serde_json::to_value(&records).unwrap();

    assert_eq!(json[0]["name"], "PA030369.JPG");
    assert_eq!(json[0]["view"], 80);
    assert_eq!(json[1]["yaw"], 45.5);
    assert_eq!(json[1]["pitch"], -2);
    assert!(json[1]["roll"].is_null());
}

#[test]
fn test_load_images_rejects_bad_names() {
    let dir = project_dir();
    let project = ProjectDirectory::new(dir.path());
    for name in [".a.pto", "../a.pto", "sub/a.pto", "sub\\a.pto"] {
        assert!(
            matches!(project.load_images(name), Err(Error::InvalidFilename(_))),
            "{} should be rejected",
            name
        );
    }
}

#[test]
fn test_load_images_missing_file() {
    let dir = project_dir();
    let err = ProjectDirectory::new(dir.path())
        .load_images("missing.pto")
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
