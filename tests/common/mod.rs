use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

/// The three-row example table used throughout the tests, plus an extra
/// `Age` column that must survive loading and export.
pub const TOURISTS_CSV: &str = "Name,Country,Destination,Duration,Rating,Age\n\
                                Ann,FR,Paris,3,5,34\n\
                                Bob,FR,Nice,5,4,41\n\
                                Cid,DE,Berlin,2,5,29\n";

/// Write `contents` to `name` inside a fresh temporary directory.
pub fn write_temp(name: &str, contents: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    (dir, path)
}
