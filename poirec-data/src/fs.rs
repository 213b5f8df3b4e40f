//! Capability-based file helpers over UTF-8 paths.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open `path` for reading.
///
/// # Errors
/// Returns the underlying I/O error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create or truncate `path`, creating missing parent directories first.
///
/// # Errors
/// Returns the underlying I/O error when a directory or the file cannot be
/// created.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    let (dir, name) = open_parent_dir(path, true)?;
    dir.create(name)
}

/// Report whether `path` is a regular file.
///
/// # Errors
/// Returns the underlying I/O error when `path` or its parent directory
/// cannot be inspected, including [`io::ErrorKind::NotFound`] when either
/// is missing.
pub fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent_dir(path, false)?;
    dir.metadata(name).map(|meta| meta.is_file())
}

fn open_parent_dir(path: &Utf8Path, create: bool) -> io::Result<(fs_utf8::Dir, &str)> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path} does not name a file"),
        )
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    if create {
        fs_utf8::Dir::create_ambient_dir_all(parent, ambient_authority())?;
    }
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use std::io::{Read, Write};
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temporary directory")
    }

    fn utf8(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 temp path")
    }

    #[rstest]
    fn creates_parents_and_round_trips_content(temp_dir: TempDir) {
        let path = utf8(&temp_dir).join("nested/deeper/out.txt");

        let mut file = create_utf8_file(&path).expect("create file");
        file.write_all(b"hello").expect("write");
        drop(file);

        let mut content = String::new();
        open_utf8_file(&path)
            .expect("open file")
            .read_to_string(&mut content)
            .expect("read");
        assert_eq!(content, "hello");
        assert!(is_regular_file(&path).expect("metadata"));
    }

    #[rstest]
    fn directories_are_not_regular_files(temp_dir: TempDir) {
        let root = utf8(&temp_dir);
        std::fs::create_dir(root.join("sub")).expect("mkdir");
        assert!(!is_regular_file(&root.join("sub")).expect("metadata"));
    }

    #[rstest]
    #[case("missing.json")]
    #[case("no/such/dir.json")]
    fn missing_paths_report_not_found(temp_dir: TempDir, #[case] relative: &str) {
        let err = is_regular_file(&utf8(&temp_dir).join(relative)).expect_err("missing path");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
