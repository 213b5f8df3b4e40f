//! Fixture files shared by the CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Businesses near both built-in profiles, plus one without a rating.
pub(super) const BUSINESS_DUMP: &str = concat!(
    r#"{"business_id":"sb-trattoria","latitude":34.42,"longitude":-119.70,"categories":"Food, Italian","stars":4.5}"#,
    "\n",
    r#"{"business_id":"sb-diner","latitude":"34.40","longitude":"-119.72","categories":["Food"],"stars":"4.0"}"#,
    "\n",
    r#"{"business_id":"sb-boutique","latitude":34.43,"longitude":-119.71,"categories":"Shopping","stars":3.5}"#,
    "\n",
    "\n",
    r#"{"business_id":"copy-corner","latitude":10.1,"longitude":9.9,"categories":"Printing Services","stars":4.5}"#,
    "\n",
    r#"{"business_id":"corner-market","latitude":10.0,"longitude":10.2,"categories":"Food, Shopping","stars":3}"#,
    "\n",
    r#"{"business_id":"unrated","latitude":10.0,"longitude":10.0,"categories":"Printing Services","stars":null}"#,
    "\n",
    "this line is not JSON\n",
);

/// Temporary directory exposed through UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn write(&self, name: &str, content: &str) -> Utf8PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("write fixture");
        path
    }
}

/// Identifiers of text-format result lines, grouped under their headers.
pub(super) fn text_sections(output: &str) -> Vec<(String, Vec<String>)> {
    let mut sections: Vec<(String, Vec<String>)> = Vec::new();
    for line in output.lines() {
        if let Some(label) = line.strip_prefix("# ") {
            sections.push((label.to_owned(), Vec::new()));
        } else if let Some((_, rest)) = line.split_once('\t') {
            let id = rest.split_once(": ").map_or(rest, |(id, _)| id);
            sections
                .last_mut()
                .expect("result lines follow a header")
                .1
                .push(id.to_owned());
        }
    }
    sections
}
