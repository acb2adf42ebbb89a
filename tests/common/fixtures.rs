//! Test fixture helpers for build trees and fake tools
//!
//! The fake `size` reports each file's contents (a decimal number) as its
//! text and dec sizes, so a fixture fully controls the numbers a comparison
//! sees. Files whose path contains `unknown` make it exit 3, files whose path
//! contains `broken` make it exit 1. The fake `file` calls `*.sh` a shell
//! script and everything else an ELF executable.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_FILE: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
    echo "file-5.45"
    exit 0
fi
case "$1" in
    *.sh) echo "$1: POSIX shell script, ASCII text executable" ;;
    *) echo "$1: ELF 32-bit LSB executable, MIPS, statically linked" ;;
esac
"#;

const FAKE_SIZE: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
    echo "GNU size (fake) 2.42"
    exit 0
fi
for last; do :; done
case "$last" in
    *unknown*) echo "$last: file format not recognized" >&2; exit 3 ;;
    *broken*) echo "$last: internal error" >&2; exit 1 ;;
esac
dec=$(cat "$last")
printf '   text\t   data\t    bss\t    dec\t    hex\tfilename\n'
printf '%7d\t%7d\t%7d\t%7d\t%7x\t%s\n' "$dec" 0 0 "$dec" "$dec" "$last"
"#;

/// Fake classifier and size tool living in their own temp directory
pub struct FakeTools {
    dir: TempDir,
}

impl FakeTools {
    /// Write both scripts and make them executable
    pub fn install() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        write_script(&dir.path().join("file"), FAKE_FILE)?;
        write_script(&dir.path().join("size"), FAKE_SIZE)?;
        Ok(Self { dir })
    }

    /// Path of the fake classifier
    pub fn file(&self) -> PathBuf {
        self.dir.path().join("file")
    }

    /// Path of the fake size tool
    pub fn size(&self) -> PathBuf {
        self.dir.path().join("size")
    }
}

fn write_script(path: &Path, contents: &str) -> anyhow::Result<()> {
    fs::write(path, contents)?;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

/// Creates a build tree where each `(relative path, dec)` becomes a file
/// containing that number
pub fn build_tree(entries: &[(&str, u64)]) -> anyhow::Result<TempDir> {
    let temp_dir = TempDir::new()?;
    for (rel, dec) in entries {
        let path = temp_dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, dec.to_string())?;
    }
    Ok(temp_dir)
}
