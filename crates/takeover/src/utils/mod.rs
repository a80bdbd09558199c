pub mod log;

use crate::Result;
use std::{fs, path::Path};

pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        Ok(false)
    } else {
        fs::create_dir_all(dir)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::ensure_dir;

    #[test]
    fn creates_missing_dir_once() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out/nested");

        assert_eq!(true, ensure_dir(&dir).unwrap());
        assert_eq!(false, ensure_dir(&dir).unwrap());
        assert!(dir.is_dir());
    }

    #[test]
    fn empty_path_is_current_dir() {
        assert_eq!(false, ensure_dir("".as_ref()).unwrap());
    }
}
