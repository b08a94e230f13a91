//! Output file naming

use std::path::{Path, PathBuf};

use crate::error::{EightMbError, EightMbResult};

/// Prefix of the final compressed file
pub const COMPRESSED_PREFIX: &str = "compressed_";
/// Prefix of the intermediate cropped file
pub const CROPPED_PREFIX: &str = "cropped_";

/// `<prefix><basename of input>`, placed in `dir`
pub fn prefixed_name(input: &Path, prefix: &str, dir: &Path) -> EightMbResult<PathBuf> {
    let file_name = input
        .file_name()
        .ok_or_else(|| EightMbError::InputFileNotFound {
            path: input.display().to_string(),
        })?;

    let mut name = std::ffi::OsString::from(prefix);
    name.push(file_name);
    Ok(dir.join(name))
}

/// Name of the compressed output in the working directory
pub fn compressed_output(input: &Path) -> EightMbResult<PathBuf> {
    prefixed_name(input, COMPRESSED_PREFIX, Path::new(""))
}

/// Name of the cropped intermediate in the working directory
pub fn cropped_output(input: &Path) -> EightMbResult<PathBuf> {
    prefixed_name(input, CROPPED_PREFIX, Path::new(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_uses_basename_only() {
        let input = Path::new("/videos/holiday/clip one.mp4");
        assert_eq!(
            compressed_output(input).unwrap(),
            PathBuf::from("compressed_clip one.mp4")
        );
        assert_eq!(
            cropped_output(input).unwrap(),
            PathBuf::from("cropped_clip one.mp4")
        );
    }

    #[test]
    fn test_prefix_into_directory() {
        let out = prefixed_name(Path::new("a.mkv"), "x_", Path::new("/tmp/out")).unwrap();
        assert_eq!(out, PathBuf::from("/tmp/out/x_a.mkv"));
    }

    #[test]
    fn test_path_without_file_name() {
        assert!(compressed_output(Path::new("/")).is_err());
        assert!(compressed_output(Path::new("..")).is_err());
    }
}
