//! Artifact Guard - SHA-256 integrity check before loading
//!
//! When a digest is configured, the file on disk must match it or loading
//! is refused.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::logic::error::{PredictError, PredictResult};

/// Hex-encoded SHA-256 of a file
pub fn file_sha256(path: impl AsRef<Path>) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Compare `path` against `expected` (hex, case-insensitive). No-op when `expected` is `None`.
pub fn verify_checksum(artifact: &'static str, path: impl AsRef<Path>, expected: Option<&str>) -> PredictResult<()> {
    let Some(expected) = expected else {
        return Ok(());
    };
    let path = path.as_ref();

    let actual = file_sha256(path)
        .map_err(|e| PredictError::artifact(artifact, format!("{}: {}", path.display(), e)))?;

    if !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(PredictError::artifact(
            artifact,
            format!("checksum mismatch for {}: expected {}, got {}", path.display(), expected, actual),
        ));
    }

    log::info!("{} checksum verified ({})", artifact, &actual[..12]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // sha256("abc")
    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    fn abc_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();
        file
    }

    #[test]
    fn test_file_sha256() {
        let file = abc_file();
        assert_eq!(file_sha256(file.path()).unwrap(), ABC_SHA256);
    }

    #[test]
    fn test_verify_checksum() {
        let file = abc_file();
        assert!(verify_checksum("model", file.path(), None).is_ok());
        assert!(verify_checksum("model", file.path(), Some(ABC_SHA256)).is_ok());
        assert!(verify_checksum("model", file.path(), Some(&ABC_SHA256.to_uppercase())).is_ok());

        let err = verify_checksum("model", file.path(), Some("00")).unwrap_err();
        assert!(err.to_string().contains("checksum mismatch"));
    }

    #[test]
    fn test_verify_missing_file() {
        let err = verify_checksum("scaler", "/nonexistent/file", Some(ABC_SHA256)).unwrap_err();
        assert!(matches!(err, PredictError::ArtifactLoad { artifact: "scaler", .. }));
    }
}
