use std::io::Read;
use std::path::Path;

/// Read a file and convert to UTF-8 if needed.
///
/// Supplier exports routinely arrive as `utf-8-sig` (BOM-prefixed) or
/// Windows-1252 from Excel. UTF-8 is tried first; on failure the
/// buffer is recovered from the error and decoded as Windows-1252.
/// A leading BOM is stripped either way.
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    Ok(content.strip_prefix('\u{feff}').unwrap_or(&content).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn strips_utf8_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("order.csv");
        fs::write(&path, b"\xef\xbb\xbfOrder Number:,ORD-7\n").unwrap();
        let content = read_file_as_utf8(&path).unwrap();
        assert!(content.starts_with("Order Number:"));
    }

    #[test]
    fn falls_back_to_windows_1252() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.csv");
        // "Crème" in Windows-1252: 0xE8 for è, invalid as UTF-8.
        fs::write(&path, b"ID,Nom\nP1,Cr\xe8me\n").unwrap();
        let content = read_file_as_utf8(&path).unwrap();
        assert!(content.contains("Crème"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_file_as_utf8(Path::new("/nonexistent/file.csv")).unwrap_err();
        assert!(err.contains("/nonexistent/file.csv"));
    }
}
