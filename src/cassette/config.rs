//! Loading cassettes from disk.

use std::path::Path;

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Load a cassette file and create a replayer.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
    let cassette: Cassette = serde_yaml::from_str(&content)
        .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
    Ok(CassetteReplayer::new(&cassette))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_hand_written_cassette() {
        let dir = std::env::temp_dir().join("product_studio_cassette_load_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.cassette.yaml");
        std::fs::write(
            &path,
            "name: hand-written\n\
             recorded_at: \"2026-10-01T00:00:00Z\"\n\
             commit: test\n\
             interactions:\n  \
               - seq: 0\n    \
                 port: content_generator\n    \
                 method: generate_content\n    \
                 input: {}\n    \
                 output:\n      \
                   Ok:\n        \
                     candidates: []\n",
        )
        .unwrap();

        let mut replayer = load_cassette(&path).unwrap();
        let i = replayer.next_interaction("content_generator", "generate_content").unwrap();
        assert_eq!(i.seq, 0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_nonexistent_fails() {
        assert!(load_cassette(Path::new("/nonexistent/cassette.yaml")).is_err());
    }
}
