use dropzone_entities::File;

use crate::{config::UploadConfig, error::Rejection};

/// Decide whether a candidate file may enter the upload area.
///
/// Pure and deterministic: checks the size limit first, then the allowed
/// content-type patterns. An empty pattern list accepts every type.
pub fn validate(file: &File, config: &UploadConfig) -> Result<(), Rejection> {
    if let Some(limit) = config.max_file_size {
        if file.size() > limit {
            return Err(Rejection::SizeExceeded {
                name: file.name.clone(),
                limit,
            });
        }
    }

    if !config.allowed_file_types.is_empty()
        && !config
            .allowed_file_types
            .iter()
            .any(|pattern| pattern_matches(pattern, &file.content_type))
    {
        return Err(Rejection::TypeNotAllowed {
            name: file.name.clone(),
            content_type: file.content_type.clone(),
        });
    }

    Ok(())
}

/// A pattern matches verbatim, or by category prefix when it has the
/// wildcard form `"<category>/*"`.
fn pattern_matches(pattern: &str, content_type: &str) -> bool {
    match pattern.strip_suffix("/*") {
        Some(category) => content_type.split('/').next() == Some(category),
        None => pattern == content_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_of(name: &str, content_type: &str, size: u64) -> File {
        File::in_memory(name, content_type, vec![0u8; size as usize])
    }

    fn config_with(
        max_file_size: Option<u64>,
        allowed: &[&str],
    ) -> UploadConfig {
        UploadConfig {
            max_file_size,
            allowed_file_types: allowed
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ..UploadConfig::default()
        }
    }

    #[test]
    fn accepts_file_at_the_size_limit() {
        let config = config_with(Some(1024), &[]);
        let file = file_of("a.bin", "application/octet-stream", 1024);

        assert!(validate(&file, &config).is_ok());
    }

    #[test]
    fn rejects_file_over_the_size_limit() {
        let config = config_with(Some(1024), &[]);
        let file = file_of("a.bin", "application/octet-stream", 1025);

        assert_eq!(
            validate(&file, &config),
            Err(Rejection::SizeExceeded {
                name: "a.bin".to_string(),
                limit: 1024,
            })
        );
    }

    #[test]
    fn no_limit_means_unlimited() {
        let config = config_with(None, &[]);
        let file = file_of("big.bin", "application/octet-stream", 1 << 20);

        assert!(validate(&file, &config).is_ok());
    }

    #[test]
    fn accepts_verbatim_type_match() {
        let config = config_with(None, &["application/pdf"]);
        let file = file_of("doc.pdf", "application/pdf", 10);

        assert!(validate(&file, &config).is_ok());
    }

    #[test]
    fn accepts_wildcard_category_match() {
        let config = config_with(None, &["image/*"]);
        let file = file_of("photo.png", "image/png", 10);

        assert!(validate(&file, &config).is_ok());
    }

    #[test]
    fn rejects_type_matching_no_pattern() {
        let config = config_with(None, &["image/*", "application/pdf"]);
        let file = file_of("notes.txt", "text/plain", 10);

        assert_eq!(
            validate(&file, &config),
            Err(Rejection::TypeNotAllowed {
                name: "notes.txt".to_string(),
                content_type: "text/plain".to_string(),
            })
        );
    }

    #[test]
    fn wildcard_does_not_match_other_categories() {
        let config = config_with(None, &["image/*"]);
        let file = file_of("clip.mp4", "video/mp4", 10);

        assert!(validate(&file, &config).is_err());
    }

    #[test]
    fn empty_pattern_list_accepts_any_type() {
        let config = config_with(None, &[]);
        let file = file_of("anything.xyz", "chemical/x-pdb", 10);

        assert!(validate(&file, &config).is_ok());
    }

    #[test]
    fn size_is_checked_before_type() {
        let config = config_with(Some(4), &["image/*"]);
        let file = file_of("notes.txt", "text/plain", 10);

        assert!(matches!(
            validate(&file, &config),
            Err(Rejection::SizeExceeded { .. })
        ));
    }
}
