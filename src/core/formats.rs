use std::path::Path;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

pub fn is_supported(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|value| value.to_str()) else {
        return false;
    };

    SUPPORTED_EXTENSIONS
        .iter()
        .any(|supported| ext.eq_ignore_ascii_case(supported))
}
