//! Filename to language-label classification.
//!
//! The classifier is a total function: every string input, including empty
//! strings and names without an extension, yields a deterministic label.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Extension to label mapping for the languages the viewer recognizes.
static LANGUAGE_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("js", "javascript"),
        ("jsx", "javascript"),
        ("ts", "typescript"),
        ("tsx", "typescript"),
        ("py", "python"),
        ("java", "java"),
        ("cpp", "cpp"),
        ("c", "c"),
        ("cs", "csharp"),
        ("php", "php"),
        ("rb", "ruby"),
        ("go", "go"),
        ("rs", "rust"),
        ("swift", "swift"),
        ("kt", "kotlin"),
        ("scala", "scala"),
        ("html", "html"),
        ("css", "css"),
        ("scss", "scss"),
        ("json", "json"),
        ("xml", "xml"),
        ("sql", "sql"),
        ("sh", "bash"),
        ("yaml", "yaml"),
        ("md", "markdown"),
        ("r", "r"),
        ("pl", "perl"),
        ("lua", "lua"),
        ("dart", "dart"),
    ])
});

/// Derive a language label from a filename.
///
/// The candidate is the segment after the last `.`; a name without a `.` is
/// treated as its own extension. Unrecognized candidates are echoed back
/// lower-cased rather than treated as an error, so `.txt` classifies as
/// `txt`.
pub fn classify(filename: &str) -> String {
    let candidate = filename
        .rsplit('.')
        .next()
        .unwrap_or(filename)
        .to_ascii_lowercase();
    match LANGUAGE_MAP.get(candidate.as_str()) {
        Some(label) => (*label).to_string(),
        None => candidate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map_to_labels() {
        assert_eq!(classify("app.js"), "javascript");
        assert_eq!(classify("component.tsx"), "typescript");
        assert_eq!(classify("script.py"), "python");
        assert_eq!(classify("main.rs"), "rust");
        assert_eq!(classify("build.sh"), "bash");
        assert_eq!(classify("notes.md"), "markdown");
        assert_eq!(classify("Program.cs"), "csharp");
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("FILE.PY"), "python");
        assert_eq!(classify("Widget.Kt"), "kotlin");
    }

    #[test]
    fn unknown_extension_echoes_lowercased() {
        assert_eq!(classify("data.xyz"), "xyz");
        assert_eq!(classify("archive.TXT"), "txt");
    }

    #[test]
    fn name_without_dot_uses_whole_name() {
        assert_eq!(classify("README"), "readme");
        assert_eq!(classify("Makefile"), "makefile");
    }

    #[test]
    fn last_segment_wins_for_multi_dot_names() {
        assert_eq!(classify("bundle.min.js"), "javascript");
        assert_eq!(classify("config.test.yaml"), "yaml");
    }

    #[test]
    fn empty_input_yields_empty_label() {
        assert_eq!(classify(""), "");
    }
}
