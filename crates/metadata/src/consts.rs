use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Leading " - " segment that is only a volume number: "T1", "12", "Tome 3".
regex!(VOLUME_SEGMENT_REGEX, r"(?i)^(?:T?\d+|Tome\s*\d+)$");
// Volume marker anywhere in a folder name.
regex!(VOLUME_MARKER_REGEX, r"(?i)\bT(?:ome)?\s*(\d+)\b");
// Volume marker anywhere in a title, with its leading separator.
regex!(INLINE_VOLUME_REGEX, r"(?i)[-\s]*\bT(?:ome)?\s*\d+\b");
// Rip-quality tags such as "[mp3 64kbps]".
regex!(BITRATE_TAG_REGEX, r"(?i)\s*\[\s*[a-z0-9]+\s+\d+\s*kbps\s*\]");
