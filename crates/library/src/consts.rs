use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Anything that is not a word character, hyphen, period, parenthesis or space.
regex!(DISALLOWED_CHARS_REGEX, r"[^\w\-.() ]+");
