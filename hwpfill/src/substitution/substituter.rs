//! `${key}` token scanning and replacement

use super::error::SubstitutionError;
use crate::placeholder::PlaceholderMap;
use regex::Regex;
use std::sync::LazyLock;

/// `${` + any run of non-`}` characters + `}`
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)\}").expect("placeholder pattern is valid"));

/// One replaced token, in character units of the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    /// Offset of the token
    pub start: usize,

    /// Length of the token
    pub removed: usize,

    /// Length of the inserted value
    pub inserted: usize,
}

impl Edit {
    /// Offset just past the token
    pub fn end(&self) -> usize {
        self.start + self.removed
    }
}

/// Result of substituting one text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Substitution {
    /// Text after substitution
    pub text: String,

    /// Replaced tokens, in increasing offset order
    pub edits: Vec<Edit>,

    /// Tokens whose value could not be rendered (left verbatim)
    pub errors: Vec<SubstitutionError>,

    /// Keys of tokens absent from the map (left verbatim)
    pub unresolved: Vec<String>,
}

impl Substitution {
    /// Check if at least one token was replaced
    pub fn changed(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Number of replaced tokens
    pub fn replacements(&self) -> usize {
        self.edits.len()
    }
}

/// Replace every `${key}` token whose key is in `values`
///
/// Scanning is a single left-to-right pass, so inserted values are never
/// scanned again. Tokens with unknown keys or unrenderable values are kept
/// literally.
pub fn substitute(text: &str, values: &PlaceholderMap) -> Substitution {
    let mut result = Substitution {
        text: String::with_capacity(text.len()),
        ..Default::default()
    };

    // Byte and char position just past the last token
    let mut last_byte = 0usize;
    let mut in_chars = 0usize;

    for captures in TOKEN.captures_iter(text) {
        let (Some(token), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        let gap = &text[last_byte..token.start()];
        let gap_chars = gap.chars().count();
        result.text.push_str(gap);
        in_chars += gap_chars;

        let token_chars = token.as_str().chars().count();
        let key = key.as_str();

        let rendered = match values.get(key) {
            Some(value) => match value.render() {
                Ok(rendered) => Some(rendered),
                Err(source) => {
                    result.errors.push(SubstitutionError {
                        key: key.to_string(),
                        source,
                    });
                    None
                }
            },
            None => {
                result.unresolved.push(key.to_string());
                None
            }
        };

        match rendered {
            Some(rendered) => {
                let inserted = rendered.chars().count();
                result.text.push_str(&rendered);
                result.edits.push(Edit {
                    start: in_chars,
                    removed: token_chars,
                    inserted,
                });
            }
            None => result.text.push_str(token.as_str()),
        }

        in_chars += token_chars;
        last_byte = token.end();
    }

    result.text.push_str(&text[last_byte..]);
    result
}

/// Keys of all `${key}` tokens in `text`, in order of appearance
pub fn placeholder_keys(text: &str) -> impl Iterator<Item = &str> {
    TOKEN
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|key| key.as_str())
}

/// Map an offset in the input text to the substituted text
///
/// Offsets before or at a token's start stay in front of it, offsets
/// inside a replaced token land right after the inserted value.
pub fn shift_offset(offset: usize, edits: &[Edit]) -> usize {
    let mut removed = 0usize;
    let mut inserted = 0usize;

    for edit in edits {
        if offset <= edit.start {
            break;
        }
        if offset < edit.end() {
            return edit.start - removed + inserted + edit.inserted;
        }
        removed += edit.removed;
        inserted += edit.inserted;
    }

    offset - removed + inserted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::PlaceholderValue;

    fn map(entries: &[(&str, &str)]) -> PlaceholderMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_simple_replacement() {
        let result = substitute("Hello ${name}!", &map(&[("name", "World")]));

        assert_eq!(result.text, "Hello World!");
        assert!(result.changed());
        assert_eq!(
            result.edits,
            vec![Edit {
                start: 6,
                removed: 7,
                inserted: 5
            }]
        );
    }

    #[test]
    fn test_missing_key_left_verbatim() {
        let result = substitute("${missing}", &PlaceholderMap::new());

        assert_eq!(result.text, "${missing}");
        assert!(!result.changed());
        assert_eq!(result.unresolved, vec!["missing".to_string()]);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let result = substitute("${Name} ${name}", &map(&[("name", "x")]));

        assert_eq!(result.text, "${Name} x");
        assert_eq!(result.unresolved, vec!["Name".to_string()]);
    }

    #[test]
    fn test_inserted_value_not_rescanned() {
        let values = map(&[("a", "${b}"), ("b", "nope")]);

        let result = substitute("[${a}]", &values);

        assert_eq!(result.text, "[${b}]");
        assert_eq!(result.replacements(), 1);
    }

    #[test]
    fn test_null_value_renders_empty() {
        let mut values = PlaceholderMap::new();
        values.insert("name", PlaceholderValue::Null);
        values.insert("date", "2024-01-15");

        let result = substitute("${name}/${date}", &values);

        assert_eq!(result.text, "/2024-01-15");
        assert_eq!(result.replacements(), 2);
    }

    #[test]
    fn test_unrenderable_value_reports_error() {
        let mut values = PlaceholderMap::new();
        values.insert("list", PlaceholderValue::List(vec![]));
        values.insert("ok", "fine");

        let result = substitute("${list} ${ok}", &values);

        assert_eq!(result.text, "${list} fine");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].key, "list");
        assert_eq!(result.replacements(), 1);
    }

    #[test]
    fn test_multibyte_offsets_are_chars() {
        let result = substitute("이름: ${name}", &map(&[("name", "홍길동")]));

        assert_eq!(result.text, "이름: 홍길동");
        assert_eq!(
            result.edits,
            vec![Edit {
                start: 4,
                removed: 7,
                inserted: 3
            }]
        );
    }

    #[test]
    fn test_unterminated_token_untouched() {
        let result = substitute("${name", &map(&[("name", "x")]));

        assert_eq!(result.text, "${name");
        assert!(!result.changed());
    }

    #[test]
    fn test_placeholder_keys() {
        let keys: Vec<&str> = placeholder_keys("${a} and ${b.c} and ${a} ${").collect();

        assert_eq!(keys, vec!["a", "b.c", "a"]);
    }

    #[test]
    fn test_shift_offset() {
        // "ab${k}cd" -> "abVALUEcd"
        let edits = [Edit {
            start: 2,
            removed: 4,
            inserted: 5,
        }];

        assert_eq!(shift_offset(0, &edits), 0);
        assert_eq!(shift_offset(2, &edits), 2);
        assert_eq!(shift_offset(4, &edits), 7);
        assert_eq!(shift_offset(6, &edits), 7);
        assert_eq!(shift_offset(8, &edits), 9);
    }

    #[test]
    fn test_shift_offset_multiple_edits() {
        // "${a}-${b}-" with a -> "" and b -> "xyz"
        let edits = [
            Edit {
                start: 0,
                removed: 4,
                inserted: 0,
            },
            Edit {
                start: 5,
                removed: 4,
                inserted: 3,
            },
        ];

        assert_eq!(shift_offset(4, &edits), 0);
        assert_eq!(shift_offset(5, &edits), 1);
        assert_eq!(shift_offset(9, &edits), 4);
        assert_eq!(shift_offset(10, &edits), 5);
    }
}
