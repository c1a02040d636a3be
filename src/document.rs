/// A parsed text document: its normalized words and the ids of the documents it links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub words: Vec<String>,
    pub links: Vec<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, words: Vec<String>, links: Vec<String>) -> Self {
        Document {
            id: id.into(),
            words,
            links,
        }
    }

    /// Splits `text` on whitespace. Tokens of the form `[[name]]` become links to the
    /// document `name`, every other token is lowercased and stripped of non-word characters.
    pub fn parse(id: impl Into<String>, text: &str) -> Self {
        let mut words = Vec::new();
        let mut links = Vec::new();

        for token in text.split_whitespace() {
            if let Some(target) = parse_link(token) {
                links.push(target.to_string());
                continue;
            }

            let word = normalize(token);
            if !word.is_empty() {
                words.push(word);
            }
        }

        Document::new(id, words, links)
    }
}

/// Recognises `[[name]]`, also when wrapped in punctuation such as `([[name]]),`.
fn parse_link(token: &str) -> Option<&str> {
    token
        .trim_start_matches(|c: char| c.is_ascii_punctuation() && c != '[')
        .trim_end_matches(|c: char| c.is_ascii_punctuation() && c != ']')
        .strip_prefix("[[")
        .and_then(|t| t.strip_suffix("]]"))
        .filter(|target| !target.is_empty())
}

/// Lowercases `token` and drops everything that isn't alphanumeric or `_`.
fn normalize(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let doc = Document::parse("a.txt", "Hello, World!  see [[b.txt]] -- and [[c.txt]]\nhello");

        assert_eq!(doc.id, "a.txt");
        assert_eq!(doc.words, vec!["hello", "world", "see", "and", "hello"]);
        assert_eq!(doc.links, vec!["b.txt", "c.txt"]);
    }

    #[test]
    fn test_normalize() {
        let cases: Vec<(&str, &str)> = vec![
            ("Rust's", "rusts"),
            ("snake_case", "snake_case"),
            ("...", ""),
            ("ÜBER", "über"),
            ("[[]]", ""),
        ];

        for (token, expected) in cases {
            assert_eq!(normalize(token), expected, "normalizing {:?}", token);
        }
    }

    #[test]
    fn test_link_with_punctuation() {
        let doc = Document::parse("x", "see [[b.txt]], and ([[c.txt]]). [[d.txt]]x");
        assert_eq!(doc.links, vec!["b.txt", "c.txt"]);
        assert_eq!(doc.words, vec!["see", "and", "dtxtx"]);
    }

    #[test]
    fn test_empty_link_is_not_a_link() {
        let doc = Document::parse("x", "[[]] [[y]]");
        assert_eq!(doc.links, vec!["y"]);
        assert!(doc.words.is_empty());
    }
}
