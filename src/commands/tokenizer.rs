// src/commands/tokenizer.rs

/// Split a raw input line into words. A double-quoted run belongs to one
/// word and loses its quotes; `""` is an empty word. An unterminated quote
/// runs to the end of the line.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words() {
        assert_eq!(tokenize("  ls   -l  /tmp "), vec!["ls", "-l", "/tmp"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_quoted_run_is_one_token() {
        assert_eq!(tokenize("echo \"hello   world\" x"), vec!["echo", "hello   world", "x"]);
        assert_eq!(tokenize("a\"b c\"d"), vec!["ab cd"]);
    }

    #[test]
    fn test_empty_quotes() {
        assert_eq!(tokenize("touch \"\""), vec!["touch", ""]);
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(tokenize("echo \"open  end"), vec!["echo", "open  end"]);
    }
}
