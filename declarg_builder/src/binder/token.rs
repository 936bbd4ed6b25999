use crate::constant::END_OF_OPTIONS;

/// The syntactic shape of a single command line token.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// `--name` or `--name=value`.
    Long {
        name: &'a str,
        value: Option<&'a str>,
    },
    /// `-x` or `-x=value`.
    Short {
        alias: &'a str,
        value: Option<&'a str>,
    },
    /// `-abc`; a `value` here is malformed (ex: `-abc=x`).
    Group {
        aliases: &'a str,
        value: Option<&'a str>,
    },
    /// A bare `--`.
    EndOfOptions,
    Positional(&'a str),
}

fn split_equals_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((n, v)) => (n, Some(v)),
        None => (token, None),
    }
}

pub(crate) fn classify(token: &str) -> Token<'_> {
    if token == END_OF_OPTIONS {
        return Token::EndOfOptions;
    }

    if let Some(long) = token.strip_prefix("--") {
        let (name, value) = split_equals_delimiter(long.trim_start_matches('-'));

        if name.is_empty() {
            return Token::Positional(token);
        }

        return Token::Long { name, value };
    }

    match token.strip_prefix('-') {
        // A lone dash conventionally names stdin/stdout.
        None | Some("") => Token::Positional(token),
        Some(short) => {
            let (name, value) = split_equals_delimiter(short);

            if name.is_empty() {
                Token::Positional(token)
            } else if name.chars().count() == 1 {
                Token::Short { alias: name, value }
            } else {
                Token::Group {
                    aliases: name,
                    value,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("--", Token::EndOfOptions)]
    #[case("-", Token::Positional("-"))]
    #[case("abc", Token::Positional("abc"))]
    #[case("", Token::Positional(""))]
    #[case("a-b", Token::Positional("a-b"))]
    #[case("--level", Token::Long { name: "level", value: None })]
    #[case("--level=high", Token::Long { name: "level", value: Some("high") })]
    #[case("--level=", Token::Long { name: "level", value: Some("") })]
    #[case("--a=b=c", Token::Long { name: "a", value: Some("b=c") })]
    #[case("---x", Token::Long { name: "x", value: None })]
    #[case("---verbose=1", Token::Long { name: "verbose", value: Some("1") })]
    #[case("---", Token::Positional("---"))]
    #[case("--=x", Token::Positional("--=x"))]
    #[case("-l", Token::Short { alias: "l", value: None })]
    #[case("-l=5", Token::Short { alias: "l", value: Some("5") })]
    #[case("-é", Token::Short { alias: "é", value: None })]
    #[case("-hv", Token::Group { aliases: "hv", value: None })]
    #[case("-hv=x", Token::Group { aliases: "hv", value: Some("x") })]
    #[case("-=x", Token::Positional("-=x"))]
    fn classify_token(#[case] token: &str, #[case] expected: Token) {
        assert_eq!(classify(token), expected);
    }
}
