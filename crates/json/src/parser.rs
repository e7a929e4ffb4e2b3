//! Recursive-descent parser: token stream in, [`Value`] tree out.

use indexmap::IndexMap;

use crate::error::ParseError;
use crate::scanner::{Scanner, Token};
use crate::value::Value;

/// Builds one [`Value`] from JSON text.
///
/// Recursion depth equals the JSON nesting depth, which is comfortably
/// within the default thread stack for the few hundred levels real
/// documents reach.
pub struct JsonParser<'a> {
    text: &'a str,
    scanner: Scanner<'a>,
}

impl<'a> JsonParser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            scanner: Scanner::new(text),
        }
    }

    /// Parses the outermost value and rejects trailing input.
    pub fn parse(mut self) -> Result<Value, ParseError> {
        let value = self.parse_value()?;
        if !self.scanner.at_end() {
            return Err(ParseError::TrailingContent {
                offset: self.scanner.pos(),
            });
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let token = self.scanner.next_token()?;
        self.parse_value_from(token)
    }

    fn parse_value_from(&mut self, token: Token) -> Result<Value, ParseError> {
        match token {
            Token::ObjectStart => self.parse_object(),
            Token::ArrayStart => self.parse_array(),
            Token::Str => self.parse_string().map(Value::Str),
            Token::Number => self.parse_number(),
            Token::True => Ok(Value::Bool(true)),
            Token::False => Ok(Value::Bool(false)),
            Token::Null => Ok(Value::Null),
            Token::ObjectEnd | Token::ArrayEnd | Token::Colon | Token::Comma => {
                Err(self.unexpected("a value"))
            }
        }
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        let mut map = IndexMap::new();
        match self.scanner.next_token()? {
            Token::ObjectEnd => return Ok(Value::Object(map)),
            Token::Str => self.parse_member(&mut map)?,
            _ => return Err(self.unexpected("an object key or `}`")),
        }
        loop {
            match self.scanner.next_token()? {
                Token::ObjectEnd => return Ok(Value::Object(map)),
                Token::Comma => match self.scanner.next_token()? {
                    Token::Str => self.parse_member(&mut map)?,
                    _ => return Err(self.unexpected("an object key")),
                },
                _ => return Err(self.unexpected("`,` or `}`")),
            }
        }
    }

    fn parse_member(&mut self, map: &mut IndexMap<String, Value>) -> Result<(), ParseError> {
        let key = self.parse_string()?;
        match self.scanner.next_token()? {
            Token::Colon => {}
            _ => return Err(self.unexpected("`:`")),
        }
        let value = self.parse_value()?;
        // Duplicate keys keep the later value.
        map.insert(key, value);
        Ok(())
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        let mut items = Vec::new();
        match self.scanner.next_token()? {
            Token::ArrayEnd => return Ok(Value::Array(items)),
            token => items.push(self.parse_value_from(token)?),
        }
        loop {
            match self.scanner.next_token()? {
                Token::ArrayEnd => return Ok(Value::Array(items)),
                Token::Comma => items.push(self.parse_value()?),
                _ => return Err(self.unexpected("`,` or `]`")),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let span = self.scanner.read_string_span()?;
        decode_string(self.text, span.start, span.end)
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let (span, is_float) = self.scanner.read_number_span()?;
        let offset = span.start;
        let literal = &self.text[span];
        if is_float {
            literal
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| ParseError::InvalidNumber { offset })
        } else {
            literal
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| ParseError::InvalidNumber { offset })
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            offset: self.scanner.token_start(),
        }
    }
}

/// Decodes the body of a string literal (between the quotes), resolving
/// escape sequences.
fn decode_string(text: &str, start: usize, end: usize) -> Result<String, ParseError> {
    let bytes = text.as_bytes();
    // Fast path: nothing to unescape.
    if !bytes[start..end].contains(&b'\\') {
        return Ok(text[start..end].to_string());
    }

    let mut out = String::with_capacity(end - start);
    let mut run = start;
    let mut i = start;
    while i < end {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        out.push_str(&text[run..i]);
        let esc_at = i;
        i += 1;
        if i >= end {
            return Err(ParseError::InvalidEscape { offset: esc_at });
        }
        match bytes[i] {
            b'"' => {
                out.push('"');
                i += 1;
            }
            b'\\' => {
                out.push('\\');
                i += 1;
            }
            b'/' => {
                out.push('/');
                i += 1;
            }
            b'b' => {
                out.push('\u{0008}');
                i += 1;
            }
            b'f' => {
                out.push('\u{000C}');
                i += 1;
            }
            b'n' => {
                out.push('\n');
                i += 1;
            }
            b'r' => {
                out.push('\r');
                i += 1;
            }
            b't' => {
                out.push('\t');
                i += 1;
            }
            b'u' => {
                i += 1;
                let unit = read_hex4(bytes, i, end, esc_at)?;
                i += 4;
                if (0xD800..0xDC00).contains(&unit) {
                    // High surrogate: the low half must follow immediately.
                    if i + 6 <= end && bytes[i] == b'\\' && bytes[i + 1] == b'u' {
                        let low = read_hex4(bytes, i + 2, end, esc_at)?;
                        if !(0xDC00..0xE000).contains(&low) {
                            return Err(ParseError::InvalidEscape { offset: esc_at });
                        }
                        let code = 0x10000
                            + ((u32::from(unit) - 0xD800) << 10)
                            + (u32::from(low) - 0xDC00);
                        let c = char::from_u32(code)
                            .ok_or(ParseError::InvalidEscape { offset: esc_at })?;
                        out.push(c);
                        i += 6;
                    } else {
                        return Err(ParseError::InvalidEscape { offset: esc_at });
                    }
                } else if (0xDC00..0xE000).contains(&unit) {
                    // Unpaired low surrogate.
                    return Err(ParseError::InvalidEscape { offset: esc_at });
                } else {
                    let c = char::from_u32(u32::from(unit))
                        .ok_or(ParseError::InvalidEscape { offset: esc_at })?;
                    out.push(c);
                }
            }
            _ => return Err(ParseError::InvalidEscape { offset: esc_at }),
        }
        run = i;
    }
    out.push_str(&text[run..end]);
    Ok(out)
}

fn read_hex4(bytes: &[u8], at: usize, end: usize, esc_at: usize) -> Result<u16, ParseError> {
    if at + 4 > end {
        return Err(ParseError::InvalidEscape { offset: esc_at });
    }
    let mut unit = 0u16;
    for &b in &bytes[at..at + 4] {
        let digit = (b as char)
            .to_digit(16)
            .ok_or(ParseError::InvalidEscape { offset: esc_at })?;
        unit = unit * 16 + digit as u16;
    }
    Ok(unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Value, ParseError> {
        JsonParser::new(text).parse()
    }

    #[test]
    fn escape_set() {
        let value = parse(r#""\" \\ \/ \b \f \n \r \t""#).unwrap();
        assert_eq!(
            value,
            Value::Str("\" \\ / \u{0008} \u{000C} \n \r \t".to_string())
        );
    }

    #[test]
    fn unicode_escape() {
        assert_eq!(
            parse(r#""\u0041""#).unwrap(),
            Value::Str("A".to_string())
        );
        assert_eq!(
            parse(r#""\u20ac""#).unwrap(),
            Value::Str("\u{20ac}".to_string())
        );
    }

    #[test]
    fn surrogate_pair_combines() {
        assert_eq!(
            parse(r#""\ud83d\ude00""#).unwrap(),
            Value::Str("\u{1f600}".to_string())
        );
    }

    #[test]
    fn unpaired_surrogate_is_invalid_escape() {
        assert_eq!(
            parse(r#""\ud83d""#),
            Err(ParseError::InvalidEscape { offset: 1 })
        );
        assert_eq!(
            parse(r#""\ude00""#),
            Err(ParseError::InvalidEscape { offset: 1 })
        );
    }

    #[test]
    fn unknown_escape_is_invalid_escape() {
        assert_eq!(
            parse(r#""ab\q""#),
            Err(ParseError::InvalidEscape { offset: 3 })
        );
    }

    #[test]
    fn short_hex_escape_is_invalid_escape() {
        assert_eq!(
            parse(r#""\u12""#),
            Err(ParseError::InvalidEscape { offset: 1 })
        );
    }

    #[test]
    fn integer_overflow_is_invalid_number() {
        assert_eq!(
            parse("9223372036854775808"),
            Err(ParseError::InvalidNumber { offset: 0 })
        );
        assert_eq!(
            parse("-9223372036854775808").unwrap(),
            Value::Integer(i64::MIN)
        );
    }

    #[test]
    fn nested_depth() {
        let depth = 300;
        let mut text = String::new();
        for _ in 0..depth {
            text.push('[');
        }
        text.push('1');
        for _ in 0..depth {
            text.push(']');
        }
        let mut value = parse(&text).unwrap();
        for _ in 0..depth {
            match value {
                Value::Array(mut items) => {
                    assert_eq!(items.len(), 1);
                    value = items.pop().unwrap();
                }
                other => panic!("expected array, got {other:?}"),
            }
        }
        assert_eq!(value, Value::Integer(1));
    }

    #[test]
    fn duplicate_keys_keep_later_value() {
        let value = parse(r#"{"a": 1, "a": 2}"#).unwrap();
        assert_eq!(value.get("a"), Some(&Value::Integer(2)));
        assert_eq!(value.as_object().map(IndexMap::len), Some(1));
    }

    #[test]
    fn missing_colon_is_unexpected_token() {
        assert_eq!(
            parse(r#"{"id" 5}"#),
            Err(ParseError::UnexpectedToken {
                expected: "`:`",
                offset: 6,
            })
        );
    }

    #[test]
    fn missing_value_reports_the_closing_brace() {
        assert_eq!(
            parse(r#"{"id": }"#),
            Err(ParseError::UnexpectedToken {
                expected: "a value",
                offset: 7,
            })
        );
    }

    #[test]
    fn unclosed_object_is_end_of_input() {
        assert_eq!(
            parse(r#"{"id": 5"#),
            Err(ParseError::UnexpectedEndOfInput { offset: 8 })
        );
    }

    #[test]
    fn trailing_content() {
        assert_eq!(
            parse("true false"),
            Err(ParseError::TrailingContent { offset: 5 })
        );
        assert_eq!(parse("{} x"), Err(ParseError::TrailingContent { offset: 3 }));
    }

    #[test]
    fn trailing_whitespace_is_fine() {
        assert_eq!(parse(" 1 \n"), Ok(Value::Integer(1)));
    }
}
