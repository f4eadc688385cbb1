//! String functions
//!
//! All positions and lengths are in Unicode code points, not bytes. The
//! pattern arguments of `strReplace` and `strMatches` are regular
//! expressions; a pattern that does not compile is a format error.

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::EvalError;
use crate::value::Value;

/// Capitalize every whitespace-separated word, lowercasing the rest, e.g.
/// "HoW aRe YOU?" becomes "How Are You?".
pub fn str_capitalize(args: &[Value]) -> Result<Value, EvalError> {
    let string = args[0].as_str("strCapitalize")?;
    let mut out = String::with_capacity(string.len());
    let mut at_word_start = true;
    for c in string.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    Ok(Value::String(out))
}

/// Remove diacritics without altering case: decompose, then drop the
/// combining marks.
pub fn str_strip_accents(args: &[Value]) -> Result<Value, EvalError> {
    let string = args[0].as_str("strStripAccents")?;
    Ok(Value::String(
        string.nfd().filter(|c| !is_combining_mark(*c)).collect(),
    ))
}

pub fn str_concat(args: &[Value]) -> Result<Value, EvalError> {
    let mut out = String::new();
    for arg in args {
        out.push_str(arg.as_str("strConcat")?);
    }
    Ok(Value::String(out))
}

/// The second argument when the first is empty or whitespace-only.
pub fn str_default_if_blank(args: &[Value]) -> Result<Value, EvalError> {
    let string = args[0].as_str("strDefaultIfBlank")?;
    let default = args[1].as_str("strDefaultIfBlank")?;
    let out = if string.trim().is_empty() {
        default
    } else {
        string
    };
    Ok(Value::String(out.into()))
}

pub fn str_equals_ignore_case(args: &[Value]) -> Result<Value, EvalError> {
    let first = args[0].as_str("strEqualsIgnoreCase")?;
    let second = args[1].as_str("strEqualsIgnoreCase")?;
    Ok(Value::Boolean(first.to_lowercase() == second.to_lowercase()))
}

/// 0-based code-point index of the first occurrence, or -1.
pub fn str_index_of(args: &[Value]) -> Result<Value, EvalError> {
    let string = args[0].as_str("strIndexOf")?;
    let substring = args[1].as_str("strIndexOf")?;
    Ok(Value::Number(index_to_number(string, string.find(substring))))
}

/// 0-based code-point index of the last occurrence, or -1.
pub fn str_last_index_of(args: &[Value]) -> Result<Value, EvalError> {
    let string = args[0].as_str("strLastIndexOf")?;
    let substring = args[1].as_str("strLastIndexOf")?;
    Ok(Value::Number(index_to_number(
        string,
        string.rfind(substring),
    )))
}

fn index_to_number(string: &str, byte_index: Option<usize>) -> f64 {
    match byte_index {
        // Count code points up to the byte offset of the match.
        Some(byte) => string[..byte].chars().count() as f64,
        None => -1.0,
    }
}

/// Full-string regular expression match.
pub fn str_matches(args: &[Value]) -> Result<Value, EvalError> {
    let string = args[0].as_str("strMatches")?;
    let pattern = args[1].as_str("strMatches")?;
    let re = compile("strMatches", &format!("^(?:{})$", pattern))?;
    Ok(Value::Boolean(re.is_match(string)))
}

/// Replace the first regex match, or all of them when `global` is set.
pub fn str_replace(args: &[Value]) -> Result<Value, EvalError> {
    let string = args[0].as_str("strReplace")?;
    let pattern = args[1].as_str("strReplace")?;
    let replacement = args[2].as_str("strReplace")?;
    let global = args[3].as_boolean("strReplace")?;
    let re = compile("strReplace", pattern)?;
    let out = if global {
        re.replace_all(string, replacement)
    } else {
        re.replace(string, replacement)
    };
    Ok(Value::String(out.into_owned()))
}

fn compile(function: &'static str, pattern: &str) -> Result<Regex, EvalError> {
    Regex::new(pattern).map_err(|err| EvalError::FormatError {
        function,
        reason: err.to_string(),
    })
}

/// The code points in `[begin, end)`; both bounds must sit inside the string
/// and in order.
pub fn str_substring(args: &[Value]) -> Result<Value, EvalError> {
    let string = args[0].as_str("strSubstring")?;
    let begin = index_arg("strSubstring", &args[1])?;
    let end = index_arg("strSubstring", &args[2])?;
    slice("strSubstring", string, begin, end)
}

/// The code points from `begin` through the end of the string.
pub fn str_substring_start(args: &[Value]) -> Result<Value, EvalError> {
    let string = args[0].as_str("strSubstringStart")?;
    let begin = index_arg("strSubstringStart", &args[1])?;
    let end = string.chars().count() as i64;
    slice("strSubstringStart", string, begin, end)
}

// Index arguments arrive as doubles; fractional parts truncate.
fn index_arg(function: &'static str, value: &Value) -> Result<i64, EvalError> {
    Ok(value.as_number(function)?.trunc() as i64)
}

fn slice(function: &'static str, string: &str, begin: i64, end: i64) -> Result<Value, EvalError> {
    let len = string.chars().count() as i64;
    if begin < 0 || end > len || begin > end {
        return Err(EvalError::IndexOutOfRange {
            function,
            reason: format!("begin {}, end {}, length {}", begin, end, len),
        });
    }
    // Iterate rather than indexing; the bounds are checked but byte offsets
    // of code points are not.
    Ok(Value::String(
        string
            .chars()
            .skip(begin as usize)
            .take((end - begin) as usize)
            .collect(),
    ))
}

pub fn str_abbreviate(args: &[Value]) -> Result<Value, EvalError> {
    let string = args[0].as_str("strAbbreviate")?;
    let lower = index_arg("strAbbreviate", &args[1])?;
    let upper = index_arg("strAbbreviate", &args[2])?;
    let append = args[3].as_str("strAbbreviate")?;
    Ok(Value::String(abbreviate(string, lower, upper, append)))
}

/// Word-aware abbreviation: cut at the first space at or past `lower`, or
/// hard at `upper` when no space intervenes; `append` is added whenever the
/// string was shortened. An `upper` of -1 means no hard limit, and an
/// `upper` below `lower` is raised to `lower`.
fn abbreviate(string: &str, lower: i64, upper: i64, append: &str) -> String {
    let chars: Vec<char> = string.chars().collect();
    let len = chars.len() as i64;
    if len == 0 {
        return String::new();
    }
    let lower = lower.max(0).min(len);
    let upper = if upper == -1 || upper > len { len } else { upper };
    let upper = upper.max(lower);
    let space = chars
        .iter()
        .enumerate()
        .skip(lower as usize)
        .find(|(_, c)| **c == ' ')
        .map(|(i, _)| i as i64);
    let cut = match space {
        Some(index) if index <= upper => index,
        _ => upper,
    };
    let mut out: String = chars[..cut as usize].iter().collect();
    if cut != len {
        out.push_str(append);
    }
    out
}

#[cfg(test)]
mod test_strings {
    use super::*;

    fn s(string: &str) -> Value {
        Value::String(string.into())
    }

    fn n(num: f64) -> Value {
        Value::Number(num)
    }

    #[test]
    fn test_capitalize_fully_rewrites_case() {
        vec![
            ("HoW aRe YOU?", "How Are You?"),
            ("hello world", "Hello World"),
            ("", ""),
            ("  spaced  out  ", "  Spaced  Out  "),
        ]
        .into_iter()
        .for_each(|(input, exp)| {
            assert_eq!(str_capitalize(&[s(input)]).unwrap(), s(exp));
        })
    }

    #[test]
    fn test_strip_accents_preserves_case() {
        vec![("café", "cafe"), ("ÀÉÎÕÜ", "AEIOU"), ("plain", "plain")]
            .into_iter()
            .for_each(|(input, exp)| {
                assert_eq!(str_strip_accents(&[s(input)]).unwrap(), s(exp));
            })
    }

    #[test]
    fn test_index_of_counts_code_points() {
        // "é" is two bytes but one code point
        assert_eq!(str_index_of(&[s("éab"), s("ab")]).unwrap(), n(1.0));
        assert_eq!(str_index_of(&[s("hello"), s("zz")]).unwrap(), n(-1.0));
        assert_eq!(str_last_index_of(&[s("ababa"), s("ab")]).unwrap(), n(2.0));
        assert_eq!(str_last_index_of(&[s("ababa"), s("zz")]).unwrap(), n(-1.0));
    }

    #[test]
    fn test_substring_bounds() {
        assert_eq!(
            str_substring(&[s("hello"), n(1.0), n(3.0)]).unwrap(),
            s("el")
        );
        assert_eq!(
            str_substring(&[s("hello"), n(0.0), n(5.0)]).unwrap(),
            s("hello")
        );
        // begin > end
        str_substring(&[s("hello"), n(3.0), n(1.0)]).unwrap_err();
        // end past the string
        str_substring(&[s("hello"), n(0.0), n(6.0)]).unwrap_err();
        // negative begin
        str_substring(&[s("hello"), n(-1.0), n(3.0)]).unwrap_err();
    }

    #[test]
    fn test_substring_start_runs_to_the_end() {
        assert_eq!(str_substring_start(&[s("hello"), n(2.0)]).unwrap(), s("llo"));
        assert_eq!(str_substring_start(&[s("hello"), n(5.0)]).unwrap(), s(""));
        str_substring_start(&[s("hello"), n(6.0)]).unwrap_err();
    }

    #[test]
    fn test_replace_first_and_global() {
        let args = |global| {
            vec![
                s("a1b2c3"),
                s(r"\d"),
                s("-"),
                Value::Boolean(global),
            ]
        };
        assert_eq!(str_replace(&args(false)).unwrap(), s("a-b2c3"));
        assert_eq!(str_replace(&args(true)).unwrap(), s("a-b-c-"));
    }

    #[test]
    fn test_replace_with_bad_pattern_is_a_format_error() {
        let result = str_replace(&[s("x"), s("("), s("-"), Value::Boolean(true)]);
        match result.unwrap_err() {
            EvalError::FormatError { function, .. } => assert_eq!(function, "strReplace"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_matches_is_full_string() {
        vec![
            ("hello", "h.*o", true),
            ("hello", "ell", false),
            ("hello", ".*ell.*", true),
            ("", ".*", true),
        ]
        .into_iter()
        .for_each(|(string, pattern, exp)| {
            println!("strMatches({:?}, {:?})", string, pattern);
            assert_eq!(
                str_matches(&[s(string), s(pattern)]).unwrap(),
                Value::Boolean(exp)
            );
        })
    }

    #[test]
    fn test_abbreviate_cuts_at_a_word_break() {
        vec![
            // space at index 10, past lower
            ("0123456789 0123456789", 5, 15, "...", "0123456789..."),
            // no space at all: hard cut at upper
            ("01234567890123456789", 5, 15, "...", "012345678901234..."),
            // first space past upper: hard cut at upper
            ("0123456789 012", 2, 6, "..", "012345.."),
            // short enough already: untouched, nothing appended
            ("short", 10, 20, "...", "short"),
            ("", 1, 2, "...", ""),
        ]
        .into_iter()
        .for_each(|(input, lower, upper, append, exp)| {
            println!("strAbbreviate({:?}, {}, {})", input, lower, upper);
            assert_eq!(
                str_abbreviate(&[s(input), n(lower as f64), n(upper as f64), s(append)]).unwrap(),
                s(exp)
            );
        })
    }

    #[test]
    fn test_abbreviate_unbounded_upper() {
        // upper of -1 never hard-cuts; the first space past lower wins
        assert_eq!(
            str_abbreviate(&[s("aa bb cc"), n(4.0), n(-1.0), s("…")]).unwrap(),
            s("aa bb…")
        );
    }

    #[test]
    fn test_default_if_blank() {
        vec![
            ("", "fallback", "fallback"),
            ("   ", "fallback", "fallback"),
            ("value", "fallback", "value"),
        ]
        .into_iter()
        .for_each(|(string, default, exp)| {
            assert_eq!(
                str_default_if_blank(&[s(string), s(default)]).unwrap(),
                s(exp)
            );
        })
    }

    #[test]
    fn test_equals_ignore_case() {
        assert_eq!(
            str_equals_ignore_case(&[s("Berlin"), s("bERLIN")]).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            str_equals_ignore_case(&[s("a"), s("b")]).unwrap(),
            Value::Boolean(false)
        );
    }

    #[test]
    fn test_concat() {
        assert_eq!(
            str_concat(&[s("a"), s("b"), s("c")]).unwrap(),
            s("abc")
        );
        assert_eq!(str_concat(&[s("solo")]).unwrap(), s("solo"));
        str_concat(&[s("a"), n(1.0)]).unwrap_err();
    }
}
