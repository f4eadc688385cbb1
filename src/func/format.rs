//! Decimal-format rendering
//!
//! Implements the subset of the decimal-format pattern language the styling
//! format exposes: `0`/`#` digit placeholders, `,` grouping, `.` decimal
//! point, literal prefix/suffix text, `%` scaling, and an optional negative
//! subpattern after `;`. The locale argument selects the output decimal and
//! grouping separators; the pattern itself always uses `.` and `,`.

use crate::error::EvalError;
use crate::value::Value;

const FUNCTION: &str = "numberFormat";

pub fn number_format(args: &[Value]) -> Result<Value, EvalError> {
    let pattern = args[0].as_str(FUNCTION)?;
    let value = args[1].as_number(FUNCTION)?;
    let locale = args[2].as_str(FUNCTION)?;
    let symbols = Symbols::for_locale(locale)?;
    let format = DecimalFormat::parse(pattern)?;
    Ok(Value::String(format.render(value, &symbols)))
}

struct Symbols {
    decimal: char,
    grouping: char,
}

impl Symbols {
    fn for_locale(locale: &str) -> Result<Self, EvalError> {
        let language = locale.split(|c| c == '-' || c == '_').next().unwrap_or("");
        match language {
            "" | "en" => Ok(Symbols {
                decimal: '.',
                grouping: ',',
            }),
            "de" | "es" | "it" | "nl" | "pt" => Ok(Symbols {
                decimal: ',',
                grouping: '.',
            }),
            "fr" => Ok(Symbols {
                decimal: ',',
                grouping: '\u{a0}',
            }),
            _ => Err(EvalError::FormatError {
                function: FUNCTION,
                reason: format!("unsupported locale '{}'", locale),
            }),
        }
    }
}

struct DecimalFormat {
    positive: Subpattern,
    negative: Option<Subpattern>,
}

impl DecimalFormat {
    fn parse(pattern: &str) -> Result<Self, EvalError> {
        match pattern.split_once(';') {
            None => Ok(DecimalFormat {
                positive: Subpattern::parse(pattern)?,
                negative: None,
            }),
            Some((positive, negative)) => Ok(DecimalFormat {
                positive: Subpattern::parse(positive)?,
                negative: Some(Subpattern::parse(negative)?),
            }),
        }
    }

    fn render(&self, value: f64, symbols: &Symbols) -> String {
        let negative = value < 0.0;
        let sub = if negative {
            self.negative.as_ref().unwrap_or(&self.positive)
        } else {
            &self.positive
        };

        let mut magnitude = value.abs();
        if sub.percent {
            magnitude *= 100.0;
        }

        // Standard float formatting rounds half-to-even on the true decimal
        // value of the double, which is what we want here.
        let formatted = format!("{:.*}", sub.max_fraction_digits, magnitude);
        let (int_part, frac_part) = match formatted.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (formatted.as_str(), ""),
        };

        let mut fraction = frac_part.to_string();
        while fraction.len() > sub.min_fraction_digits && fraction.ends_with('0') {
            fraction.pop();
        }

        let mut int_digits = int_part.to_string();
        while int_digits.len() < sub.min_integer_digits {
            int_digits.insert(0, '0');
        }
        if let Some(size) = sub.grouping {
            int_digits = group(&int_digits, size, symbols.grouping);
        }

        let mut out = String::new();
        // the default negative form is the positive one with a leading minus
        if negative && self.negative.is_none() {
            out.push('-');
        }
        out.push_str(&sub.prefix);
        out.push_str(&int_digits);
        if !fraction.is_empty() {
            out.push(symbols.decimal);
            out.push_str(&fraction);
        }
        out.push_str(&sub.suffix);
        out
    }
}

fn group(digits: &str, size: usize, separator: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / size);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % size == 0 {
            out.push(separator);
        }
        out.push(*c);
    }
    out
}

#[derive(PartialEq, Clone, Copy)]
enum Part {
    Prefix,
    Integer,
    Fraction,
    Suffix,
}

struct Subpattern {
    prefix: String,
    suffix: String,
    min_integer_digits: usize,
    min_fraction_digits: usize,
    max_fraction_digits: usize,
    grouping: Option<usize>,
    percent: bool,
}

impl Subpattern {
    fn parse(text: &str) -> Result<Self, EvalError> {
        let mut sub = Subpattern {
            prefix: String::new(),
            suffix: String::new(),
            min_integer_digits: 0,
            min_fraction_digits: 0,
            max_fraction_digits: 0,
            grouping: None,
            percent: false,
        };
        let mut part = Part::Prefix;
        let mut placeholders = 0;
        let mut digits_since_group = 0;
        let mut group_seen = false;
        let mut integer_zero_seen = false;
        let mut fraction_hash_seen = false;

        for c in text.chars() {
            match c {
                '0' | '#' => {
                    placeholders += 1;
                    match part {
                        Part::Prefix | Part::Integer => {
                            part = Part::Integer;
                            if c == '#' && integer_zero_seen {
                                return Err(bad(text, "'#' may not follow '0' before the decimal point"));
                            }
                            if c == '0' {
                                integer_zero_seen = true;
                                sub.min_integer_digits += 1;
                            }
                            digits_since_group += 1;
                        }
                        Part::Fraction => {
                            sub.max_fraction_digits += 1;
                            if c == '0' {
                                if fraction_hash_seen {
                                    return Err(bad(text, "'0' may not follow '#' after the decimal point"));
                                }
                                sub.min_fraction_digits += 1;
                            } else {
                                fraction_hash_seen = true;
                            }
                        }
                        Part::Suffix => {
                            return Err(bad(text, "digit placeholder after literal suffix"));
                        }
                    }
                }
                ',' => {
                    if part != Part::Integer {
                        return Err(bad(text, "grouping separator outside the integer part"));
                    }
                    group_seen = true;
                    digits_since_group = 0;
                }
                '.' => match part {
                    Part::Prefix | Part::Integer => part = Part::Fraction,
                    Part::Fraction | Part::Suffix => {
                        return Err(bad(text, "more than one decimal point"));
                    }
                },
                '%' => {
                    if sub.percent {
                        return Err(bad(text, "more than one percent sign"));
                    }
                    sub.percent = true;
                    // percent is literal output as well as a scale factor
                    match part {
                        Part::Prefix => sub.prefix.push('%'),
                        _ => {
                            part = Part::Suffix;
                            sub.suffix.push('%');
                        }
                    }
                }
                'E' | '\u{2030}' | '\'' | '\u{a4}' => {
                    return Err(bad(
                        text,
                        &format!("unsupported pattern character '{}'", c),
                    ));
                }
                other => match part {
                    Part::Prefix => sub.prefix.push(other),
                    Part::Suffix => sub.suffix.push(other),
                    Part::Integer | Part::Fraction => {
                        part = Part::Suffix;
                        sub.suffix.push(other);
                    }
                },
            }
        }

        if placeholders == 0 {
            return Err(bad(text, "no digit placeholders"));
        }
        if group_seen {
            if digits_since_group == 0 {
                return Err(bad(text, "grouping separator must be followed by digits"));
            }
            sub.grouping = Some(digits_since_group);
        }
        Ok(sub)
    }
}

fn bad(pattern: &str, reason: &str) -> EvalError {
    EvalError::FormatError {
        function: FUNCTION,
        reason: format!("pattern '{}': {}", pattern, reason),
    }
}
