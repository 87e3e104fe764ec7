//! The condition part of the query grammar.
//!
//! `/{field}/{is|in|matches|contains}/{value}`, `/closest/{lon}/{lat}`,
//! `/{radius}/maround/{lon}/{lat}`, in any number, optionally followed by
//! `/limit/{n}`.

use indexmap::IndexMap;
use serde::Serialize;

use super::segments;

/// A point given as longitude and latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

/// A radius search around a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Around {
    pub radius: f64,
    pub lon: f64,
    pub lat: f64,
}

/// The conditions of a query, keyed by operator name.
/// Empty operators are left out when serialized, and so is an absent limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conditions {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub is: IndexMap<String, String>,
    #[serde(rename = "in", skip_serializing_if = "IndexMap::is_empty")]
    pub in_: IndexMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub matches: IndexMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub contains: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closest: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maround: Option<Around>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// One condition, as handed to the condition compiler.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition<'a> {
    Is { field: &'a str, value: &'a str },
    In { field: &'a str, values: &'a [String] },
    Matches { field: &'a str, value: &'a str },
    Contains { field: &'a str, value: &'a str },
    Closest(Point),
    Maround(Around),
}

impl Conditions {
    /// Every filter and ordering condition. Spatial conditions come first, so
    /// their distance ordering takes precedence over the `contains` ordering.
    pub fn iter(&self) -> impl Iterator<Item = Condition<'_>> {
        let closest = self.closest.map(Condition::Closest);
        let maround = self.maround.map(Condition::Maround);
        let is = self
            .is
            .iter()
            .map(|(field, value)| Condition::Is { field, value });
        let in_ = self
            .in_
            .iter()
            .map(|(field, values)| Condition::In { field, values });
        let matches = self
            .matches
            .iter()
            .map(|(field, value)| Condition::Matches { field, value });
        let contains = self
            .contains
            .iter()
            .map(|(field, value)| Condition::Contains { field, value });

        closest
            .into_iter()
            .chain(maround)
            .chain(is)
            .chain(in_)
            .chain(matches)
            .chain(contains)
    }
}

/// A single-value operator keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Is,
    In,
    Matches,
    Contains,
}

impl Operator {
    fn from_keyword(keyword: &str) -> Option<Operator> {
        match keyword {
            "is" => Some(Operator::Is),
            "in" => Some(Operator::In),
            "matches" => Some(Operator::Matches),
            "contains" => Some(Operator::Contains),
            _ => None,
        }
    }
}

/// A condition token over raw (encoded) segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Field {
        field: &'a str,
        operator: Operator,
        value: &'a str,
    },
    Closest {
        lon: &'a str,
        lat: &'a str,
    },
    Maround {
        radius: &'a str,
        lon: &'a str,
        lat: &'a str,
    },
}

/// How the segments from one position onwards are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reading<'a> {
    End,
    Limit(&'a str),
    /// A token, and the position of the segments that follow it.
    Token(Token<'a>, usize),
}

/// The outcome of reading condition segments.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionsParse {
    /// The segments are not shaped like conditions; another grammar may apply.
    NoMatch,
    /// The segments are shaped like conditions but an operand is invalid.
    Invalid,
    Parsed(Conditions),
}

/// Read the segments that follow `/{database}/{table}`.
pub fn parse(segments: &[&str]) -> ConditionsParse {
    let Some((tokens, limit)) = tokenize(segments) else {
        return ConditionsParse::NoMatch;
    };
    match build(&tokens, limit) {
        Some(conditions) => ConditionsParse::Parsed(conditions),
        None => ConditionsParse::Invalid,
    }
}

/// Tokenize the segments into condition tokens and an optional raw limit.
/// Where several tokens fit at a position, the first one whose remaining
/// segments can be read completely wins.
///
/// Positions are resolved from the last segment backwards, each once, so the
/// work is linear in the number of segments.
fn tokenize<'a>(segments: &[&'a str]) -> Option<(Vec<Token<'a>>, Option<&'a str>)> {
    // readings[i] is the chosen reading of segments[i..], if one exists
    let mut readings: Vec<Option<Reading<'a>>> = vec![None; segments.len() + 1];
    readings[segments.len()] = Some(Reading::End);

    for start in (0..segments.len()).rev() {
        let reading = match &segments[start..] {
            ["limit", n] if segments::is_digits(n) => Some(Reading::Limit(*n)),
            rest => candidates(rest)
                .into_iter()
                .map(|(token, consumed)| (token, start + consumed))
                .find(|(_, next)| readings[*next].is_some())
                .map(|(token, next)| Reading::Token(token, next)),
        };
        readings[start] = reading;
    }

    let mut tokens = vec![];
    let mut position = 0;
    loop {
        match readings[position]? {
            Reading::End => return Some((tokens, None)),
            Reading::Limit(n) => return Some((tokens, Some(n))),
            Reading::Token(token, next) => {
                tokens.push(token);
                position = next;
            }
        }
    }
}

/// The tokens that fit at the start of the segments, in order of preference,
/// with the number of segments each consumes.
fn candidates<'a>(segments: &[&'a str]) -> Vec<(Token<'a>, usize)> {
    let mut candidates = vec![];
    if let [field, keyword, value, ..] = segments {
        if let Some(operator) = Operator::from_keyword(keyword) {
            candidates.push((
                Token::Field {
                    field: *field,
                    operator,
                    value: *value,
                },
                3,
            ));
        }
    }
    if let ["closest", lon, lat, ..] = segments {
        candidates.push((Token::Closest { lon: *lon, lat: *lat }, 3));
    }
    if let [radius, "maround", lon, lat, ..] = segments {
        candidates.push((
            Token::Maround {
                radius: *radius,
                lon: *lon,
                lat: *lat,
            },
            4,
        ));
    }
    candidates
}

fn decode_f64(segment: &str) -> Option<f64> {
    segments::decode(segment)?
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Decode and validate tokens. Any invalid operand fails the whole parse.
fn build(tokens: &[Token<'_>], limit: Option<&str>) -> Option<Conditions> {
    let mut conditions = Conditions {
        limit: match limit {
            None => None,
            Some(limit) => Some(segments::decode(limit)?.parse().ok()?),
        },
        ..Conditions::default()
    };

    for token in tokens {
        match *token {
            Token::Field {
                field,
                operator: Operator::In,
                value,
            } => {
                let values = value
                    .split(',')
                    .map(segments::decode)
                    .collect::<Option<Vec<String>>>()?;
                conditions.in_.insert(segments::decode(field)?, values);
            }
            Token::Field {
                field,
                operator,
                value,
            } => {
                let field = segments::decode(field)?;
                let value = segments::decode(value)?;
                let operands = match operator {
                    Operator::Is => &mut conditions.is,
                    Operator::Matches => &mut conditions.matches,
                    Operator::Contains => &mut conditions.contains,
                    Operator::In => unreachable!("handled above"),
                };
                operands.insert(field, value);
            }
            Token::Closest { lon, lat } => {
                if conditions.closest.is_some() {
                    return None;
                }
                conditions.closest = Some(Point {
                    lon: decode_f64(lon)?,
                    lat: decode_f64(lat)?,
                });
            }
            Token::Maround { radius, lon, lat } => {
                if conditions.maround.is_some() {
                    return None;
                }
                conditions.maround = Some(Around {
                    radius: decode_f64(radius)?,
                    lon: decode_f64(lon)?,
                    lat: decode_f64(lat)?,
                });
            }
        }
    }

    Some(conditions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(segments: &[&str]) -> Conditions {
        match parse(segments) {
            ConditionsParse::Parsed(conditions) => conditions,
            other => panic!("expected conditions, got {other:?}"),
        }
    }

    #[test]
    fn no_segments_is_no_conditions() {
        assert_eq!(parsed(&[]), Conditions::default());
    }

    #[test]
    fn in_values_are_split_before_decoding() {
        let conditions = parsed(&["name", "in", "a%2Cb,c"]);
        assert_eq!(
            conditions.in_.get("name"),
            Some(&vec!["a,b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn repeated_field_keeps_the_last_value() {
        let conditions = parsed(&["a", "is", "1", "a", "is", "2"]);
        assert_eq!(conditions.is.get("a").map(String::as_str), Some("2"));
    }

    #[test]
    fn closest_and_maround_parse_as_numbers() {
        let conditions = parsed(&["closest", "145.5", "-38.1", "500", "maround", "145", "-38"]);
        assert_eq!(
            conditions.closest,
            Some(Point {
                lon: 145.5,
                lat: -38.1
            })
        );
        assert_eq!(
            conditions.maround,
            Some(Around {
                radius: 500.0,
                lon: 145.0,
                lat: -38.0
            })
        );
    }

    #[test]
    fn backtracks_to_the_first_complete_reading() {
        // `closest/maround/1` leaves `2` over, so `closest` is read as a radius.
        assert_eq!(
            parse(&["closest", "maround", "1", "2"]),
            ConditionsParse::Invalid
        );
        let conditions = parsed(&["closest", "is", "x"]);
        assert_eq!(conditions.is.get("closest").map(String::as_str), Some("x"));
    }

    #[test]
    fn ambiguous_runs_are_read_in_linear_time() {
        // every `closest/is/x` reads both as a field condition and as
        // `closest`, and the trailing pair fits neither
        let mut segments = ["closest", "is", "x"].repeat(40);
        segments.extend(["bad", "bad"]);
        assert_eq!(parse(&segments), ConditionsParse::NoMatch);

        segments.truncate(120);
        assert_eq!(
            parsed(&segments).is.get("closest").map(String::as_str),
            Some("x")
        );
    }

    #[test]
    fn limit_must_be_last() {
        assert_eq!(parse(&["limit", "3", "a", "is", "1"]), ConditionsParse::NoMatch);
        assert_eq!(parsed(&["limit", "is", "1", "limit", "4"]).limit, Some(4));
    }

    #[test]
    fn unshaped_segments_do_not_match() {
        assert_eq!(parse(&["7"]), ConditionsParse::NoMatch);
        assert_eq!(parse(&["a", "like", "b"]), ConditionsParse::NoMatch);
        assert_eq!(parse(&["limit", "-1"]), ConditionsParse::NoMatch);
    }

    #[test]
    fn invalid_operands_fail_the_whole_parse() {
        assert_eq!(
            parse(&["a", "is", "1", "closest", "east", "-38"]),
            ConditionsParse::Invalid
        );
        assert_eq!(
            parse(&["closest", "1", "2", "closest", "3", "4"]),
            ConditionsParse::Invalid
        );
        assert_eq!(parse(&["a", "is", "%FF"]), ConditionsParse::Invalid);
        assert_eq!(
            parse(&["limit", "99999999999999999999"]),
            ConditionsParse::Invalid
        );
    }
}
