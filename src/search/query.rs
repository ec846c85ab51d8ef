use serde_json::Value;

/// A single search dimension after the request payload has been interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint<T> {
    /// Field was not supplied; every record passes.
    Any,
    Value(T),
    /// Field was supplied but could not be parsed; no record passes.
    Never,
}

impl<T> Constraint<T> {
    pub fn check(&self, pred: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Constraint::Any => true,
            Constraint::Value(v) => pred(v),
            Constraint::Never => false,
        }
    }
}

impl<T> Default for Constraint<T> {
    fn default() -> Self {
        Constraint::Any
    }
}

/// Typed form of the `/api/search` request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Trimmed and lower-cased.
    pub name: Constraint<String>,
    pub genre: Constraint<String>,
    pub year: Constraint<i64>,
    /// Minimum average rating.
    pub min_rating: Constraint<f64>,
}

impl SearchQuery {
    /// Interpret a JSON request body. Anything that is not an object carries
    /// no constraints.
    pub fn from_value(body: &Value) -> Result<Self, SearchError> {
        let Some(obj) = body.as_object() else {
            return Ok(Self::default());
        };

        Ok(Self {
            name: parse_name(obj.get("name"))?,
            genre: parse_genre(obj.get("genre"))?,
            year: parse_year(obj.get("year")),
            min_rating: parse_rating(obj.get("average_rating")),
        })
    }
}

/// `null`, `false` and `""` mean the caller left the field out.
fn is_absent(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

fn parse_name(v: Option<&Value>) -> Result<Constraint<String>, SearchError> {
    if is_absent(v) {
        return Ok(Constraint::Any);
    }
    match v {
        Some(Value::String(s)) => {
            let name = s.trim().to_lowercase();
            if name.is_empty() {
                Ok(Constraint::Any)
            } else {
                Ok(Constraint::Value(name))
            }
        }
        Some(other) => Err(SearchError::InvalidField {
            field: "name",
            reason: format!("expected a string, got {}", other),
        }),
        None => Ok(Constraint::Any),
    }
}

fn parse_genre(v: Option<&Value>) -> Result<Constraint<String>, SearchError> {
    if is_absent(v) {
        return Ok(Constraint::Any);
    }
    match v {
        Some(Value::String(s)) => Ok(Constraint::Value(s.clone())),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(Constraint::Value(v.to_string())),
        Some(other) => Err(SearchError::InvalidField {
            field: "genre",
            reason: format!("expected a string, got {}", other),
        }),
        None => Ok(Constraint::Any),
    }
}

fn parse_year(v: Option<&Value>) -> Constraint<i64> {
    if is_absent(v) {
        return Constraint::Any;
    }
    let year = match v {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => parse_leading_int(s),
        _ => None,
    };
    year.map_or(Constraint::Never, Constraint::Value)
}

fn parse_rating(v: Option<&Value>) -> Constraint<f64> {
    if is_absent(v) {
        return Constraint::Any;
    }
    let rating = match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_leading_float(s),
        _ => None,
    };
    rating.map_or(Constraint::Never, Constraint::Value)
}

/// Parse the integer at the start of `s`, ignoring whatever follows it:
/// `"2021"`, `" 2021 "` and `"2021abc"` all give 2021, `"20.5"` gives 20.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Parse the decimal number at the start of `s`, ignoring whatever follows.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(s.starts_with(['+', '-']));

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // exponent only counts if at least one digit follows it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Invalid search field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}
