use std::{fmt, str::FromStr};

use crate::foundation::error::{HeroError, HeroResult};

/// A statistic label split into its animatable number and fixed affixes,
/// e.g. `"58%"` or `"$1,250.5k"`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Counter {
    pub prefix: String,
    pub value: f64,
    pub decimals: usize,
    pub suffix: String,
    /// Thousands separators were present in the source text.
    pub grouped: bool,
}

impl Counter {
    /// Render `current` with the parsed precision and affixes.
    pub fn format(&self, current: f64) -> String {
        let current = if current.is_finite() { current } else { 0.0 };
        let mut digits = format!("{:.*}", self.decimals, current.abs());
        if self.grouped {
            digits = group_thousands(&digits);
        }
        let sign = if current < 0.0 && digits.chars().any(|c| c.is_ascii_digit() && c != '0') {
            "-"
        } else {
            ""
        };
        format!("{}{sign}{digits}{}", self.prefix, self.suffix)
    }
}

impl FromStr for Counter {
    type Err = HeroError;

    fn from_str(s: &str) -> HeroResult<Self> {
        let start = s
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit())
            .map(|(i, _)| i)
            .ok_or_else(|| HeroError::validation(format!("counter '{s}' has no number")))?;
        // a sign or leading dot directly before the first digit belongs to the number
        let mut start = start;
        for c in s[..start].chars().rev() {
            if c == '.' || c == '-' {
                start -= c.len_utf8();
            } else {
                break;
            }
        }

        let rest = &s[start..];
        let len = rest
            .char_indices()
            .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || *c == ',' || (*i == 0 && *c == '-')))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let number = rest[..len].trim_end_matches([',', '.']);
        let suffix = &s[start + number.len()..];

        let grouped = number.contains(',');
        let plain: String = number.chars().filter(|c| *c != ',').collect();
        let value: f64 = plain
            .parse()
            .map_err(|_| HeroError::validation(format!("counter '{s}' has a malformed number")))?;
        let decimals = plain.split_once('.').map_or(0, |(_, frac)| frac.len());

        Ok(Self {
            prefix: s[..start].to_string(),
            value,
            decimals,
            suffix: suffix.to_string(),
            grouped,
        })
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(self.value))
    }
}

fn group_thousands(digits: &str) -> String {
    let (int, frac) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut out = String::with_capacity(digits.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/counter.rs"]
mod tests;
