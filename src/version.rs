use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// One run of a version string: either a maximal run of ASCII digits or a
/// maximal run of anything else.
///
/// Variant order matters: the derived `Ord` puts `Number` before `Text`, so
/// a numeric segment sorts below a text segment at the same position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    Number(u64),
    Text(String),
}

/// A version string parsed for natural-order comparison.
///
/// The string is split into maximal digit runs and maximal non-digit runs,
/// covering the whole input; digit runs compare by numeric value, so
/// `"4.9" < "4.11"` and `"10.0" > "2.0"`. Sequences compare element-wise,
/// and a strict prefix orders before the longer sequence, so
/// `"2.0-rc1" > "2.0"`.
///
/// Parsing is total: any string yields a `Version`, there is no error path.
/// Equality compares parsed segments, not source text (`"4.011" == "4.11"`);
/// the original string is kept for display only.
#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<Segment>,
    source: String,
}

impl Version {
    pub fn parse(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut segments = Vec::new();
        let mut start = 0usize;
        while start < bytes.len() {
            let digits = bytes[start].is_ascii_digit();
            let mut end = start + 1;
            while end < bytes.len() && bytes[end].is_ascii_digit() == digits {
                end += 1;
            }
            // Run boundaries always fall next to an ASCII digit, so the
            // slice cannot split a multi-byte character.
            let run = &source[start..end];
            segments.push(if digits {
                Segment::Number(digit_run_value(run))
            } else {
                Segment::Text(run.to_owned())
            });
            start = end;
        }
        Self {
            segments,
            source: source.to_owned(),
        }
    }

    /// The string this version was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Accumulates a digit run into a value, saturating instead of overflowing
/// so parsing stays total for arbitrarily long runs.
fn digit_run_value(run: &str) -> u64 {
    run.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments.cmp(&other.segments)
    }
}

impl PartialEq<str> for Version {
    fn eq(&self, other: &str) -> bool {
        *self == Version::parse(other)
    }
}

impl PartialEq<&str> for Version {
    fn eq(&self, other: &&str) -> bool {
        *self == Version::parse(other)
    }
}

impl PartialOrd<str> for Version {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        Some(self.cmp(&Version::parse(other)))
    }
}

impl PartialOrd<&str> for Version {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        Some(self.cmp(&Version::parse(other)))
    }
}

impl FromStr for Version {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Version::parse(s))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
