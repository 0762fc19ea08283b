use std::fmt;

use log::{debug, warn};
use serde::{Serialize, Serializer};

use crate::{
    entry::{DecodedEntry, LineDecoder},
    error::{Error, Result},
    name_parser::NameParser,
};

/// Outcome of decoding one input line.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report<T = DecodedEntry> {
    Decoded {
        line: String,
        #[serde(flatten)]
        entry: T,
    },
    Failed {
        line: String,
        #[serde(serialize_with = "serialize_error")]
        error: Error,
    },
}

impl<T> Report<T> {
    pub fn line(&self) -> &str {
        match self {
            Report::Decoded { line, .. } | Report::Failed { line, .. } => line,
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, Report::Decoded { .. })
    }
}

/// Something a single input line decodes into.
pub trait ReportEntry: fmt::Display {
    /// Noun used when a line fails, as in `Couldn't decode {KIND}: {line}`.
    const KIND: &'static str;
}

impl ReportEntry for DecodedEntry {
    const KIND: &'static str = "entry";
}

impl<T: ReportEntry> fmt::Display for Report<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Decoded { entry, .. } => write!(f, "{entry}"),
            Report::Failed { line, .. } => write!(f, "Couldn't decode {}: {line}", T::KIND),
        }
    }
}

fn serialize_error<S: Serializer>(
    error: &Error,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Lines of `input` with a trailing `\r` removed, paired with their 1-based
/// line number. Empty lines are skipped.
pub fn non_empty_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| (idx + 1, line))
}

/// Decodes every non-empty line independently; a failing line never affects
/// its neighbours.
pub(crate) fn decode_lines<T, F>(input: &str, decode: F) -> Vec<Report<T>>
where
    T: ReportEntry,
    F: Fn(&str) -> Result<T>,
{
    non_empty_lines(input)
        .map(|(number, line)| match decode(line) {
            Ok(entry) => {
                debug!("line {number}: {entry}");
                Report::Decoded {
                    line: line.to_string(),
                    entry,
                }
            }
            Err(error) => {
                warn!("line {number}: couldn't decode {line:?}: {error}");
                Report::Failed {
                    line: line.to_string(),
                    error,
                }
            }
        })
        .collect()
}

impl<P: NameParser> LineDecoder<P> {
    pub fn decode_batch(&self, input: &str) -> Vec<Report> {
        decode_lines(input, |line| self.decode(line))
    }
}

/// Decodes a newline separated batch with the DER backed parser.
pub fn decode_batch(input: &str) -> Vec<Report> {
    LineDecoder::default().decode_batch(input)
}

/// Decodes a batch into its printable form, one string per non-empty line.
pub fn render_batch(input: &str) -> Vec<String> {
    decode_batch(input)
        .iter()
        .map(ToString::to_string)
        .collect()
}
