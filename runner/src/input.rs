use std::io::{self, Read};
use std::str;

use tracing::warn;

/// Reads `(arrival, burst)` pairs from whitespace separated integers.
///
/// Reading stops at the first token that is not an integer, including one
/// that is not valid UTF-8. A trailing arrival without a burst is dropped.
/// Only a failure of the reader itself is an error.
pub fn read_pairs<R: Read>(mut reader: R) -> io::Result<Vec<(i64, i64)>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let mut values = Vec::new();
    for token in bytes
        .split(u8::is_ascii_whitespace)
        .filter(|token| !token.is_empty())
    {
        match str::from_utf8(token).ok().and_then(|t| t.parse::<i64>().ok()) {
            Some(value) => values.push(value),
            None => {
                let token = String::from_utf8_lossy(token);
                warn!(%token, "input truncated at a token that is not an integer");
                break;
            }
        }
    }

    if values.len() % 2 != 0 {
        warn!(arrival = values[values.len() - 1], "dropping arrival without a burst");
    }

    Ok(values
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_span_lines() {
        let input = "0 8\n1 4\n2\n9 3 5\n";
        assert_eq!(
            read_pairs(input.as_bytes()).unwrap(),
            vec![(0, 8), (1, 4), (2, 9), (3, 5)]
        );
    }

    #[test]
    fn stops_at_malformed_token() {
        let input = "0 5\n1 3\n2 x\n3 4\n";
        assert_eq!(read_pairs(input.as_bytes()).unwrap(), vec![(0, 5), (1, 3)]);
    }

    #[test]
    fn drops_unpaired_arrival() {
        assert_eq!(read_pairs("0 5 7".as_bytes()).unwrap(), vec![(0, 5)]);
        assert!(read_pairs("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn invalid_utf8_truncates() {
        let input: &[u8] = b"0 5\n1 3\n\xff 4\n";
        assert_eq!(read_pairs(input).unwrap(), vec![(0, 5), (1, 3)]);
    }

    #[test]
    fn integer_prefix_is_not_taken() {
        assert_eq!(read_pairs("0 5 3x 4".as_bytes()).unwrap(), vec![(0, 5)]);
        assert_eq!(read_pairs("0\t5\r\n1 3".as_bytes()).unwrap(), vec![(0, 5), (1, 3)]);
    }

    #[test]
    fn reader_failure_is_an_error() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
        }

        assert!(read_pairs(Broken).is_err());
    }
}
