use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bpps_core::{BenchmarkInstance, GenerationJob, ItemClass};

use crate::errors::GenerationError;

/// File name of the instance built from `job`.
pub fn instance_filename(job: &GenerationJob) -> String {
    format!("{}.txt", job.key())
}

/// Encode `instance` in the canonical text format.
///
/// ```text
/// item_count  class_count  capacity  bin_cost
/// setup_cost  setup_weight  item_count        (one line per class)
/// weight                                      (one line per item, class order)
/// ```
pub fn encode_instance(instance: &BenchmarkInstance) -> String {
    InstanceText(instance).to_string()
}

/// Stream the text encoding of `instance` into `writer`.
pub fn write_instance_text<W: Write>(
    writer: &mut W,
    instance: &BenchmarkInstance,
) -> std::io::Result<()> {
    write!(writer, "{}", InstanceText(instance))
}

struct InstanceText<'a>(&'a BenchmarkInstance);

impl fmt::Display for InstanceText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instance = self.0;
        writeln!(
            f,
            "{}\t{}\t{}\t{}",
            instance.item_count, instance.class_count, instance.capacity, instance.bin_cost
        )?;
        for class in &instance.classes {
            writeln!(
                f,
                "{}\t{}\t{}",
                class.setup_cost,
                class.setup_weight,
                class.item_count()
            )?;
        }
        for weight in instance.item_weights() {
            writeln!(f, "{weight}")?;
        }
        Ok(())
    }
}

/// Write the instance of `job` into `dir`, returning the bytes written.
pub fn write_instance(
    dir: &Path,
    job: &GenerationJob,
    instance: &BenchmarkInstance,
) -> Result<u64, GenerationError> {
    let path = dir.join(instance_filename(job));
    let mut writer = CountingWriter::new(BufWriter::new(File::create(&path)?));
    write_instance_text(&mut writer, instance)?;
    writer.flush()?;
    Ok(writer.bytes_written())
}

/// Read an instance file from disk.
pub fn read_instance(path: &Path) -> Result<BenchmarkInstance, GenerationError> {
    let text = std::fs::read_to_string(path)?;
    parse_instance(&text)
}

/// Parse the canonical text format. Any whitespace separates fields.
///
/// Declared counts are checked against the lines actually present; nothing
/// is allocated up front from them.
pub fn parse_instance(text: &str) -> Result<BenchmarkInstance, GenerationError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (line_no, header) = lines.next().ok_or_else(|| GenerationError::Parse {
        line: 1,
        message: "missing header line".to_string(),
    })?;
    let header = parse_fields::<u64>(header, 4, line_no)?;
    let item_count = to_u32(header[0], line_no)?;
    let class_count = to_u32(header[1], line_no)?;
    let capacity = header[2];
    let bin_cost = header[3];

    let mut declared = Vec::new();
    let mut declared_items: u64 = 0;
    let mut last_line = line_no;
    for _ in 0..class_count {
        let (line_no, line) = lines.next().ok_or_else(|| GenerationError::Parse {
            line: last_line,
            message: format!("expected {class_count} class lines"),
        })?;
        last_line = line_no;
        let fields = parse_fields::<i64>(line, 3, line_no)?;
        if fields[0] > 0 || fields[1] <= 0 || fields[2] < 0 {
            return Err(GenerationError::Parse {
                line: line_no,
                message: format!("invalid class line '{line}'"),
            });
        }
        let count = fields[2] as u64;
        declared_items = declared_items
            .checked_add(count)
            .filter(|total| *total <= u64::from(item_count))
            .ok_or_else(|| GenerationError::Parse {
                line: line_no,
                message: format!("classes declare more than the {item_count} items in the header"),
            })?;
        declared.push((fields[0], fields[1] as u64, count));
    }

    if declared_items != u64::from(item_count) {
        return Err(GenerationError::Parse {
            line: last_line,
            message: format!(
                "classes declare {declared_items} items but the header declares {item_count}"
            ),
        });
    }

    let mut classes = Vec::new();
    for (setup_cost, setup_weight, count) in declared {
        let mut item_weights = Vec::new();
        for _ in 0..count {
            let (line_no, line) = lines.next().ok_or_else(|| GenerationError::Parse {
                line: last_line,
                message: format!("expected {item_count} item weights"),
            })?;
            last_line = line_no;
            item_weights.push(parse_fields::<u64>(line, 1, line_no)?[0]);
        }
        classes.push(ItemClass {
            setup_cost,
            setup_weight,
            item_weights,
        });
    }

    if let Some((line_no, line)) = lines.next() {
        return Err(GenerationError::Parse {
            line: line_no,
            message: format!("unexpected trailing content '{line}'"),
        });
    }

    Ok(BenchmarkInstance {
        item_count,
        class_count,
        capacity,
        bin_cost,
        classes,
    })
}

fn parse_fields<T: std::str::FromStr>(
    line: &str,
    expected: usize,
    line_no: usize,
) -> Result<Vec<T>, GenerationError> {
    let fields = line
        .split_whitespace()
        .map(|field| {
            field.parse::<T>().map_err(|_| GenerationError::Parse {
                line: line_no,
                message: format!("'{field}' is not an integer"),
            })
        })
        .collect::<Result<Vec<T>, GenerationError>>()?;

    if fields.len() != expected {
        return Err(GenerationError::Parse {
            line: line_no,
            message: format!("expected {expected} fields, found {}", fields.len()),
        });
    }

    Ok(fields)
}

fn to_u32(value: u64, line_no: usize) -> Result<u32, GenerationError> {
    u32::try_from(value).map_err(|_| GenerationError::Parse {
        line: line_no,
        message: format!("{value} is too large"),
    })
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_instance() -> BenchmarkInstance {
        BenchmarkInstance {
            item_count: 4,
            class_count: 2,
            capacity: 100,
            bin_cost: 10,
            classes: vec![
                ItemClass {
                    setup_cost: -3,
                    setup_weight: 5,
                    item_weights: vec![12, 7],
                },
                ItemClass {
                    setup_cost: -1,
                    setup_weight: 9,
                    item_weights: vec![20, 11],
                },
            ],
        }
    }

    #[test]
    fn encodes_header_classes_then_weights() {
        let text = encode_instance(&sample_instance());
        assert_eq!(text, "4\t2\t100\t10\n-3\t5\t2\n-1\t9\t2\n12\n7\n20\n11\n");
    }

    #[test]
    fn parses_space_separated_text() {
        let text = "4 2 100 10\n-3 5 2\n-1 9 2\n12\n7\n20\n11\n";
        assert_eq!(parse_instance(text).expect("parse"), sample_instance());
    }

    #[test]
    fn rejects_missing_weights() {
        let text = "4 2 100 10\n-3 5 2\n-1 9 2\n12\n7\n20\n";
        assert!(matches!(
            parse_instance(text),
            Err(GenerationError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_count_mismatch() {
        let text = "5 2 100 10\n-3 5 2\n-1 9 2\n12\n7\n20\n11\n";
        let err = parse_instance(text).expect_err("header disagrees with classes");
        assert!(err.to_string().contains("declare"));
    }

    #[test]
    fn rejects_class_counts_that_overflow() {
        let text = "1 3 100 10\n\
                    0 5 9223372036854775807\n\
                    0 5 9223372036854775807\n\
                    0 5 9223372036854775807\n";
        match parse_instance(text) {
            Err(GenerationError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn huge_declared_count_fails_on_missing_weights() {
        let text = "4000000000 1 100 10\n0 5 4000000000\n";
        match parse_instance(text) {
            Err(GenerationError::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("item weights"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn streamed_encoding_matches_string() {
        let mut out = Vec::new();
        write_instance_text(&mut out, &sample_instance()).expect("write to vec");
        assert_eq!(out, encode_instance(&sample_instance()).into_bytes());
    }
}
