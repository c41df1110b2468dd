//! The small, fixed set of operations the harness can apply to a
//! [`vsparse_engine::SparseArray`], shared between the direct subcommands
//! and the `run <script>` line parser so the two stay in lockstep.

use crate::error::{CliError, Result};
use vsparse_engine::SparseArray;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Write { offset: u64, data: Vec<u8> },
    Zero { offset: u64, len: u32 },
    Fill { offset: u64, len: u32, byte: u8 },
    Blit { src_offset: u64, dst_offset: u64, len: u32 },
    Extents { offset: u64, len: u32 },
}

/// Applies a mutating op. `Op::Extents` is a query, not a mutation; callers
/// handle it separately so they can route the resulting `ExtentList` to
/// plain-text or `--json` output.
pub fn apply(sa: &mut SparseArray, op: &Op) -> Result<()> {
    match op {
        Op::Write { offset, data } => sa.write(data, data.len() as u32, *offset).map_err(Into::into),
        Op::Zero { offset, len } => {
            sa.zero(*len, *offset);
            Ok(())
        }
        Op::Fill { offset, len, byte } => sa.fill(*byte, *len, *offset).map_err(Into::into),
        Op::Blit { src_offset, dst_offset, len } => {
            sa.blit_within(*len, *src_offset, *dst_offset).map_err(Into::into)
        }
        Op::Extents { .. } => Ok(()),
    }
}

/// Parses one script line (or one subcommand's flattened arguments) of the
/// form `<verb> <args...>`.
///
/// Grammar:
/// ```text
/// write   <offset> <hex-data>
/// zero    <offset> <len>
/// fill    <offset> <len> <byte>
/// blit    <src-offset> <dst-offset> <len>
/// extents <offset> <len>
/// ```
pub fn parse_line(line: &str, line_no: usize) -> Result<Op> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let syntax_err = |reason: String| CliError::ScriptSyntax { line_no, reason };
    let parse_u64 = |s: &str, what: &str| {
        s.parse::<u64>()
            .map_err(|_| syntax_err(format!("expected a number for {what}, got {s:?}")))
    };
    let parse_u32 = |s: &str, what: &str| {
        s.parse::<u32>()
            .map_err(|_| syntax_err(format!("expected a number for {what}, got {s:?}")))
    };

    match fields.as_slice() {
        ["write", offset, data] => Ok(Op::Write {
            offset: parse_u64(offset, "offset")?,
            data: hex::decode(data)?,
        }),
        ["zero", offset, len] => Ok(Op::Zero {
            offset: parse_u64(offset, "offset")?,
            len: parse_u32(len, "len")?,
        }),
        ["fill", offset, len, byte] => Ok(Op::Fill {
            offset: parse_u64(offset, "offset")?,
            len: parse_u32(len, "len")?,
            byte: byte
                .parse::<u8>()
                .map_err(|_| syntax_err(format!("expected a byte value for byte, got {byte:?}")))?,
        }),
        ["blit", src_offset, dst_offset, len] => Ok(Op::Blit {
            src_offset: parse_u64(src_offset, "src-offset")?,
            dst_offset: parse_u64(dst_offset, "dst-offset")?,
            len: parse_u32(len, "len")?,
        }),
        ["extents", offset, len] => Ok(Op::Extents {
            offset: parse_u64(offset, "offset")?,
            len: parse_u32(len, "len")?,
        }),
        [] => Err(syntax_err("empty line".into())),
        [verb, ..] => Err(syntax_err(format!("unknown verb {verb:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_verb() {
        assert_eq!(
            parse_line("write 0 68656c6c6f", 1).unwrap(),
            Op::Write { offset: 0, data: b"hello".to_vec() }
        );
        assert_eq!(parse_line("zero 10 20", 1).unwrap(), Op::Zero { offset: 10, len: 20 });
        assert_eq!(
            parse_line("fill 10 20 65", 1).unwrap(),
            Op::Fill { offset: 10, len: 20, byte: 65 }
        );
        assert_eq!(
            parse_line("blit 10 20 5", 1).unwrap(),
            Op::Blit { src_offset: 10, dst_offset: 20, len: 5 }
        );
        assert_eq!(
            parse_line("extents 0 100", 1).unwrap(),
            Op::Extents { offset: 0, len: 100 }
        );
    }

    #[test]
    fn rejects_unknown_verb_and_bad_arity() {
        assert!(parse_line("frobnicate 1 2", 1).is_err());
        assert!(parse_line("write 0", 1).is_err());
    }

    #[test]
    fn rejects_malformed_numbers_and_hex() {
        assert!(parse_line("zero abc 10", 1).is_err());
        assert!(parse_line("write 0 zz", 1).is_err());
    }
}
