//! Runs a small script of `ops.rs`-grammar lines against one shared
//! [`SparseArray`], printing the result of every `extents` line as it's
//! reached.

use std::fs;
use std::path::Path;

use vsparse_engine::{ExtentList, SparseArray};

use crate::error::{CliError, Result};
use crate::ops::{apply, parse_line, Op};
use crate::output::print_extents;

pub fn run(path: &Path, debug: bool, json: bool) -> Result<()> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::ScriptIo {
        path: path.display().to_string(),
        source,
    })?;

    let mut sa = SparseArray::new(debug);
    for (i, raw_line) in contents.lines().enumerate() {
        let line_no = i + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let op = parse_line(line, line_no)?;
        if let Op::Extents { offset, len } = op {
            let mut list = ExtentList::new(offset, offset + len as u64)?;
            sa.extents(len, offset, &mut list)?;
            print_extents(&list, json);
        } else {
            apply(&mut sa, &op)?;
        }
    }
    Ok(())
}
