//! Plain-text and `--json` rendering of extent query results.

use serde::Serialize;
use vsparse_engine::{ExtentList, ExtentType};

#[derive(Serialize)]
struct ExtentView {
    offset: u64,
    length: u64,
    hole: bool,
    zero: bool,
    data: bool,
}

fn view(offset: u64, length: u64, ty: ExtentType) -> ExtentView {
    ExtentView {
        offset,
        length,
        hole: ty.contains(ExtentType::HOLE),
        zero: ty.contains(ExtentType::ZERO),
        data: ty == ExtentType::DATA,
    }
}

pub fn print_extents(list: &ExtentList, json: bool) {
    let views: Vec<ExtentView> = (0..list.count())
        .map(|i| {
            let e = list.get(i);
            view(e.offset, e.length, e.ty)
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&views).expect("ExtentView always serializes"));
        return;
    }

    for v in &views {
        let kind = if v.data {
            "data"
        } else if v.hole && v.zero {
            "hole+zero"
        } else if v.hole {
            "hole"
        } else {
            "zero"
        };
        println!("[{:>12}, {:>12}) {}", v.offset, v.offset + v.length, kind);
    }
}
