//! Shared fixture builder: in-memory workbooks via `rust_xlsxwriter`.

use rust_xlsxwriter::Workbook;

#[derive(Clone, Copy)]
pub enum Cell {
    Text(&'static str),
    Num(f64),
    Blank,
}

pub use Cell::{Blank, Num, Text};

/// Build an xlsx buffer from `(sheet name, rows)` pairs.
pub fn workbook_bytes(sheets: &[(&str, &[&[Cell]])]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("valid sheet name");
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Text(s) => {
                        worksheet.write(r as u32, c as u16, *s).expect("write cell");
                    }
                    Cell::Num(n) => {
                        worksheet.write(r as u32, c as u16, *n).expect("write cell");
                    }
                    Cell::Blank => {}
                }
            }
        }
    }
    workbook.save_to_buffer().expect("serialize workbook")
}
