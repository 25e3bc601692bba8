use rust_xlsxwriter::Workbook;

/// A minimal one-sheet dataset workbook with the given company names.
pub fn companies_workbook(names: &[&str]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Data").expect("valid sheet name");
    worksheet.write(0, 0, "Company_Name").expect("write");
    worksheet.write(0, 1, "Latitude").expect("write");
    worksheet.write(0, 2, "Longitude").expect("write");
    for (i, name) in names.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write(row, 0, *name).expect("write");
        worksheet.write(row, 1, 48.0 + i as f64).expect("write");
        worksheet.write(row, 2, 11.0 + i as f64).expect("write");
    }
    workbook.save_to_buffer().expect("serialize workbook")
}
