use tabled::Table;

use crate::{types::QualityTableRow, utils::Quality};

pub fn levels() {
    let rows: Vec<QualityTableRow> = Quality::ALL
        .into_iter()
        .map(|q| QualityTableRow {
            level: q.as_str().to_string(),
            label: q.label().to_string(),
            membership: q.membership().to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
}
