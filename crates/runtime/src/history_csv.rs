use std::io::{self, Write};

use game_model::BalanceHistory;

pub const HISTORY_CSV_HEADER: &str = "turn,balance\n";

pub struct HistoryCsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> HistoryCsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        self.writer.write_all(HISTORY_CSV_HEADER.as_bytes())
    }

    pub fn write_history(&mut self, history: &BalanceHistory) -> io::Result<()> {
        self.write_header()?;
        for entry in history.entries() {
            let turn = escape_csv_field(&entry.turn);
            writeln!(self.writer, "{turn},{:.2}", entry.balance)?;
        }
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn escape_csv_field(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|ch| matches!(ch, ',' | '"' | '\n' | '\r'));
    if !needs_quotes {
        return value.to_string();
    }

    let escaped = value.replace('"', "\"\"");
    format!("\"{escaped}\"")
}
