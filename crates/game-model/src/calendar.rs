use std::fmt;

use serde::Serialize;

/// Game clock. One engine turn moves it forward one quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Calendar {
    year: u32,
    quarter: u8,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            year: 1,
            quarter: 1,
        }
    }
}

impl Calendar {
    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    pub fn advance(&mut self) {
        if self.quarter == 4 {
            self.year += 1;
        }
        self.quarter = self.quarter % 4 + 1;
    }

    pub fn turn_label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{} Q{}", self.year, self.quarter)
    }
}
