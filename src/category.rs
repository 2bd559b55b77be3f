use std::fmt;

use clap::ValueEnum;

/// Review section of the site. Picks both the listing URL and the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Category {
    Airline,
    Seat,
    Lounge,
}

pub const DATASET_SUFFIX: &str = "_reviews.csv";

impl Category {
    pub const ALL: [Category; 3] = [Category::Airline, Category::Seat, Category::Lounge];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Airline => "airline",
            Category::Seat => "seat",
            Category::Lounge => "lounge",
        }
    }

    pub fn dataset_file_name(self) -> String {
        format!("{}{}", self.as_str(), DATASET_SUFFIX)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
