use serde::Serialize;

/// Missing-value marker for core fields.
pub const NOT_AVAILABLE: &str = "N/A";

pub const CORE_FIELDS: [&str; 6] = ["Date", "Rating", "Title", "Author", "Country", "Review"];

/// One review as scraped from a listing page.
///
/// Core fields are always set (possibly to [`NOT_AVAILABLE`]). `attributes`
/// holds the per-review rating table in document order; its labels are not
/// known ahead of time and vary between categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRecord {
    pub date: String,
    pub rating: String,
    pub title: String,
    pub author: String,
    pub country: String,
    pub review: String,
    pub attributes: Vec<(String, String)>,
}

impl Default for ReviewRecord {
    fn default() -> Self {
        let na = || NOT_AVAILABLE.to_string();
        ReviewRecord {
            date: na(),
            rating: na(),
            title: na(),
            author: na(),
            country: na(),
            review: na(),
            attributes: Vec::new(),
        }
    }
}

impl ReviewRecord {
    fn core_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "Date" => Some(&mut self.date),
            "Rating" => Some(&mut self.rating),
            "Title" => Some(&mut self.title),
            "Author" => Some(&mut self.author),
            "Country" => Some(&mut self.country),
            "Review" => Some(&mut self.review),
            _ => None,
        }
    }

    /// Set a variable attribute. A repeated label keeps its first position but
    /// takes the new value; a label naming a core field overwrites that field.
    pub fn set_attribute(&mut self, label: String, value: String) {
        if let Some(core) = self.core_mut(&label) {
            *core = value;
            return;
        }
        match self.attributes.iter_mut().find(|(k, _)| *k == label) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((label, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields().find(|(k, _)| *k == field).map(|(_, v)| v)
    }

    /// All (name, value) pairs: core fields first, then attributes.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        let core = [
            &self.date,
            &self.rating,
            &self.title,
            &self.author,
            &self.country,
            &self.review,
        ];
        CORE_FIELDS
            .into_iter()
            .zip(core)
            .map(|(k, v)| (k, v.as_str()))
            .chain(self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}
