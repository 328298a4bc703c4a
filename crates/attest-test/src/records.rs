//! Sample data files for the data providers.

use serde::Deserialize;

/// Header line, a blank line and three people.
pub const PEOPLE_CSV: &str = "name,age,city\n\
Ada, 36 ,London\n\
\n\
Grace,45,Arlington\n\
Linus,28,Helsinki\n";

/// Tab-separated, no header line, rows of uneven width.
pub const PEOPLE_TSV_NO_HEADER: &str = "Ada\t36\n\
Grace\t45\tArlington\n";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub city: String,
}

impl Person {
    pub fn new(name: &str, age: u32, city: &str) -> Self {
        Self {
            name: name.to_string(),
            age,
            city: city.to_string(),
        }
    }

    /// The records in [`PEOPLE_CSV`], in file order.
    pub fn sample() -> Vec<Person> {
        vec![
            Person::new("Ada", 36, "London"),
            Person::new("Grace", 45, "Arlington"),
            Person::new("Linus", 28, "Helsinki"),
        ]
    }
}
