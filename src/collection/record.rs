use serde::{Deserialize, Serialize};

/// A document of the collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// `RECORDNUM`, unique across the record files.
    pub number: u32,
    /// The abstract, or the extract for records without one.
    pub text: String,
}

impl Record {
    pub fn new<S: Into<String>>(number: u32, text: S) -> Self {
        Record {
            number,
            text: text.into(),
        }
    }
}
