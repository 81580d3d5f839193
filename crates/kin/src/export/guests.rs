//! Guest-list table export.
//!
//! One CSV row per person in insertion order, optionally filtered to
//! invited guests only. Columns cover the person fields; the internal id
//! stays out of the table.

use crate::{export::Error, store::Dataset};

const HEADER: [&str; 7] = [
    "Name", "Side", "Invited", "Plus One", "Email", "Phone", "Notes",
];

fn flag(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Renders the guest list as CSV text.
pub fn guest_list_csv(dataset: &Dataset, invited_only: bool) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(HEADER)
        .map_err(|err| Error::Render(err.to_string()))?;

    for person in dataset.people() {
        if invited_only && !person.invited {
            continue;
        }

        writer
            .write_record([
                person.name.as_str(),
                person.side.as_deref().unwrap_or(""),
                flag(person.invited),
                flag(person.plus_one),
                person.email.as_deref().unwrap_or(""),
                person.phone.as_deref().unwrap_or(""),
                person.notes.as_deref().unwrap_or(""),
            ])
            .map_err(|err| Error::Render(err.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| Error::Render(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| Error::Render(err.to_string()))
}
