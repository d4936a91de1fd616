use std::borrow::Cow;

use serde::Serialize;
use tera::Context;

use crate::errors::ServiceResult;
use crate::models::Part;
use crate::views::templates::render;

#[derive(Serialize)]
struct ListRow<'a> {
    href_id: Cow<'a, str>,
    reference: &'a str,
    quantity: i64,
    location: &'a str,
    status: &'a str,
}

/// Table of every part with a button to start a new one.
pub fn render_list(parts: &[Part]) -> ServiceResult<String> {
    let rows: Vec<ListRow<'_>> = parts
        .iter()
        .map(|part| ListRow {
            href_id: urlencoding::encode(part.id()),
            reference: &part.reference,
            quantity: part.quantity,
            location: &part.location,
            status: &part.status,
        })
        .collect();

    let mut context = Context::new();
    context.insert("parts", &rows);
    render("part_list.html", &context)
}
