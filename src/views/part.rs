use std::borrow::Cow;

use serde::Serialize;
use tera::Context;

use crate::errors::ServiceResult;
use crate::models::Part;
use crate::views::templates::render;

/// CSS class shared by every edit-form input; `sendForm` collects by it.
pub const EDIT_FORM_CLASS: &str = "ga-edit-part";

/// Field values as the templates print them. Numbers arrive preformatted so
/// the card and the form can format weight differently.
#[derive(Serialize)]
struct PartFields<'a> {
    id: &'a str,
    href_id: Cow<'a, str>,
    reference: &'a str,
    weight: String,
    quantity: i64,
    location: &'a str,
    supplier: &'a str,
    dimensions: &'a str,
    status: &'a str,
    arrival_date: String,
}

impl<'a> PartFields<'a> {
    fn new(part: &'a Part, weight: String) -> Self {
        Self {
            id: part.id(),
            href_id: urlencoding::encode(part.id()),
            reference: &part.reference,
            weight,
            quantity: part.quantity,
            location: &part.location,
            supplier: &part.supplier,
            dimensions: &part.dimensions,
            status: &part.status,
            arrival_date: part.arrival_date_display(),
        }
    }
}

/// Read-only card for a part.
pub fn render_view(part: &Part) -> ServiceResult<String> {
    let mut context = Context::new();
    context.insert("part", &PartFields::new(part, part.weight_display()));
    render("part_view.html", &context)
}

/// Editable form for `part`, or for a brand-new part when `part` is `None`.
///
/// A non-empty `prefill_reference` (a scanned code, for instance) replaces
/// the reference field.
pub fn render_edit(part: Option<&Part>, prefill_reference: &str) -> ServiceResult<String> {
    let is_new = part.is_none();
    let mut part = part.cloned().unwrap_or_default();
    if !prefill_reference.is_empty() {
        part.reference = prefill_reference.to_string();
    }

    // Shortest text that parses back to the same f64.
    let weight = part.weight.to_string();

    let mut context = Context::new();
    context.insert("is_new", &is_new);
    context.insert("form_class", EDIT_FORM_CLASS);
    context.insert("part", &PartFields::new(&part, weight));
    render("part_edit.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn part() -> Part {
        let mut part = Part::new("part-42");
        part.reference = "VALVE-7".into();
        part.weight = 2.0;
        part.quantity = 15;
        part.location = "Dock B".into();
        part.supplier = "Hydra & Sons".into();
        part.dimensions = "30x30x12".into();
        part.status = "en salida de camión".into();
        part.arrival_date = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 1).unwrap();
        part
    }

    #[test]
    fn view_lists_every_formatted_field() {
        let markup = render_view(&part()).unwrap();

        assert!(markup.contains("<h1>VALVE-7</h1>"));
        assert!(markup.contains("<td>Weight</td><td>2.00</td>"));
        assert!(markup.contains("<td>Quantity</td><td>15</td>"));
        assert!(markup.contains("<td>Location</td><td>Dock B</td>"));
        assert!(markup.contains("<td>Supplier</td><td>Hydra &amp; Sons</td>"));
        assert!(markup.contains("<td>Dimensions</td><td>30x30x12</td>"));
        assert!(markup.contains("<td>Status</td><td>en salida de camión</td>"));
        assert!(markup.contains("<td>Arrival Date</td><td>2024-02-29T23:59:01Z</td>"));
    }

    #[test]
    fn view_wires_actions_to_part_id() {
        let markup = render_view(&part()).unwrap();

        assert!(markup.contains("guiapi('editPart', &quot;part-42&quot;)"));
        assert!(markup.contains("guiapi('deletePart', &quot;part-42&quot;)"));
        assert!(markup.contains("guiapi('prepareTruck', &quot;part-42&quot;)"));
        assert!(markup.contains("guiapi('ship', &quot;part-42&quot;)"));
        assert!(markup.contains(r#"href="/part/generate-qr?id=part-42" download="true""#));
    }

    #[test]
    fn view_escapes_markup_in_reference() {
        let mut part = part();
        part.reference = "<b>R&D</b>".into();

        let markup = render_view(&part).unwrap();
        assert!(markup.contains("<h1>&lt;b&gt;R&amp;D&lt;&#x2F;b&gt;</h1>"));
        assert!(!markup.contains("<b>"));
    }

    #[test]
    fn qr_link_encodes_id() {
        let markup = render_view(&Part::new("x&y z")).unwrap();
        assert!(markup.contains(r#"href="/part/generate-qr?id=x%26y%20z""#));
    }

    #[test]
    fn edit_prefills_current_values() {
        let markup = render_edit(Some(&part()), "").unwrap();

        assert!(markup.contains(r#"name="New" value="false""#));
        assert!(markup.contains(r#"name="ID" value="part-42""#));
        assert!(markup.contains(r#"name="Reference" value="VALVE-7""#));
        assert!(markup.contains(r#"name="Weight" value="2""#));
        assert!(markup.contains(r#"name="Quantity" value="15""#));
        assert!(markup.contains(r#"name="Supplier" value="Hydra &amp; Sons""#));
        assert!(markup.contains("guiapi('viewPart', &quot;part-42&quot;)"));
        assert!(markup.contains(&format!("sendForm('savePart', '.{}')", EDIT_FORM_CLASS)));
    }

    #[test]
    fn edit_without_part_is_a_new_blank_form() {
        let markup = render_edit(None, "").unwrap();

        assert!(markup.contains(r#"name="New" value="true""#));
        assert!(markup.contains(r#"name="ID" value="""#));
        assert!(markup.contains(r#"name="Reference" value="""#));
        assert!(markup.contains(r#"name="Quantity" value="0""#));
        assert!(markup.contains("window.location.href = '/'"));
    }

    #[test]
    fn prefill_reference_overrides_stored_reference() {
        let markup = render_edit(Some(&part()), "SCAN-001").unwrap();
        assert!(markup.contains(r#"name="Reference" value="SCAN-001""#));
        assert!(!markup.contains("VALVE-7"));
    }
}
