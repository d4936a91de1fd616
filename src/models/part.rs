use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{ServiceError, ServiceResult};

/// Status set by the `prepareTruck` action.
pub const STATUS_PREPARING_TRUCK: &str = "en preparación de camión";
/// Status set by the `ship` action.
pub const STATUS_SHIPPED: &str = "en salida de camión";

/// A tracked inventory item.
///
/// The identifier is assigned once by the repository and never changes; every
/// other field is overwritten by the edit form or the status actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Part {
    id: String,
    pub reference: String,
    #[validate(range(min = 0.0, message = "Weight must be non-negative"))]
    pub weight: f64,
    #[validate(range(min = 0, message = "Quantity must be non-negative"))]
    pub quantity: i64,
    pub location: String,
    pub supplier: String,
    pub dimensions: String,
    pub status: String,
    pub arrival_date: DateTime<Utc>,
}

impl Default for Part {
    fn default() -> Self {
        Self::new("")
    }
}

impl Part {
    /// An empty part carrying only its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reference: String::new(),
            weight: 0.0,
            quantity: 0,
            location: String::new(),
            supplier: String::new(),
            dimensions: String::new(),
            status: String::new(),
            arrival_date: DateTime::<Utc>::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Weight as shown on the read-only card.
    pub fn weight_display(&self) -> String {
        format!("{:.2}", self.weight)
    }

    /// Arrival date in RFC 3339, whole seconds, `Z` for UTC.
    pub fn arrival_date_display(&self) -> String {
        format_timestamp(&self.arrival_date)
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Arguments of the `savePart` action, exactly as the edit form submits them.
///
/// Every value is text; numbers and dates are parsed by [`SavePartInput::parse`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SavePartInput {
    pub new: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub reference: String,
    pub weight: String,
    pub quantity: String,
    pub location: String,
    pub supplier: String,
    pub dimensions: String,
    pub status: Option<String>,
    pub arrival_date: Option<String>,
}

/// Field values from a [`SavePartInput`] that passed parsing.
#[derive(Clone, Debug, PartialEq)]
pub struct PartChanges {
    pub reference: String,
    pub weight: f64,
    pub quantity: i64,
    pub location: String,
    pub supplier: String,
    pub dimensions: String,
    pub status: Option<String>,
    pub arrival_date: Option<DateTime<Utc>>,
}

impl SavePartInput {
    pub fn is_new(&self) -> bool {
        self.new == "true"
    }

    /// Parses the numeric and date fields. Nothing is loaded or stored here,
    /// so a failure leaves the repository untouched.
    pub fn parse(&self) -> ServiceResult<PartChanges> {
        let weight: f64 = self.weight.trim().parse().map_err(|_| {
            ServiceError::ValidationError(format!("Weight '{}' is not a number", self.weight))
        })?;
        if !weight.is_finite() {
            return Err(ServiceError::ValidationError(format!(
                "Weight '{}' is not a finite number",
                self.weight
            )));
        }

        let quantity: i64 = self.quantity.trim().parse().map_err(|_| {
            ServiceError::ValidationError(format!(
                "Quantity '{}' is not an integer",
                self.quantity
            ))
        })?;

        let arrival_date = match non_empty(&self.arrival_date) {
            Some(raw) => Some(
                DateTime::parse_from_rfc3339(raw)
                    .map_err(|e| {
                        ServiceError::ValidationError(format!(
                            "ArrivalDate '{}' is not an RFC 3339 timestamp: {}",
                            raw, e
                        ))
                    })?
                    .with_timezone(&Utc),
            ),
            None => None,
        };

        Ok(PartChanges {
            reference: self.reference.clone(),
            weight,
            quantity,
            location: self.location.clone(),
            supplier: self.supplier.clone(),
            dimensions: self.dimensions.clone(),
            status: non_empty(&self.status).map(str::to_string),
            arrival_date,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl PartChanges {
    /// Overwrites the part's fields. Status and arrival date are only
    /// replaced when the form supplied them.
    pub fn apply_to(self, part: &mut Part) {
        part.reference = self.reference;
        part.weight = self.weight;
        part.quantity = self.quantity;
        part.location = self.location;
        part.supplier = self.supplier;
        part.dimensions = self.dimensions;
        if let Some(status) = self.status {
            part.status = status;
        }
        if let Some(arrival_date) = self.arrival_date {
            part.arrival_date = arrival_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use rstest::rstest;

    fn input() -> SavePartInput {
        SavePartInput {
            new: "false".into(),
            id: "p-1".into(),
            reference: "REF-1".into(),
            weight: "12.5".into(),
            quantity: "3".into(),
            location: "A1".into(),
            supplier: "ACME".into(),
            dimensions: "10x20x5".into(),
            status: Some("received".into()),
            arrival_date: Some("2024-03-01T08:30:00Z".into()),
        }
    }

    #[test]
    fn parses_form_fields() {
        let changes = input().parse().unwrap();
        assert_eq!(changes.weight, 12.5);
        assert_eq!(changes.quantity, 3);
        assert_eq!(
            changes.arrival_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap())
        );
        assert_eq!(changes.status.as_deref(), Some("received"));
    }

    #[rstest]
    #[case::weight_text("abc", "3", "2024-03-01T08:30:00Z")]
    #[case::weight_empty("", "3", "2024-03-01T08:30:00Z")]
    #[case::weight_infinite("inf", "3", "2024-03-01T08:30:00Z")]
    #[case::quantity_fraction("1.0", "2.5", "2024-03-01T08:30:00Z")]
    #[case::quantity_text("1.0", "many", "2024-03-01T08:30:00Z")]
    #[case::date_format("1.0", "3", "01/03/2024")]
    fn rejects_unparseable_fields(
        #[case] weight: &str,
        #[case] quantity: &str,
        #[case] arrival_date: &str,
    ) {
        let mut form = input();
        form.weight = weight.into();
        form.quantity = quantity.into();
        form.arrival_date = Some(arrival_date.into());
        assert_matches!(form.parse(), Err(ServiceError::ValidationError(_)));
    }

    #[test]
    fn missing_status_and_date_keep_existing_values() {
        let mut form = input();
        form.status = None;
        form.arrival_date = Some("  ".into());

        let arrival = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        let mut part = Part::new("p-1");
        part.status = "shelved".into();
        part.arrival_date = arrival;

        form.parse().unwrap().apply_to(&mut part);
        assert_eq!(part.status, "shelved");
        assert_eq!(part.arrival_date, arrival);
        assert_eq!(part.reference, "REF-1");
    }

    #[test]
    fn negative_values_fail_validation() {
        let mut part = Part::new("p-1");
        part.weight = -1.0;
        assert!(part.validate().is_err());

        let mut part = Part::new("p-1");
        part.quantity = -2;
        assert!(part.validate().is_err());
    }

    #[test]
    fn deserializes_pascal_case_form_payload() {
        let form: SavePartInput = serde_json::from_str(
            r#"{"New":"true","ID":"","Reference":"R","Weight":"1","Quantity":"2","Location":"L","Supplier":"S","Dimensions":"D"}"#,
        )
        .unwrap();
        assert!(form.is_new());
        assert_eq!(form.reference, "R");
        assert_eq!(form.status, None);
    }

    #[test]
    fn display_formats() {
        let mut part = Part::new("p-1");
        part.weight = 3.14159;
        part.arrival_date = Utc.with_ymd_and_hms(2024, 12, 24, 18, 0, 0).unwrap();
        assert_eq!(part.weight_display(), "3.14");
        assert_eq!(part.arrival_date_display(), "2024-12-24T18:00:00Z");
    }
}
