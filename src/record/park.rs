use std::sync::OnceLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schema::{DecodedFields, FieldDescriptor, FieldValue, Schema, ValidationReport};

use super::{take_date, take_text, Record};

pub const LEGAL_NAME: &str = "legalName";
pub const OWNER_ORGANIZATION_INN: &str = "ownerOrganizationInn";
pub const FOUNDATION_YEAR: &str = "foundationYear";

/// A park as described by a park data file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Park {
    pub legal_name: String,
    /// Taxpayer number of the owning organization
    pub owner_organization_inn: String,
    pub foundation_year: NaiveDate,
}

impl Record for Park {
    fn schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::new(
                "park",
                "v1",
                vec![
                    FieldDescriptor::text(LEGAL_NAME).not_blank().max_length(200),
                    FieldDescriptor::text(OWNER_ORGANIZATION_INN)
                        .not_blank()
                        .max_length(10),
                    FieldDescriptor::date(FOUNDATION_YEAR).not_blank(),
                ],
            )
            .with_description("Park registration data")
        })
    }

    fn from_fields(mut fields: DecodedFields) -> Result<Self, ValidationReport> {
        let mut report = ValidationReport::new();

        let legal_name = take_text(&mut fields, LEGAL_NAME, &mut report);
        let owner_organization_inn = take_text(&mut fields, OWNER_ORGANIZATION_INN, &mut report);
        let foundation_year = take_date(&mut fields, FOUNDATION_YEAR, &mut report);

        match (legal_name, owner_organization_inn, foundation_year) {
            (Some(legal_name), Some(owner_organization_inn), Some(foundation_year)) => Ok(Park {
                legal_name,
                owner_organization_inn,
                foundation_year,
            }),
            _ => Err(report),
        }
    }

    fn to_fields(&self) -> DecodedFields {
        let mut fields = DecodedFields::new();
        fields.insert(LEGAL_NAME, FieldValue::Text(self.legal_name.clone()));
        fields.insert(
            OWNER_ORGANIZATION_INN,
            FieldValue::Text(self.owner_organization_inn.clone()),
        );
        fields.insert(FOUNDATION_YEAR, FieldValue::Date(self.foundation_year));
        fields
    }
}
