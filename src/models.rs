//! Core data models for contact extraction.
//!
//! A [`RawRow`] is what the `data` table query hands back: a mimetype tag
//! plus fifteen positional `dataN` columns. Rows are decoded into a
//! [`ContactData`] variant right at the boundary, so nothing past this module
//! needs to remember that a postal city lives in `data7`.

use serde::Serialize;

/// Number of positional `dataN` columns carried by every row.
pub const DATA_COLUMNS: usize = 15;

pub const MIMETYPE_NAME: &str = "vnd.android.cursor.item/name";
pub const MIMETYPE_EMAIL: &str = "vnd.android.cursor.item/email_v2";
pub const MIMETYPE_PHONE: &str = "vnd.android.cursor.item/phone_v2";
pub const MIMETYPE_POSTAL: &str = "vnd.android.cursor.item/postal-address_v2";

/// One row of the contacts query, before any interpretation.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub mimetype: String,
    pub contact_id: i64,
    pub display_name: Option<String>,
    pub data: [Option<String>; DATA_COLUMNS],
}

impl RawRow {
    /// Returns `dataN` using the 1-based column name Android uses.
    fn column(&self, n: usize) -> Option<&str> {
        self.data.get(n - 1).and_then(|v| v.as_deref())
    }

    fn owned(&self, n: usize) -> Option<String> {
        self.column(n).map(str::to_string)
    }
}

/// The kind of contact fact a row encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mimetype {
    Name,
    Email,
    Phone,
    PostalAddress,
    Other(String),
}

impl Mimetype {
    pub fn parse(s: &str) -> Self {
        match s {
            MIMETYPE_NAME => Mimetype::Name,
            MIMETYPE_EMAIL => Mimetype::Email,
            MIMETYPE_PHONE => Mimetype::Phone,
            MIMETYPE_POSTAL => Mimetype::PostalAddress,
            other => Mimetype::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Mimetype::Name => MIMETYPE_NAME,
            Mimetype::Email => MIMETYPE_EMAIL,
            Mimetype::Phone => MIMETYPE_PHONE,
            Mimetype::PostalAddress => MIMETYPE_POSTAL,
            Mimetype::Other(s) => s,
        }
    }

    /// The four mimetypes the extraction query asks for.
    pub fn recognized() -> [Mimetype; 4] {
        [
            Mimetype::Name,
            Mimetype::Email,
            Mimetype::Phone,
            Mimetype::PostalAddress,
        ]
    }
}

/// A decoded contact fact with named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactData {
    Name {
        given: Option<String>,
        family: Option<String>,
    },
    Email {
        address: Option<String>,
    },
    Phone {
        number: Option<String>,
    },
    PostalAddress {
        formatted: Option<String>,
        street: Option<String>,
        city: Option<String>,
        postcode: Option<String>,
        country: Option<String>,
    },
    Unknown {
        mimetype: String,
    },
}

impl ContactData {
    /// Decode the positional columns of `row` according to its mimetype.
    pub fn decode(row: &RawRow) -> Self {
        match Mimetype::parse(&row.mimetype) {
            // StructuredName: data2 = GIVEN_NAME, data3 = FAMILY_NAME
            Mimetype::Name => ContactData::Name {
                given: row.owned(2),
                family: row.owned(3),
            },
            Mimetype::Email => ContactData::Email {
                address: row.owned(1),
            },
            Mimetype::Phone => ContactData::Phone {
                number: row.owned(1),
            },
            // StructuredPostal: data1 = FORMATTED_ADDRESS, data4 = STREET,
            // data7 = CITY, data9 = POSTCODE, data10 = COUNTRY
            Mimetype::PostalAddress => ContactData::PostalAddress {
                formatted: row.owned(1),
                street: row.owned(4),
                city: row.owned(7),
                postcode: row.owned(9),
                country: row.owned(10),
            },
            Mimetype::Other(mimetype) => ContactData::Unknown { mimetype },
        }
    }

    pub fn mimetype(&self) -> Mimetype {
        match self {
            ContactData::Name { .. } => Mimetype::Name,
            ContactData::Email { .. } => Mimetype::Email,
            ContactData::Phone { .. } => Mimetype::Phone,
            ContactData::PostalAddress { .. } => Mimetype::PostalAddress,
            ContactData::Unknown { mimetype } => Mimetype::Other(mimetype.clone()),
        }
    }
}

/// Flat contact record as written to the JSON output.
///
/// Field order here is the key order in the output. Keys whose mimetype was
/// never seen are left out entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Raw formatted address; `Some(None)` serializes as `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Contact {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Default::default()
        }
    }
}
