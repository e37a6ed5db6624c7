//! Contact aggregation: from flat query rows to contacts and vCards.
//!
//! Aggregation runs in two passes over one batch of rows:
//!
//! 1. **Grouping**: rows are collected into one [`RawContact`] per
//!    `contact_id`, keeping each contact's decoded facts keyed by mimetype.
//!    First-seen order is kept for both contacts and mimetypes; a repeated
//!    mimetype replaces the earlier fact in place.
//! 2. **Rendering**: each fact is mapped onto the flat [`Contact`] and the
//!    [`VCardRecord`], emitted according to the [`EmitMode`].
//!
//! The two output sequences always have equal length and are index-aligned.
//!
//! Recoverable problems (unparseable phone numbers, unknown mimetypes) are
//! reported through an injected [`IngestSink`] instead of aborting.

use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{Contact, ContactData, RawRow};
use crate::phone::{self, PhoneError};
use crate::vcard::{self, Address, Email, StructuredName, VCardRecord};

/// How rendered records are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmitMode {
    /// One output entry per recognized fact, each carrying only that fact's
    /// fields plus the display name. Matches the historical export format.
    #[default]
    PerMimetype,
    /// One merged output entry per raw contact.
    PerContact,
}

/// Receives diagnostics produced while aggregating.
pub trait IngestSink {
    fn phone_rejected(&self, contact_id: i64, raw: &str, error: &PhoneError);
    fn unknown_mimetype(&self, contact_id: i64, mimetype: &str);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl IngestSink for TracingSink {
    fn phone_rejected(&self, contact_id: i64, raw: &str, error: &PhoneError) {
        tracing::error!(contact_id, raw, "{}", error);
    }

    fn unknown_mimetype(&self, contact_id: i64, mimetype: &str) {
        tracing::warn!(contact_id, mimetype, "Unknown mimetype");
    }
}

/// Everything accumulated for one `contact_id`.
#[derive(Debug, Clone)]
pub struct RawContact {
    pub contact_id: i64,
    pub display_name: String,
    pub facts: Vec<ContactData>,
}

impl RawContact {
    fn new(contact_id: i64) -> Self {
        Self {
            contact_id,
            display_name: String::new(),
            facts: Vec::new(),
        }
    }

    /// Store `data`, replacing an earlier fact of the same mimetype in place.
    fn store(&mut self, data: ContactData) {
        let mimetype = data.mimetype();
        match self.facts.iter_mut().find(|f| f.mimetype() == mimetype) {
            Some(slot) => *slot = data,
            None => self.facts.push(data),
        }
    }
}

/// Result of one aggregation run. `vcards[i]` and `contacts[i]` describe the
/// same record.
#[derive(Debug, Clone, Default)]
pub struct Export {
    pub vcards: Vec<VCardRecord>,
    pub contacts: Vec<Contact>,
}

impl Export {
    fn push(&mut self, contact: Contact, vcard: VCardRecord) {
        self.contacts.push(contact);
        self.vcards.push(vcard);
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

pub struct Aggregator<'a> {
    region: String,
    emit: EmitMode,
    sink: &'a dyn IngestSink,
}

impl<'a> Aggregator<'a> {
    pub fn new(region: impl Into<String>, emit: EmitMode, sink: &'a dyn IngestSink) -> Self {
        Self {
            region: region.into(),
            emit,
            sink,
        }
    }

    /// Group `rows` by contact and render them.
    pub fn ingest<I>(&self, rows: I) -> Export
    where
        I: IntoIterator<Item = RawRow>,
    {
        let raw_contacts = group(rows);
        let mut export = Export::default();

        for raw in &raw_contacts {
            match self.emit {
                EmitMode::PerMimetype => {
                    for fact in &raw.facts {
                        let mut contact = Contact::new(raw.display_name.as_str());
                        let mut card = VCardRecord::new(raw.display_name.as_str());
                        if self.apply(raw.contact_id, fact, &mut contact, &mut card) {
                            export.push(contact, card);
                        }
                    }
                }
                EmitMode::PerContact => {
                    let mut contact = Contact::new(raw.display_name.as_str());
                    let mut card = VCardRecord::new(raw.display_name.as_str());
                    for fact in &raw.facts {
                        self.apply(raw.contact_id, fact, &mut contact, &mut card);
                    }
                    export.push(contact, card);
                }
            }
        }

        export
    }

    /// Map one fact onto `contact` and `card`. Returns `false` when the fact
    /// has no output of its own (unknown mimetype).
    fn apply(
        &self,
        contact_id: i64,
        fact: &ContactData,
        contact: &mut Contact,
        card: &mut VCardRecord,
    ) -> bool {
        match fact {
            ContactData::Name { given, family } => {
                let given = given.clone().unwrap_or_default();
                let family = family.clone().unwrap_or_default();
                card.name = Some(StructuredName {
                    family: family.clone(),
                    given: given.clone(),
                });
                contact.firstname = Some(given);
                contact.lastname = Some(family);
            }
            ContactData::Email { address } => {
                let address = address.clone().unwrap_or_default();
                card.email = Some(Email::internet(address.as_str()));
                contact.email = Some(address);
            }
            ContactData::Phone { number } => {
                let raw = number.as_deref().unwrap_or_default();
                match phone::normalize(raw, &self.region) {
                    Ok(normalized) => {
                        card.tel = Some(normalized.clone());
                        contact.phone_number = Some(normalized);
                    }
                    Err(e) => self.sink.phone_rejected(contact_id, raw, &e),
                }
            }
            ContactData::PostalAddress {
                formatted,
                street,
                city,
                postcode,
                country,
            } => {
                let street = street.clone().unwrap_or_default();
                let city = city.clone().unwrap_or_default();
                let postcode = postcode.clone().unwrap_or_default();
                let country = country.clone().unwrap_or_default();
                card.address = Some(Address {
                    street: street.clone(),
                    city: vcard::title_case(&city),
                    code: postcode.clone(),
                    country: vcard::title_case(&country),
                });
                contact.address = Some(formatted.clone());
                contact.street = Some(street);
                contact.city = Some(city);
                contact.postcode = Some(postcode);
                contact.country = Some(country);
            }
            ContactData::Unknown { mimetype } => {
                self.sink.unknown_mimetype(contact_id, mimetype);
                return false;
            }
        }
        true
    }
}

/// Pass 1: one [`RawContact`] per `contact_id`, in first-seen order.
pub fn group<I>(rows: I) -> Vec<RawContact>
where
    I: IntoIterator<Item = RawRow>,
{
    let mut contacts: Vec<RawContact> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.contact_id).or_insert_with(|| {
            contacts.push(RawContact::new(row.contact_id));
            contacts.len() - 1
        });
        let data = ContactData::decode(&row);
        let raw = &mut contacts[slot];
        raw.display_name = row.display_name.unwrap_or_default();
        raw.store(data);
    }

    contacts
}
