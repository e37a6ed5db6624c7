//! vCard 3.0 records and text serialization.
//!
//! Output follows the layout common vCard writers produce: `VERSION` first,
//! the remaining properties in alphabetical order, CRLF line endings and
//! lines folded at 75 octets.

const VERSION: &str = "3.0";
const MAX_LINE_OCTETS: usize = 75;

/// Structured name (`N`). Only family and given components are populated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredName {
    pub family: String,
    pub given: String,
}

/// Structured address (`ADR`). PO box, extended address and region stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub address: String,
    pub kind: String,
}

impl Email {
    pub fn internet(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            kind: "INTERNET".to_string(),
        }
    }
}

/// A single card holding at most one of each supported property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCardRecord {
    pub full_name: String,
    pub name: Option<StructuredName>,
    pub email: Option<Email>,
    pub tel: Option<String>,
    pub address: Option<Address>,
}

impl VCardRecord {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Default::default()
        }
    }

    /// Render as a complete `BEGIN:VCARD` .. `END:VCARD` block.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, "BEGIN:VCARD");
        push_line(&mut out, &format!("VERSION:{}", VERSION));

        if let Some(adr) = &self.address {
            let value = structured(&[
                "",
                "",
                adr.street.as_str(),
                adr.city.as_str(),
                "",
                adr.code.as_str(),
                adr.country.as_str(),
            ]);
            push_line(&mut out, &format!("ADR:{}", value));
        }
        if let Some(email) = &self.email {
            push_line(
                &mut out,
                &format!("EMAIL;TYPE={}:{}", email.kind, escape_text(&email.address)),
            );
        }
        push_line(&mut out, &format!("FN:{}", escape_text(&self.full_name)));
        if let Some(n) = &self.name {
            let value = structured(&[n.family.as_str(), n.given.as_str(), "", "", ""]);
            push_line(&mut out, &format!("N:{}", value));
        }
        if let Some(tel) = &self.tel {
            push_line(&mut out, &format!("TEL:{}", escape_text(tel)));
        }

        push_line(&mut out, "END:VCARD");
        out
    }
}

/// Uppercase the first letter of every word and lowercase the rest.
///
/// A word starts at any letter that does not follow another letter, so
/// `"o'neil"` becomes `"O'Neil"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic();
    }
    out
}

fn structured(components: &[&str]) -> String {
    components
        .iter()
        .map(|c| escape_text(c))
        .collect::<Vec<_>>()
        .join(";")
}

fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Append `line` folded to 75 octets, never splitting a UTF-8 sequence.
fn push_line(out: &mut String, line: &str) {
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            // continuation lines start with the space
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out.push_str("\r\n");
}
