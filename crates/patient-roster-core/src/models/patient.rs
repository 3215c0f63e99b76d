//! Patient models.

use serde::{Deserialize, Serialize};

/// A patient record as supplied by the patient repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    /// Stable identity key, unique within one loaded collection
    pub patient_id: u32,
    /// Display name (search target)
    pub patient_name: String,
    /// Age in years (sort key)
    pub age: u32,
    /// Photo location; views substitute a placeholder when absent
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Contact entries; only the first is ever displayed
    #[serde(default)]
    pub contact: Vec<Contact>,
    /// Medical issue label (filter vocabulary)
    pub medical_issue: String,
}

/// A contact entry. Any field may be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub email: String,
}

/// A display field that is either present or explicitly absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContactField {
    Present(String),
    Absent,
}

impl ContactField {
    /// Empty strings count as absent.
    fn from_raw(value: &str) -> Self {
        if value.is_empty() {
            ContactField::Absent
        } else {
            ContactField::Present(value.to_string())
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ContactField::Absent)
    }

    /// Borrow the value, if present.
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            ContactField::Present(value) => Some(value),
            ContactField::Absent => None,
        }
    }

    /// Render the value, or `sentinel` when absent.
    pub fn display_or<'a>(&'a self, sentinel: &'a str) -> &'a str {
        self.as_deref().unwrap_or(sentinel)
    }
}

/// The first contact of a patient, resolved into explicit present/absent fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactCard {
    pub address: ContactField,
    pub number: ContactField,
    pub email: ContactField,
}

impl ContactCard {
    /// A card with every field absent.
    pub fn absent() -> Self {
        Self {
            address: ContactField::Absent,
            number: ContactField::Absent,
            email: ContactField::Absent,
        }
    }
}

impl From<&Contact> for ContactCard {
    fn from(contact: &Contact) -> Self {
        Self {
            address: ContactField::from_raw(&contact.address),
            number: ContactField::from_raw(&contact.number),
            email: ContactField::from_raw(&contact.email),
        }
    }
}

impl Patient {
    /// Create a patient with no contact entries and no photo.
    pub fn new(patient_id: u32, patient_name: String, age: u32, medical_issue: String) -> Self {
        Self {
            patient_id,
            patient_name,
            age,
            photo_url: None,
            contact: Vec::new(),
            medical_issue,
        }
    }

    /// Builder-style helper to attach a contact entry.
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact.push(contact);
        self
    }

    /// Display identifier, e.g. `ID-0042`.
    pub fn display_id(&self) -> String {
        format!("ID-{:04}", self.patient_id)
    }

    /// The first contact entry resolved for display.
    ///
    /// Every field is [`ContactField::Absent`] when the patient has no contacts.
    pub fn contact_card(&self) -> ContactCard {
        self.contact
            .first()
            .map(ContactCard::from)
            .unwrap_or_else(ContactCard::absent)
    }

    /// Case-insensitive substring match against the patient name.
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.patient_name.to_lowercase().contains(needle_lower)
    }
}
