//! Senders and recipients

use super::PersonId;
use postomat_validator::{parse_address, parse_email, parse_name, parse_phone, ValidationError};
use serde::Serialize;
use std::fmt;

/// Validated identity shared by senders and recipients
///
/// Fields are stored in canonical form: trimmed name, `+375XXXXXXXXX` phone,
/// lowercase email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    name: String,
    phone: String,
    email: String,
    id: PersonId,
}

impl Person {
    /// Validate and normalize the fields, then derive the identifier
    ///
    /// # Errors
    /// Returns the first field that fails validation, checked in the order
    /// name, phone, email.
    pub fn new(name: &str, phone: &str, email: &str) -> Result<Self, ValidationError> {
        let name = parse_name(name)?;
        let phone = parse_phone(phone)?;
        let email = parse_email(email)?;
        let id = PersonId::derive(&name, &phone, &email);

        Ok(Self {
            name,
            phone,
            email,
            id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn id(&self) -> &PersonId {
        &self.id
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Anything that is backed by a [`Person`]
pub trait Party {
    fn person(&self) -> &Person;

    fn name(&self) -> &str {
        self.person().name()
    }

    fn phone(&self) -> &str {
        self.person().phone()
    }

    fn email(&self) -> &str {
        self.person().email()
    }

    fn id(&self) -> &PersonId {
        self.person().id()
    }
}

impl Party for Person {
    fn person(&self) -> &Person {
        self
    }
}

/// The party handing a parcel to the station
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sender {
    person: Person,
    address: String,
}

impl Sender {
    /// # Errors
    /// Returns a [`ValidationError`] for the first invalid field
    pub fn new(
        name: &str,
        phone: &str,
        email: &str,
        address: &str,
    ) -> Result<Self, ValidationError> {
        let person = Person::new(name, phone, email)?;
        let address = parse_address(address)?;
        Ok(Self { person, address })
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl Party for Sender {
    fn person(&self) -> &Person {
        &self.person
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sender: {}, address: {}", self.person.name, self.address)
    }
}

/// The party entitled to collect a parcel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    person: Person,
}

impl Recipient {
    /// # Errors
    /// Returns a [`ValidationError`] for the first invalid field
    pub fn new(name: &str, phone: &str, email: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            person: Person::new(name, phone, email)?,
        })
    }
}

impl Party for Recipient {
    fn person(&self) -> &Person {
        &self.person
    }
}

/// Address the sender as a notification recipient (e.g. for expiry notices)
impl From<&Sender> for Recipient {
    fn from(sender: &Sender) -> Self {
        Self {
            person: sender.person.clone(),
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Recipient: {}", self.person.name)
    }
}
