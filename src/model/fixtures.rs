// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

//! Canned account data for the demo binary and tests.

use super::field::Field;
use super::ids::{ParentId, RecordId};
use super::record::Record;

pub const DEMO_PARENT_NAME: &str = "Edge Communications";

pub fn demo_parent_id() -> ParentId {
    ParentId::new("0015gDemoAcct").expect("parent id")
}

fn rid(value: &str) -> RecordId {
    RecordId::new(value).expect("record id")
}

pub fn demo_records() -> Vec<Record> {
    vec![
        Record::new(rid("0035g00001"))
            .with_field(Field::FirstName, "Amara")
            .with_field(Field::LastName, "Okafor")
            .with_field(Field::Birthdate, "1988-04-12")
            .with_field(Field::LeadSource, "Web")
            .with_field(Field::Email, "amara.okafor@example.com"),
        Record::new(rid("0035g00002"))
            .with_field(Field::FirstName, "Jonas")
            .with_field(Field::LastName, "Lindqvist")
            .with_field(Field::Birthdate, "1979-11-02")
            .with_field(Field::LeadSource, "Phone Inquiry")
            .with_field(Field::Email, "jonas.lindqvist@example.com"),
        Record::new(rid("0035g00003"))
            .with_field(Field::FirstName, "Priya")
            .with_field(Field::LastName, "Raman")
            .with_field(Field::Birthdate, "1992-06-30")
            .with_field(Field::LeadSource, "Partner Referral")
            .with_field(Field::Email, "priya.raman@example.com"),
        Record::new(rid("0035g00004"))
            .with_field(Field::FirstName, "Marcus")
            .with_field(Field::LastName, "Webb")
            .with_field(Field::Birthdate, "1985-09-21")
            .with_field(Field::LeadSource, "Other")
            .with_field(Field::Email, "marcus.webb@example.com"),
    ]
}
