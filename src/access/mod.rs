//! Access rows listed in the folder policy.
//!
//! Records come either from a users file or from the owners, contributors,
//! readers and principal investigator of a portal study record. Only
//! privileged rows (owners and PIs holding read-write-share) end up in the
//! policy table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::StudyRecord;
use crate::error::Result;

pub const PRIVILEGED_ACCESS: &str = "READ-WRITE-SHARE";
pub const READ_ACCESS: &str = "READ";
pub const PERMANENT: &str = "PERMANENT";

const PRIVILEGED_ROLES: [&str; 4] = [
    "owner",
    "principal investigator",
    "pi",
    "principal_investigator",
];

pub const ROLE_OWNER: &str = "Owner";
pub const ROLE_CONTRIBUTOR: &str = "Contributor";
pub const ROLE_READER: &str = "Reader";
pub const ROLE_PRINCIPAL_INVESTIGATOR: &str = "Principal Investigator";

/// One person's access to a study folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_access_level")]
    pub access_level: String,
    #[serde(default = "default_expiration")]
    pub expiration: String,
}

fn default_name() -> String {
    "[Name]".into()
}

fn default_role() -> String {
    "[Role]".into()
}

fn default_access_level() -> String {
    READ_ACCESS.into()
}

fn default_expiration() -> String {
    PERMANENT.into()
}

impl AccessRecord {
    pub fn new(name: impl Into<String>, role: &str, access_level: &str) -> Self {
        Self {
            name: name.into(),
            role: role.to_string(),
            access_level: access_level.to_string(),
            expiration: PERMANENT.to_string(),
        }
    }

    pub fn is_privileged(&self) -> bool {
        let role = self.role.to_lowercase();
        PRIVILEGED_ROLES.contains(&role.as_str())
            && self.access_level.eq_ignore_ascii_case(PRIVILEGED_ACCESS)
    }

    /// Splits `"Name (email)"` into its parts; bare names have no email.
    pub fn contact(&self) -> (&str, Option<&str>) {
        split_contact(&self.name)
    }
}

/// Keeps owners and PIs holding read-write-share, in input order.
pub fn filter_privileged(records: &[AccessRecord]) -> Vec<AccessRecord> {
    records
        .iter()
        .filter(|record| record.is_privileged())
        .cloned()
        .collect()
}

/// Builds access rows from a portal study record.
///
/// Owners and the PI receive read-write-share, contributors and readers read
/// access. The PI row is skipped when an earlier row already names them.
pub fn parse_from_study_record(study: &StudyRecord) -> Vec<AccessRecord> {
    let mut records = Vec::new();
    let groups = [
        (&study.owners, ROLE_OWNER, PRIVILEGED_ACCESS),
        (&study.contributors, ROLE_CONTRIBUTOR, READ_ACCESS),
        (&study.readers, ROLE_READER, READ_ACCESS),
    ];
    for (entries, role, access_level) in groups {
        for entry in entries {
            records.push(AccessRecord::new(display_name(entry), role, access_level));
        }
    }

    let pi_name = study
        .effective_principal_investigator_name
        .as_deref()
        .filter(|name| !name.trim().is_empty());
    if let Some(pi_name) = pi_name {
        let pi_display = match study
            .effective_principal_investigator_email
            .as_deref()
            .filter(|email| !email.trim().is_empty())
        {
            Some(email) => format!("{pi_name} ({email})"),
            None => pi_name.to_string(),
        };
        let needle = pi_display.to_lowercase();
        let already_listed = records
            .iter()
            .any(|record| record.name.to_lowercase().contains(&needle));
        if !already_listed {
            records.push(AccessRecord::new(
                pi_display,
                ROLE_PRINCIPAL_INVESTIGATOR,
                PRIVILEGED_ACCESS,
            ));
        }
    }
    records
}

/// Loads a JSON (or YAML) array of access records.
pub fn load_users_file(path: &Path) -> Result<Vec<AccessRecord>> {
    crate::config::read_document(path)
}

fn display_name(entry: &str) -> String {
    match split_contact(entry) {
        (name, Some(email)) => format!("{name} ({email})"),
        (name, None) => name.to_string(),
    }
}

fn split_contact(entry: &str) -> (&str, Option<&str>) {
    let entry = entry.trim();
    if entry.ends_with(')') {
        if let Some((name, rest)) = entry.split_once('(') {
            let email = rest.split(')').next().unwrap_or_default().trim();
            return (name.trim(), Some(email));
        }
    }
    (entry, None)
}
