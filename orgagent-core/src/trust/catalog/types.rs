use rst_common::standard::serde::{self, Deserialize, Serialize};

use super::schema::schema_name;

pub const CREDENTIALS_V1: &str = "https://www.w3.org/2018/credentials/v1";
pub const CONTEXT_MASTERDATA: &str =
    "https://raw.githubusercontent.com/iil-network/contexts/master/masterdata.jsonld";
pub const CONTEXT_BANK_ACCOUNT: &str =
    "https://raw.githubusercontent.com/iil-network/contexts/master/bankaccount.json";
pub const CONTEXT_INDY_CREDENTIAL: &str =
    "https://raw.githubusercontent.com/iil-network/contexts/master/indycredential.jsonld";

pub const TYPE_VC: &str = "VerifiableCredential";
pub const TYPE_ORGANIZATIONAL_PROFILE: &str = "OrganizationalProfileCredential";
pub const TYPE_BANK_ACCOUNT: &str = "BankAccountCredential";
pub const TYPE_INDY_CREDENTIAL: &str = "IndyCredential";

pub const TAG_MASTERDATA: &str = "masterdata";
pub const TAG_BANK_ACCOUNT: &str = "bank_account";
pub const TAG_OTHER: &str = "other";

/// `SubjectShape` tells the presentation aggregator how to build a credential subject
///
/// - [`SubjectShape::Generic`] keeps the stored payload
/// - [`SubjectShape::BankAccount`] wraps the bank account fields into the dedicated bank account
/// subject, because the kind carries its own external `JSON-LD` schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectShape {
    Generic,
    BankAccount,
}

/// `Descriptor` is the immutable description of a credential kind
#[derive(Debug)]
pub struct Descriptor {
    pub context: &'static [&'static str],
    pub types: &'static [&'static str],
    pub tag: &'static str,
    pub shape: SubjectShape,
}

const ORGANIZATIONAL_PROFILE: Descriptor = Descriptor {
    context: &[CREDENTIALS_V1, CONTEXT_MASTERDATA],
    types: &[TYPE_VC, TYPE_ORGANIZATIONAL_PROFILE],
    tag: TAG_MASTERDATA,
    shape: SubjectShape::Generic,
};

const BANK_ACCOUNT: Descriptor = Descriptor {
    context: &[CREDENTIALS_V1, CONTEXT_BANK_ACCOUNT],
    types: &[TYPE_VC, TYPE_BANK_ACCOUNT],
    tag: TAG_BANK_ACCOUNT,
    shape: SubjectShape::BankAccount,
};

const OTHER: Descriptor = Descriptor {
    context: &[],
    types: &[],
    tag: TAG_OTHER,
    shape: SubjectShape::Generic,
};

/// `CredentialType` is the closed set of document and credential kinds the agent can process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub enum CredentialType {
    #[serde(rename = "ORGANIZATIONAL_PROFILE_CREDENTIAL")]
    OrganizationalProfile,

    #[serde(rename = "BANK_ACCOUNT_CREDENTIAL")]
    BankAccount,

    #[serde(rename = "OTHER")]
    Other,
}

impl CredentialType {
    pub fn descriptor(&self) -> &'static Descriptor {
        match self {
            CredentialType::OrganizationalProfile => &ORGANIZATIONAL_PROFILE,
            CredentialType::BankAccount => &BANK_ACCOUNT,
            CredentialType::Other => &OTHER,
        }
    }

    pub fn context(&self) -> Vec<String> {
        self.descriptor()
            .context
            .iter()
            .map(|ctx| ctx.to_string())
            .collect()
    }

    pub fn types(&self) -> Vec<String> {
        self.descriptor()
            .types
            .iter()
            .map(|typ| typ.to_string())
            .collect()
    }

    pub fn tag(&self) -> &'static str {
        self.descriptor().tag
    }

    pub fn shape(&self) -> SubjectShape {
        self.descriptor().shape
    }

    /// `from_type_labels` resolves the kind from a `JSON-LD` type list found in received
    /// credential data. The first known label wins, unknown lists give `None`
    pub fn from_type_labels(labels: &[String]) -> Option<Self> {
        labels.iter().find_map(|label| match label.as_str() {
            TYPE_ORGANIZATIONAL_PROFILE => Some(CredentialType::OrganizationalProfile),
            TYPE_BANK_ACCOUNT => Some(CredentialType::BankAccount),
            _ => None,
        })
    }

    /// `from_schema_id` maps the name embedded in a ledger schema identifier to its kind
    ///
    /// This resolution is total, any unknown or malformed identifier gives [`CredentialType::Other`]
    pub fn from_schema_id(schema_id: &str) -> Self {
        match schema_name(schema_id) {
            Some(TAG_MASTERDATA) => CredentialType::OrganizationalProfile,
            Some(TAG_BANK_ACCOUNT) => CredentialType::BankAccount,
            _ => CredentialType::Other,
        }
    }
}
